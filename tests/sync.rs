mod common;

use std::io::Cursor;

use r53sync::common::{Error, RecordData, RecordSetCursor, RecordType, DEFAULT_TTL};
use r53sync::document::Document;
use r53sync::service::R53Sync;

use common::{desired, observed, zone, zone_apex, Call, ScriptedProvider, ZONE_ID, ZONE_NAME};

fn document(records: Vec<r53sync::common::DesiredRecord>) -> Document {
    Document {
        zone: ZONE_NAME.to_string(),
        records,
    }
}

fn run_sync(
    r53sync: &mut R53Sync<&ScriptedProvider>,
    document: &Document,
    answers: &str,
) -> (r53sync::common::Result<Vec<r53sync::common::DesiredRecord>>, String) {
    let mut input = Cursor::new(answers.to_string());
    let mut output = Vec::new();
    let result = r53sync.sync(document, &mut input, &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn confirmed_record_is_created_with_default_ttl() {
    let provider = ScriptedProvider::with_records(zone_apex());
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![desired("a.example.com.", "A", &["1.2.3.4"])]);

    let (result, output) = run_sync(&mut r53sync, &doc, "y\n");
    assert_eq!(result.unwrap().len(), 1);
    assert!(output.contains("a.example.com. A 1.2.3.4"));
    assert!(output.contains("Create? (y/n) > "));

    let created = provider.created();
    assert_eq!(created.len(), 1);
    let change = &created[0];
    assert_eq!(change.zone_id, ZONE_ID);
    assert_eq!(change.action, "CREATE");
    assert!(change.comment.starts_with("r53sync "));
    assert_eq!(change.record.name, "a.example.com.");
    assert_eq!(change.record.kind, RecordType::A);
    assert_eq!(change.record.data, RecordData::Values(vec!["1.2.3.4".into()]));
    assert_eq!(change.record.effective_ttl(), Some(DEFAULT_TTL));
    assert_eq!(DEFAULT_TTL, 1800);
}

#[test]
fn declined_record_is_skipped_after_reprompt() {
    let provider = ScriptedProvider::with_records(zone_apex());
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![
        desired("a.example.com.", "A", &["1.2.3.4"]),
        desired("b.example.com.", "TXT", &["\"hello\""]),
    ]);

    let (result, output) = run_sync(&mut r53sync, &doc, "maybe\nn\ny\n");
    let created = result.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "b.example.com.");
    assert!(output.contains("Please enter \"y\" or \"n\" or quit with Ctrl-C"));

    assert_eq!(provider.count(|call| matches!(call, Call::Create(_))), 1);
    assert_eq!(provider.created()[0].record.name, "b.example.com.");
}

#[test]
fn matched_records_are_never_offered() {
    let mut live = zone_apex();
    live.push(observed("www.example.com.", "A", &["10.20.30.55"]));
    let provider = ScriptedProvider::with_records(live);
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![desired("WWW.example.com.", "a", &["10.20.30.55"])]);

    let (result, output) = run_sync(&mut r53sync, &doc, "");
    assert!(result.unwrap().is_empty());
    assert!(!output.contains("Create?"));
    assert_eq!(provider.count(|call| matches!(call, Call::Create(_))), 0);
}

#[test]
fn rerun_after_partial_sync_only_offers_the_remainder() {
    let provider = ScriptedProvider::with_records(vec![observed("a.example.com.", "A", &["1.2.3.4"])]);
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![
        desired("a.example.com.", "A", &["1.2.3.4"]),
        desired("b.example.com.", "A", &["1.2.3.5"]),
    ]);

    let (result, output) = run_sync(&mut r53sync, &doc, "y\n");
    assert_eq!(result.unwrap().len(), 1);
    assert_eq!(output.matches("Create? (y/n) > ").count(), 1);
    assert_eq!(provider.created()[0].record.name, "b.example.com.");
}

#[test]
fn closed_input_aborts_without_creating() {
    let provider = ScriptedProvider::with_records(zone_apex());
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![desired("a.example.com.", "A", &["1.2.3.4"])]);

    let (result, _) = run_sync(&mut r53sync, &doc, "what\n");
    assert!(matches!(result, Err(Error::Interrupted)));
    assert!(provider.created().is_empty());
}

#[test]
fn failed_creation_aborts_the_run() {
    let mut provider = ScriptedProvider::with_records(zone_apex());
    provider.reject_create = Some("a.example.com.".into());
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![
        desired("a.example.com.", "A", &["1.2.3.4"]),
        desired("b.example.com.", "A", &["1.2.3.5"]),
    ]);

    let (result, output) = run_sync(&mut r53sync, &doc, "y\ny\n");
    assert!(matches!(result, Err(Error::ResponseError { .. })));
    assert_eq!(output.matches("Create? (y/n) > ").count(), 1);
    assert_eq!(provider.calls().last(), Some(&Call::Create("a.example.com.".into())));
}

#[test]
fn duplicate_document_keys_fail_before_prompting() {
    let provider = ScriptedProvider::with_records(zone_apex());
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![
        desired("a.example.com.", "A", &["1.2.3.4"]),
        desired("a.example.com.", "A", &["1.2.3.5"]),
    ]);

    let (result, output) = run_sync(&mut r53sync, &doc, "y\ny\n");
    assert!(matches!(result, Err(Error::DuplicateKey { side: "desired", .. })));
    assert!(output.is_empty());
    assert_eq!(provider.count(|call| matches!(call, Call::Create(_))), 0);
}

#[test]
fn unknown_zone_fails_before_listing_records() {
    let mut provider = ScriptedProvider::with_records(zone_apex());
    provider.lookup = vec![zone("/hostedzone/Z2", "example.net.", None)];
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![desired("a.example.com.", "A", &["1.2.3.4"])]);

    let (result, _) = run_sync(&mut r53sync, &doc, "y\n");
    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert_eq!(provider.calls(), vec![Call::FindZones(ZONE_NAME.into())]);
}

#[test]
fn ambiguous_zone_is_rejected() {
    let mut provider = ScriptedProvider::with_records(zone_apex());
    provider.lookup = vec![
        zone("/hostedzone/Z1", ZONE_NAME, None),
        zone("/hostedzone/Z2", ZONE_NAME, None),
    ];
    let mut r53sync = R53Sync::new(&provider);

    let err = r53sync.record_sets(ZONE_NAME).unwrap_err();
    assert!(matches!(err, Error::Ambiguous { count: 2, .. }));
}

#[test]
fn diff_follows_record_set_pages() {
    let provider = ScriptedProvider::with_record_pages(vec![
        zone_apex(),
        vec![observed("a.example.com.", "A", &["1.2.3.4"])],
        vec![observed("c.example.com.", "TXT", &["\"hello\""])],
    ]);
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![
        desired("a.example.com.", "A", &["1.2.3.4"]),
        desired("b.example.com.", "CNAME", &["a.example.com."]),
    ]);

    let mut output = Vec::new();
    r53sync.diff(&doc, &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(
        output,
        "New record in file: b.example.com. CNAME a.example.com.\n\
         Record not in file: c.example.com. TXT ttl=300 \"hello\"\n"
    );
    assert_eq!(
        provider.calls(),
        vec![
            Call::FindZones(ZONE_NAME.into()),
            Call::ListRecordSets(ZONE_ID.into(), None),
            Call::ListRecordSets(
                ZONE_ID.into(),
                Some(RecordSetCursor {
                    name: "page1".into(),
                    kind: "A".into(),
                    identifier: Some("id1".into()),
                })
            ),
            Call::ListRecordSets(
                ZONE_ID.into(),
                Some(RecordSetCursor {
                    name: "page2".into(),
                    kind: "A".into(),
                    identifier: Some("id2".into()),
                })
            ),
        ]
    );
    assert_eq!(provider.count(|call| matches!(call, Call::Create(_))), 0);
}

#[test]
fn zone_lookup_is_remembered_between_commands() {
    let provider = ScriptedProvider::with_records(zone_apex());
    let mut r53sync = R53Sync::new(&provider);
    let doc = document(vec![]);

    r53sync.diff(&doc, &mut std::io::sink()).unwrap();
    r53sync.diff(&doc, &mut std::io::sink()).unwrap();
    r53sync.dump(ZONE_NAME, &mut std::io::sink()).unwrap();

    assert_eq!(provider.count(|call| matches!(call, Call::FindZones(_))), 1);
    assert_eq!(provider.count(|call| matches!(call, Call::ListRecordSets(_, None))), 3);
}

#[test]
fn zones_listing_follows_markers() {
    let provider = ScriptedProvider {
        zone_pages: vec![
            vec![zone("/hostedzone/AAAA2A51Y0AAAA", "example.com.", None)],
            vec![zone("/hostedzone/AAAAX6KE0IAAAA", "example.net.", Some("Lorem ipsum"))],
        ],
        ..Default::default()
    };
    let mut r53sync = R53Sync::new(&provider);

    let mut output = Vec::new();
    r53sync.list_zones(&mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("example.com."));
    assert!(lines[2].ends_with("  -"));
    assert!(lines[3].ends_with("  Lorem ipsum"));
    assert_eq!(
        provider.calls(),
        vec![Call::ListZones(None), Call::ListZones(Some("page1".into()))]
    );
}

#[test]
fn dump_round_trips_through_sync_without_changes() {
    let mut live = zone_apex();
    live.push(observed("www.example.com.", "A", &["10.20.30.55"]));
    live.push(observed("mail.example.com.", "CNAME", &["www.example.com."]));
    let provider = ScriptedProvider::with_records(live);
    let mut r53sync = R53Sync::new(&provider);

    let mut dumped = tempfile::NamedTempFile::new().unwrap();
    r53sync.dump(ZONE_NAME, dumped.as_file_mut()).unwrap();
    let doc = Document::load(dumped.path()).unwrap();

    assert_eq!(doc.zone, ZONE_NAME);
    assert_eq!(doc.records.len(), 2);
    assert!(doc.records.iter().all(|r| !r.kind.is_zone_management()));

    let (result, _) = run_sync(&mut r53sync, &doc, "");
    assert!(result.unwrap().is_empty());
}
