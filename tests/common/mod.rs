//! Scripted provider and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use r53sync::common::{
    ChangeBatch, DesiredRecord, Page, Provider, RecordData, RecordSet, RecordSetCursor,
    ResponseSnafu, Result, Zone, ZoneCursor,
};

pub const ZONE_NAME: &str = "example.com.";
pub const ZONE_ID: &str = "/hostedzone/Z1D633PJN98FT9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListZones(Option<String>),
    FindZones(String),
    ListRecordSets(String, Option<RecordSetCursor>),
    Create(String),
}

#[derive(Debug, Clone)]
pub struct Created {
    pub zone_id: String,
    pub comment: String,
    pub action: &'static str,
    pub record: DesiredRecord,
}

/// Serves fixed pages and records every call made against it.
#[derive(Default)]
pub struct ScriptedProvider {
    pub zone_pages: Vec<Vec<Zone>>,
    pub lookup: Vec<Zone>,
    pub record_pages: Vec<Vec<RecordSet>>,
    /// Create calls with this record name fail.
    pub reject_create: Option<String>,
    pub calls: RefCell<Vec<Call>>,
    pub created: RefCell<Vec<Created>>,
}

impl ScriptedProvider {
    pub fn with_records(record_sets: Vec<RecordSet>) -> Self {
        Self::with_record_pages(vec![record_sets])
    }

    pub fn with_record_pages(record_pages: Vec<Vec<RecordSet>>) -> Self {
        Self {
            lookup: vec![zone(ZONE_ID, ZONE_NAME, None)],
            record_pages,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn created(&self) -> Vec<Created> {
        self.created.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }
}

fn page_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix("page"))
        .and_then(|i| i.parse().ok())
        .unwrap_or(0)
}

impl Provider for ScriptedProvider {
    fn list_zones(&self, cursor: Option<&ZoneCursor>) -> Result<Page<Zone, ZoneCursor>> {
        self.calls
            .borrow_mut()
            .push(Call::ListZones(cursor.map(|c| c.marker.clone())));

        let index = page_index(cursor.map(|c| c.marker.as_str()));
        let next = (index + 1 < self.zone_pages.len()).then(|| ZoneCursor {
            marker: format!("page{}", index + 1),
        });
        Ok(Page {
            items: self.zone_pages.get(index).cloned().unwrap_or_default(),
            next,
        })
    }

    fn find_zones_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        self.calls.borrow_mut().push(Call::FindZones(name.to_string()));
        Ok(self.lookup.clone())
    }

    fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<&RecordSetCursor>,
    ) -> Result<Page<RecordSet, RecordSetCursor>> {
        self.calls
            .borrow_mut()
            .push(Call::ListRecordSets(zone_id.to_string(), cursor.cloned()));

        let index = page_index(cursor.map(|c| c.name.as_str()));
        let next = (index + 1 < self.record_pages.len()).then(|| RecordSetCursor {
            name: format!("page{}", index + 1),
            kind: "A".to_string(),
            identifier: Some(format!("id{}", index + 1)),
        });
        Ok(Page {
            items: self.record_pages.get(index).cloned().unwrap_or_default(),
            next,
        })
    }

    fn create_record_set(&self, zone_id: &str, batch: &ChangeBatch) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Create(batch.record.name.clone()));

        if self.reject_create.as_deref() == Some(batch.record.name.as_str()) {
            return ResponseSnafu {
                message: "Request unsuccessful: 400 InvalidChangeBatch already exists",
            }
            .fail();
        }

        self.created.borrow_mut().push(Created {
            zone_id: zone_id.to_string(),
            comment: batch.comment.clone(),
            action: batch.action.as_str(),
            record: batch.record.clone(),
        });
        Ok(())
    }
}

pub fn zone(id: &str, name: &str, comment: Option<&str>) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
        comment: comment.map(str::to_string),
        record_set_count: 2,
    }
}

pub fn observed(name: &str, kind: &str, values: &[&str]) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        kind: kind.into(),
        set_identifier: None,
        ttl: Some(300),
        data: RecordData::Values(values.iter().map(|v| v.to_string()).collect()),
    }
}

pub fn desired(name: &str, kind: &str, values: &[&str]) -> DesiredRecord {
    DesiredRecord {
        name: name.to_string(),
        kind: kind.into(),
        ttl: None,
        data: RecordData::Values(values.iter().map(|v| v.to_string()).collect()),
    }
}

/// The NS and SOA sets every hosted zone starts with.
pub fn zone_apex() -> Vec<RecordSet> {
    vec![
        observed(ZONE_NAME, "NS", &["ns-60.awsdns-07.com.", "ns-1390.awsdns-45.org."]),
        observed(
            ZONE_NAME,
            "SOA",
            &["ns-657.awsdns-18.net. awsdns-hostmaster.amazon.com. 1 7200 900 1209600 86400"],
        ),
    ]
}
