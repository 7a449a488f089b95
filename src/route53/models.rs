use crate::common::{self, RecordData, RecordType, ResponseSnafu};

pub(super) const XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";

#[derive(serde::Deserialize)]
pub(super) struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: ErrorDetail,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListHostedZonesResponse {
    #[serde(default)]
    pub hosted_zones: HostedZones,
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListHostedZonesByNameResponse {
    #[serde(default)]
    pub hosted_zones: HostedZones,
}

#[derive(Default, serde::Deserialize)]
pub(super) struct HostedZones {
    #[serde(rename = "HostedZone", default)]
    pub items: Vec<HostedZone>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct HostedZone {
    pub id: String,
    pub name: String,
    pub config: Option<HostedZoneConfig>,
    #[serde(default)]
    pub resource_record_set_count: u64,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct HostedZoneConfig {
    pub comment: Option<String>,
}

impl HostedZone {
    pub fn into_zone(self) -> common::Zone {
        common::Zone {
            id: self.id,
            name: self.name,
            comment: self.config.and_then(|config| config.comment),
            record_set_count: self.resource_record_set_count,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListResourceRecordSetsResponse {
    #[serde(default)]
    pub resource_record_sets: ResourceRecordSets,
    pub is_truncated: bool,
    pub next_record_name: Option<String>,
    pub next_record_type: Option<String>,
    pub next_record_identifier: Option<String>,
}

#[derive(Default, serde::Deserialize)]
pub(super) struct ResourceRecordSets {
    #[serde(rename = "ResourceRecordSet", default)]
    pub items: Vec<ResourceRecordSet>,
}

// Field order follows the API schema; the service rejects out-of-order elements.
#[derive(serde::Deserialize, serde::Serialize)]
pub(super) struct ResourceRecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: RecordType,
    #[serde(rename = "SetIdentifier", skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "ResourceRecords", skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<ResourceRecords>,
    #[serde(rename = "AliasTarget", skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,
}

#[derive(serde::Deserialize, serde::Serialize)]
pub(super) struct ResourceRecords {
    #[serde(rename = "ResourceRecord", default)]
    pub items: Vec<ResourceRecord>,
}

#[derive(serde::Deserialize, serde::Serialize)]
pub(super) struct ResourceRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(serde::Deserialize, serde::Serialize)]
pub(super) struct AliasTarget {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

impl ResourceRecordSet {
    pub fn into_record_set(self) -> common::Result<common::RecordSet> {
        let values: Vec<String> = self
            .resource_records
            .map(|records| records.items.into_iter().map(|r| r.value).collect())
            .unwrap_or_default();

        let data = match (values.is_empty(), self.alias_target) {
            (false, None) => RecordData::Values(values),
            (true, Some(alias)) => RecordData::Alias(alias.dns_name),
            (false, Some(_)) => {
                return ResponseSnafu {
                    message: format!(
                        "Record set {} {} has both values and an alias target",
                        self.name, self.kind
                    ),
                }
                .fail()
            }
            (true, None) => {
                return ResponseSnafu {
                    message: format!(
                        "Record set {} {} has neither values nor an alias target",
                        self.name, self.kind
                    ),
                }
                .fail()
            }
        };

        Ok(common::RecordSet {
            name: self.name,
            kind: self.kind,
            set_identifier: self.set_identifier,
            ttl: self.ttl,
            data,
        })
    }

    /// Wire form of a record to create. Aliases point into the same zone.
    pub fn for_create(record: &common::DesiredRecord, hosted_zone_id: &str) -> Self {
        let (resource_records, alias_target) = match &record.data {
            RecordData::Values(values) => (
                Some(ResourceRecords {
                    items: values
                        .iter()
                        .map(|value| ResourceRecord {
                            value: value.clone(),
                        })
                        .collect(),
                }),
                None,
            ),
            RecordData::Alias(target) => (
                None,
                Some(AliasTarget {
                    hosted_zone_id: hosted_zone_id.to_string(),
                    dns_name: target.clone(),
                    evaluate_target_health: false,
                }),
            ),
        };

        Self {
            name: record.name.clone(),
            kind: record.kind.clone(),
            set_identifier: None,
            ttl: record.effective_ttl(),
            resource_records,
            alias_target,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub(super) struct ChangeResourceRecordSetsRequest {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatch,
}

#[derive(serde::Serialize)]
pub(super) struct ChangeBatch {
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "Changes")]
    pub changes: Changes,
}

#[derive(serde::Serialize)]
pub(super) struct Changes {
    #[serde(rename = "Change")]
    pub items: Vec<Change>,
}

#[derive(serde::Serialize)]
pub(super) struct Change {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    pub resource_record_set: ResourceRecordSet,
}

impl ChangeResourceRecordSetsRequest {
    pub fn new(batch: &common::ChangeBatch, hosted_zone_id: &str) -> Self {
        Self {
            xmlns: XMLNS,
            change_batch: ChangeBatch {
                comment: batch.comment.clone(),
                changes: Changes {
                    items: vec![Change {
                        action: batch.action.as_str(),
                        resource_record_set: ResourceRecordSet::for_create(
                            &batch.record,
                            hosted_zone_id,
                        ),
                    }],
                },
            },
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ChangeResourceRecordSetsResponse {
    pub change_info: ChangeInfo,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ChangeInfo {
    pub id: String,
    pub status: String,
}
