use crate::common::{self, RecordData, RecordType, ValidationSnafu};

/// Zone document as written on disk.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub(super) struct ZoneDocument {
    pub zone: String,
    pub rrsets: Vec<Record>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub(super) struct Record {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    // Non-string answers are rejected in `into_desired`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Record {
    pub fn into_desired(self) -> common::Result<common::DesiredRecord> {
        let data = match (self.values, self.alias) {
            (Some(values), None) => {
                let mut answers = Vec::with_capacity(values.len());
                for value in values {
                    match value {
                        serde_json::Value::String(answer) => answers.push(answer),
                        other => {
                            return ValidationSnafu {
                                name: self.name,
                                message: format!("value {other} is not a string"),
                            }
                            .fail()
                        }
                    }
                }
                RecordData::Values(answers)
            }
            (None, Some(alias)) => RecordData::Alias(alias),
            (Some(_), Some(_)) => {
                return ValidationSnafu {
                    name: self.name,
                    message: "values and alias are mutually exclusive",
                }
                .fail()
            }
            (None, None) => {
                return ValidationSnafu {
                    name: self.name,
                    message: "one of values or alias is required",
                }
                .fail()
            }
        };

        let record = common::DesiredRecord {
            name: self.name,
            kind: self.kind,
            ttl: self.ttl,
            data,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn from_desired(value: &common::DesiredRecord) -> Self {
        let (values, alias) = match &value.data {
            RecordData::Values(values) => (
                Some(values.iter().cloned().map(serde_json::Value::String).collect()),
                None,
            ),
            RecordData::Alias(target) => (None, Some(target.clone())),
        };
        Self {
            name: value.name.clone(),
            kind: value.kind.clone(),
            ttl: value.ttl,
            values,
            alias,
        }
    }
}
