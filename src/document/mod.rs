use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

use snafu::ResultExt;

use crate::common::{managed_record_sets, DesiredRecord, DocumentSnafu, RecordSet, Result};

mod models;

/// The desired state of one zone, as declared in a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub zone: String,
    pub records: Vec<DesiredRecord>,
}

impl Document {
    /// Reads and validates a document. Every record is checked up front, so a
    /// malformed entry fails before anything is sent to the provider.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).boxed_local().context(DocumentSnafu {
            message: format!("Failed to open {}", path.display()),
        })?;

        let raw: models::ZoneDocument = serde_json::from_reader(BufReader::new(file))
            .boxed_local()
            .context(DocumentSnafu {
                message: format!("Failed to parse {}", path.display()),
            })?;

        let document = Self::from_raw(raw)?;

        tracing::info!(
            path = %path.display(),
            zone = document.zone.as_str(),
            records = document.records.len(),
            "Read completed",
        );
        Ok(document)
    }

    /// Builds a document from observed record sets. NS and SOA are left out.
    pub fn from_record_sets(zone: &str, record_sets: &[RecordSet]) -> Self {
        Self {
            zone: zone.to_string(),
            records: managed_record_sets(record_sets)
                .map(|record| DesiredRecord {
                    name: record.name.clone(),
                    kind: record.kind.clone(),
                    ttl: record.ttl,
                    data: record.data.clone(),
                })
                .collect(),
        }
    }

    fn from_raw(raw: models::ZoneDocument) -> Result<Self> {
        Ok(Self {
            zone: raw.zone,
            records: raw
                .rrsets
                .into_iter()
                .map(models::Record::into_desired)
                .collect::<Result<_>>()?,
        })
    }

    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        let raw = models::ZoneDocument {
            zone: self.zone.clone(),
            rrsets: self.records.iter().map(models::Record::from_desired).collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &raw)
            .boxed_local()
            .context(DocumentSnafu {
                message: "Failed to serialise document",
            })?;
        writeln!(out).boxed_local().context(DocumentSnafu {
            message: "Failed to serialise document",
        })
    }
}
