use std::fmt;
use std::str::FromStr;

use snafu::ensure;

use super::{Result, ValidationSnafu};

/// Record types the zone document never declares and the matcher never sees.
pub const ZONE_MANAGEMENT_KINDS: [RecordType; 2] = [RecordType::NS, RecordType::SOA];

/// TTL attached to value records created without an explicit one.
pub const DEFAULT_TTL: u32 = 1800;

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    AAAA,
    CAA,
    CNAME,
    DS,
    MX,
    NAPTR,
    NS,
    PTR,
    SOA,
    SPF,
    SRV,
    TXT,
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CAA => "CAA",
            RecordType::CNAME => "CNAME",
            RecordType::DS => "DS",
            RecordType::MX => "MX",
            RecordType::NAPTR => "NAPTR",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::SOA => "SOA",
            RecordType::SPF => "SPF",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
            RecordType::Other(kind) => kind,
        }
    }

    pub fn is_zone_management(&self) -> bool {
        ZONE_MANAGEMENT_KINDS.contains(self)
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let kind = s.trim().to_ascii_uppercase();
        Ok(match kind.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "CAA" => RecordType::CAA,
            "CNAME" => RecordType::CNAME,
            "DS" => RecordType::DS,
            "MX" => RecordType::MX,
            "NAPTR" => RecordType::NAPTR,
            "NS" => RecordType::NS,
            "PTR" => RecordType::PTR,
            "SOA" => RecordType::SOA,
            "SPF" => RecordType::SPF,
            "SRV" => RecordType::SRV,
            "TXT" => RecordType::TXT,
            _ => RecordType::Other(kind),
        })
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a list of answers or an alias to another name. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Values(Vec<String>),
    Alias(String),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Values(values) => write!(f, "{}", values.join(", ")),
            RecordData::Alias(target) => write!(f, "alias: {target}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub comment: Option<String>,
    pub record_set_count: u64,
}

/// A record set as observed at the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub name: String,
    pub kind: RecordType,
    pub set_identifier: Option<String>,
    pub ttl: Option<u32>,
    pub data: RecordData,
}

impl RecordSet {
    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.name, &self.kind)
    }
}

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.kind)?;
        if let Some(identifier) = &self.set_identifier {
            write!(f, " [{identifier}]")?;
        }
        if let Some(ttl) = self.ttl {
            write!(f, " ttl={ttl}")?;
        }
        write!(f, " {}", self.data)
    }
}

/// A record set declared in the zone document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRecord {
    pub name: String,
    pub kind: RecordType,
    pub ttl: Option<u32>,
    pub data: RecordData,
}

impl DesiredRecord {
    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.name, &self.kind)
    }

    /// Checks the record can be submitted as-is.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.name.ends_with('.'),
            ValidationSnafu {
                name: &self.name,
                message: "name must end with a dot",
            }
        );
        ensure!(
            !self.kind.as_str().is_empty(),
            ValidationSnafu {
                name: &self.name,
                message: "type must not be empty",
            }
        );
        match &self.data {
            RecordData::Values(values) => {
                ensure!(
                    !values.is_empty(),
                    ValidationSnafu {
                        name: &self.name,
                        message: "values must not be empty",
                    }
                );
                ensure!(
                    values.iter().all(|value| !value.is_empty()),
                    ValidationSnafu {
                        name: &self.name,
                        message: "values must not contain empty strings",
                    }
                );
            }
            RecordData::Alias(target) => {
                ensure!(
                    !target.is_empty(),
                    ValidationSnafu {
                        name: &self.name,
                        message: "alias target must not be empty",
                    }
                );
                ensure!(
                    self.ttl.is_none(),
                    ValidationSnafu {
                        name: &self.name,
                        message: "alias records cannot carry a ttl",
                    }
                );
            }
        }
        Ok(())
    }

    /// TTL to submit: the declared one, the default for value records, none for aliases.
    pub fn effective_ttl(&self) -> Option<u32> {
        match self.data {
            RecordData::Values(_) => Some(self.ttl.unwrap_or(DEFAULT_TTL)),
            RecordData::Alias(_) => None,
        }
    }
}

impl fmt::Display for DesiredRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.kind)?;
        if let Some(ttl) = self.ttl {
            write!(f, " ttl={ttl}")?;
        }
        write!(f, " {}", self.data)
    }
}

/// Record identity for diffing: lower-cased name, upper-cased type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub name: String,
    pub kind: String,
}

impl MatchKey {
    pub fn new(name: &str, kind: &RecordType) -> Self {
        Self {
            name: name.to_lowercase(),
            kind: kind.as_str().to_uppercase(),
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.name, self.kind)
    }
}

pub enum ChangeAction {
    Create,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "CREATE",
        }
    }
}

/// A single-change batch submitted atomically.
pub struct ChangeBatch {
    pub comment: String,
    pub action: ChangeAction,
    pub record: DesiredRecord,
}

impl ChangeBatch {
    pub fn create(record: DesiredRecord, at: chrono::DateTime<chrono::Utc>) -> Result<Self> {
        record.validate()?;
        Ok(Self {
            comment: format!("r53sync {}", at.format("%Y-%m-%d %H:%M:%S%.6f")),
            action: ChangeAction::Create,
            record,
        })
    }
}

/// One page of a listing and, when the listing was truncated, where to resume.
pub struct Page<T, C> {
    pub items: Vec<T>,
    pub next: Option<C>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCursor {
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSetCursor {
    pub name: String,
    pub kind: String,
    pub identifier: Option<String>,
}

/// The capability set the reconciliation core needs from a DNS host.
pub trait Provider {
    fn list_zones(&self, cursor: Option<&ZoneCursor>) -> super::Result<Page<Zone, ZoneCursor>>;
    fn find_zones_by_name(&self, name: &str) -> super::Result<Vec<Zone>>;
    fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<&RecordSetCursor>,
    ) -> super::Result<Page<RecordSet, RecordSetCursor>>;
    fn create_record_set(&self, zone_id: &str, batch: &ChangeBatch) -> super::Result<()>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn list_zones(&self, cursor: Option<&ZoneCursor>) -> super::Result<Page<Zone, ZoneCursor>> {
        (**self).list_zones(cursor)
    }

    fn find_zones_by_name(&self, name: &str) -> super::Result<Vec<Zone>> {
        (**self).find_zones_by_name(name)
    }

    fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<&RecordSetCursor>,
    ) -> super::Result<Page<RecordSet, RecordSetCursor>> {
        (**self).list_record_sets(zone_id, cursor)
    }

    fn create_record_set(&self, zone_id: &str, batch: &ChangeBatch) -> super::Result<()> {
        (**self).create_record_set(zone_id, batch)
    }
}
