use std::io::{BufRead, Write};

use snafu::ResultExt;

use crate::common::{diff_records, DesiredRecord, OutputSnafu, Provider, RecordSet, Result};
use crate::display;
use crate::document::Document;

use super::{list_all_record_sets, list_all_zones, reconcile, ZoneDirectory};

/// One method per command. Each call reads a fresh snapshot of the zone.
pub struct R53Sync<P> {
    provider: P,
    zones: ZoneDirectory,
}

impl<P: Provider> R53Sync<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            zones: ZoneDirectory::new(),
        }
    }

    pub fn record_sets(&mut self, zone_name: &str) -> Result<(String, Vec<RecordSet>)> {
        let zone_id = self.zones.resolve(&self.provider, zone_name)?;
        let record_sets = list_all_record_sets(&self.provider, &zone_id)?;
        tracing::info!(
            zone = zone_name,
            records = record_sets.len(),
            "Read completed",
        );
        Ok((zone_id, record_sets))
    }

    pub fn list_zones<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let zones = list_all_zones(&self.provider)?;
        display::write_zone_table(out, &zones).context(OutputSnafu)
    }

    pub fn list_zone_record_sets<W: Write>(&mut self, zone_name: &str, out: &mut W) -> Result<()> {
        let (_, record_sets) = self.record_sets(zone_name)?;
        display::write_record_set_table(out, &record_sets).context(OutputSnafu)
    }

    pub fn dump<W: Write>(&mut self, zone_name: &str, out: &mut W) -> Result<()> {
        let (_, record_sets) = self.record_sets(zone_name)?;
        Document::from_record_sets(zone_name, &record_sets).write(out)
    }

    /// Reports what `sync` would offer to create, without prompting.
    pub fn diff<W: Write>(&mut self, document: &Document, out: &mut W) -> Result<()> {
        let (_, record_sets) = self.record_sets(&document.zone)?;
        let diff = diff_records(&document.records, &record_sets)?;

        tracing::info!(
            zone = document.zone.as_str(),
            matched = diff.matched.len(),
            missing = diff.desired_only.len(),
            extra = diff.observed_only.len(),
            "Diff completed",
        );
        display::write_diff(out, &diff).context(OutputSnafu)
    }

    /// Offers every record missing from the zone for creation, one at a time.
    pub fn sync<R: BufRead, W: Write>(
        &mut self,
        document: &Document,
        input: &mut R,
        out: &mut W,
    ) -> Result<Vec<DesiredRecord>> {
        let (zone_id, record_sets) = self.record_sets(&document.zone)?;
        let diff = diff_records(&document.records, &record_sets)?;

        if diff.is_converged() {
            tracing::info!(zone = document.zone.as_str(), "No changes detected");
            return Ok(Vec::new());
        }

        tracing::info!(
            zone = document.zone.as_str(),
            create = diff.desired_only.len(),
            "Offering changes",
        );
        let created = reconcile(&self.provider, &zone_id, &diff, input, out)?;

        tracing::info!(
            zone = document.zone.as_str(),
            created = created.len(),
            skipped = diff.desired_only.len() - created.len(),
            "Sync completed",
        );
        Ok(created)
    }
}
