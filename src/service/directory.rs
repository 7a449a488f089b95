use std::collections::HashMap;

use snafu::ensure;

use crate::common::{AmbiguousSnafu, NotFoundSnafu, Provider, Result};

/// Resolves zone names to provider zone ids, remembering each answer.
#[derive(Debug, Default)]
pub struct ZoneDirectory {
    zone_ids: HashMap<String, String>,
}

impl ZoneDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<P: Provider + ?Sized>(&mut self, provider: &P, zone_name: &str) -> Result<String> {
        if let Some(zone_id) = self.zone_ids.get(zone_name) {
            return Ok(zone_id.clone());
        }

        // The lookup starts at the given name, so it can return the next zone in
        // order when no exact match exists.
        let candidates: Vec<_> = provider
            .find_zones_by_name(zone_name)?
            .into_iter()
            .filter(|zone| zone.name == zone_name)
            .collect();

        ensure!(!candidates.is_empty(), NotFoundSnafu { zone: zone_name });
        ensure!(
            candidates.len() == 1,
            AmbiguousSnafu {
                zone: zone_name,
                count: candidates.len(),
            }
        );

        let zone_id = candidates[0].id.clone();
        tracing::debug!(zone = zone_name, zone_id = zone_id.as_str(), "Resolved zone");
        self.zone_ids.insert(zone_name.to_string(), zone_id.clone());
        Ok(zone_id)
    }
}
