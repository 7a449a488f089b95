use crate::common::{Page, Provider, RecordSet, RecordSetCursor, Result, Zone, ZoneCursor};

/// Follows cursors until the listing is no longer truncated.
///
/// Pages are concatenated in the order they are returned. Any failure fails
/// the whole fetch; nothing collected so far is returned.
pub fn fetch_all<T, C, F>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<&C>) -> Result<Page<T, C>>,
{
    let mut items: Vec<T> = Vec::new();
    let mut cursor: Option<C> = None;
    let mut pages = 0;
    loop {
        let mut page = fetch_page(cursor.as_ref())?;
        pages += 1;
        items.append(&mut page.items);

        match page.next {
            Some(next) => cursor = Some(next),
            None => {
                tracing::debug!(pages, items = items.len(), "Listing completed");
                return Ok(items);
            }
        }
    }
}

pub fn list_all_zones<P: Provider + ?Sized>(provider: &P) -> Result<Vec<Zone>> {
    fetch_all(|cursor: Option<&ZoneCursor>| provider.list_zones(cursor))
}

pub fn list_all_record_sets<P: Provider + ?Sized>(
    provider: &P,
    zone_id: &str,
) -> Result<Vec<RecordSet>> {
    fetch_all(|cursor: Option<&RecordSetCursor>| {
        tracing::debug!(zone_id, cursor = ?cursor, "Listing record sets");
        provider.list_record_sets(zone_id, cursor)
    })
}
