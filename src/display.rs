//! Plain-text tables and reports written to the terminal.

use std::io::{self, Write};

use crate::common::{DiffResult, RecordSet, Zone};

pub fn write_zone_table<W: Write>(out: &mut W, zones: &[Zone]) -> io::Result<()> {
    writeln!(out, "{:35} {:>5} {:27} {}", "name", "count", "id", "comment")?;
    writeln!(
        out,
        "{} {} {} {}",
        "-".repeat(35),
        "-".repeat(5),
        "-".repeat(27),
        "-".repeat(33)
    )?;
    for zone in zones {
        writeln!(
            out,
            "{:35} {:5} {:27} {}",
            zone.name,
            zone.record_set_count,
            zone.id,
            zone.comment.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn write_record_set_table<W: Write>(out: &mut W, record_sets: &[RecordSet]) -> io::Result<()> {
    writeln!(out, "{:35} {:5} {:>6} {}", "Name", "Type", "TTL", "Info")?;
    writeln!(
        out,
        "{} {} {} {}",
        "-".repeat(35),
        "-".repeat(5),
        "-".repeat(6),
        "-".repeat(54)
    )?;
    for record in record_sets {
        let ttl = record
            .ttl
            .map(|ttl| ttl.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:35} {:5} {:>6} {}",
            record.name,
            record.kind.as_str(),
            ttl,
            record.data
        )?;
    }
    Ok(())
}

pub fn write_diff<W: Write>(out: &mut W, diff: &DiffResult<'_>) -> io::Result<()> {
    for record in diff.desired_only.iter() {
        writeln!(out, "New record in file: {record}")?;
    }
    for record in diff.observed_only.iter() {
        writeln!(out, "Record not in file: {record}")?;
    }
    Ok(())
}
