use std::io::{BufRead, Write};

use snafu::ResultExt;

use crate::common::{
    ChangeBatch, DesiredRecord, DiffResult, InterruptedSnafu, OutputSnafu, PromptSnafu, Provider,
    Result,
};

const PROMPT: &str = "Create? (y/n) > ";
const REPROMPT: &str = "Please enter \"y\" or \"n\" or quit with Ctrl-C";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Awaiting,
    Create,
    Skip,
}

impl Confirmation {
    /// Feeds one line of operator input. Only "y" and "n" leave `Awaiting`.
    pub fn next(self, answer: &str) -> Self {
        match (self, answer.trim()) {
            (Confirmation::Awaiting, "y") => Confirmation::Create,
            (Confirmation::Awaiting, "n") => Confirmation::Skip,
            (state, _) => state,
        }
    }
}

/// Blocks until the operator answers "y" or "n". Closed input aborts.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Confirmation> {
    let mut state = Confirmation::Awaiting;
    loop {
        write!(output, "{PROMPT}").context(OutputSnafu)?;
        output.flush().context(OutputSnafu)?;

        let mut line = String::new();
        if input.read_line(&mut line).context(PromptSnafu)? == 0 {
            writeln!(output).context(OutputSnafu)?;
            return InterruptedSnafu.fail();
        }

        state = state.next(&line);
        if state != Confirmation::Awaiting {
            return Ok(state);
        }
        writeln!(output, "{REPROMPT}").context(OutputSnafu)?;
    }
}

/// Offers each desired-only record for creation, one at a time.
///
/// Observed-only records are left alone. The first failed creation aborts
/// the run; records already created stay in place.
pub fn reconcile<P, R, W>(
    provider: &P,
    zone_id: &str,
    diff: &DiffResult<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<DesiredRecord>>
where
    P: Provider + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut created = Vec::new();
    for &record in diff.desired_only.iter() {
        writeln!(output).context(OutputSnafu)?;
        writeln!(output, "{record}").context(OutputSnafu)?;

        match confirm(input, output)? {
            Confirmation::Create => {
                let batch = ChangeBatch::create(record.clone(), chrono::Utc::now())?;
                writeln!(output, "Creating {record}").context(OutputSnafu)?;
                tracing::info!(
                    zone_id,
                    name = record.name.as_str(),
                    kind = record.kind.as_str(),
                    comment = batch.comment.as_str(),
                    "Creating record",
                );
                provider.create_record_set(zone_id, &batch)?;
                created.push(batch.record);
            }
            _ => {
                tracing::debug!(
                    name = record.name.as_str(),
                    kind = record.kind.as_str(),
                    "Skipped record",
                );
            }
        }
    }

    Ok(created)
}
