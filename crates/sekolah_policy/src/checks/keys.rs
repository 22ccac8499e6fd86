//! Primary key (NPSN) checks.

use std::collections::HashSet;

use sekolah_data::Table;

use super::{names, NO_DATA_ROWS, SAMPLE_LIMIT};
use crate::error::PolicyResult;
use crate::outcome::{exceeds, percent, ValidationOutcome};
use crate::policy::DataPolicy;

#[derive(Debug, Default)]
struct KeyTally<'a> {
    occurrences: usize,
    seen: HashSet<&'a str>,
    samples: Vec<&'a str>,
}

impl KeyTally<'_> {
    fn duplicates(&self) -> usize {
        self.occurrences - self.seen.len()
    }
}

/// Share of duplicated non-empty keys must stay within tolerance.
pub fn keys_unique(table: &Table, policy: &DataPolicy) -> ValidationOutcome {
    if table.is_empty() {
        return ValidationOutcome::skip(names::KEYS_UNIQUE, NO_DATA_ROWS);
    }

    let tally = table
        .records()
        .iter()
        .map(|record| record.trimmed(&policy.key_column))
        .filter(|key| !key.is_empty())
        .fold(KeyTally::default(), |mut tally, key| {
            tally.occurrences += 1;
            if !tally.seen.insert(key) && tally.samples.len() < SAMPLE_LIMIT {
                tally.samples.push(key);
            }
            tally
        });

    let duplicates = tally.duplicates();
    let ok = !exceeds(duplicates, tally.occurrences, policy.tolerances.duplicate_keys);
    let mut message = format!(
        "Found {} duplicate {} values ({:.2}% of total)",
        duplicates,
        policy.key_column,
        percent(duplicates, tally.occurrences)
    );
    if !tally.samples.is_empty() {
        message.push_str(&format!(". Sample: {}", tally.samples.join(", ")));
    }

    ValidationOutcome::gate(names::KEYS_UNIQUE, ok, message)
        .with_metric("duplicates", duplicates)
        .with_metric("occurrences", tally.occurrences)
}

/// Share of non-empty keys not matching the key pattern must stay within
/// tolerance. The denominator is every record, blank keys included.
pub fn keys_well_formed(table: &Table, policy: &DataPolicy) -> PolicyResult<ValidationOutcome> {
    if table.is_empty() {
        return Ok(ValidationOutcome::skip(names::KEYS_NUMERIC, NO_DATA_ROWS));
    }

    let pattern = policy.key_regex()?;
    let malformed: Vec<&str> = table
        .records()
        .iter()
        .map(|record| record.trimmed(&policy.key_column))
        .filter(|key| !key.is_empty() && !pattern.is_match(key))
        .collect();

    let total = table.len();
    let ok = !exceeds(malformed.len(), total, policy.tolerances.malformed_keys);
    let mut message = format!(
        "Found {} non-numeric {} values ({:.2}% of total)",
        malformed.len(),
        policy.key_column,
        percent(malformed.len(), total)
    );
    if !malformed.is_empty() {
        let sample: Vec<&str> = malformed.iter().take(SAMPLE_LIMIT).copied().collect();
        message.push_str(&format!(". Sample: {}", sample.join(", ")));
    }

    Ok(ValidationOutcome::gate(names::KEYS_NUMERIC, ok, message)
        .with_metric("malformed", malformed.len())
        .with_metric("records", total))
}
