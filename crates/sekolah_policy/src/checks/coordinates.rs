//! Coordinate checks.

use sekolah_data::{Record, Table};

use super::{names, NO_DATA_ROWS, SAMPLE_LIMIT};
use crate::outcome::{exceeds, percent, ValidationOutcome};
use crate::policy::DataPolicy;

/// Coordinates in the leading sample must parse as numbers when present.
pub fn coordinates_numeric(table: &Table, policy: &DataPolicy) -> ValidationOutcome {
    if table.is_empty() {
        return ValidationOutcome::skip(names::COORDINATES_NUMERIC, NO_DATA_ROWS);
    }

    let coords = &policy.coordinates;
    let sample = &table.records()[..table.len().min(coords.sample_size)];

    let offenders: Vec<String> = sample
        .iter()
        .flat_map(|record| {
            [&coords.lat_column, &coords.lon_column].map(move |col| (col, record.trimmed(col)))
        })
        .filter(|(_, raw)| !raw.is_empty() && raw.parse::<f64>().is_err())
        .map(|(col, raw)| format!("{} '{}' should be numeric", col, raw))
        .collect();

    match offenders.first() {
        None => ValidationOutcome::pass(names::COORDINATES_NUMERIC).with_metric("sampled", sample.len()),
        Some(first) => {
            let message = if offenders.len() == 1 {
                first.clone()
            } else {
                format!("{} (and {} more)", first, offenders.len() - 1)
            };
            ValidationOutcome::fail(names::COORDINATES_NUMERIC, message)
                .with_metric("sampled", sample.len())
                .with_metric("non_numeric", offenders.len())
        }
    }
}

#[derive(Debug, Default)]
struct BoundsTally {
    present: usize,
    violations: usize,
    samples: Vec<String>,
}

impl BoundsTally {
    fn observe(mut self, record: &Record, policy: &DataPolicy) -> Self {
        let lat_raw = record.trimmed(&policy.coordinates.lat_column);
        let lon_raw = record.trimmed(&policy.coordinates.lon_column);
        if lat_raw.is_empty() || lon_raw.is_empty() {
            return self;
        }
        self.present += 1;

        // Unparseable pairs are the numeric check's concern.
        let (Ok(lat), Ok(lon)) = (lat_raw.parse::<f64>(), lon_raw.parse::<f64>()) else {
            return self;
        };

        if !policy.bounds.contains(lat, lon) {
            self.violations += 1;
            if self.samples.len() < SAMPLE_LIMIT {
                self.samples.push(format!("({}, {})", lat, lon));
            }
        }
        self
    }
}

/// Share of out-of-bounds coordinate pairs must stay within tolerance.
pub fn coordinates_within_bounds(table: &Table, policy: &DataPolicy) -> ValidationOutcome {
    if table.is_empty() {
        return ValidationOutcome::skip(names::COORDINATES_IN_BOUNDS, NO_DATA_ROWS);
    }

    let tally = table
        .records()
        .iter()
        .fold(BoundsTally::default(), |tally, record| tally.observe(record, policy));

    let ok = !exceeds(tally.violations, tally.present, policy.tolerances.out_of_bounds);
    let mut message = format!(
        "{}/{} coordinates out of bounds ({:.2}%)",
        tally.violations,
        tally.present,
        percent(tally.violations, tally.present)
    );
    if !ok {
        message = format!("Too many invalid coordinates: {}. Sample: {}", message, tally.samples.join(", "));
    }

    ValidationOutcome::gate(names::COORDINATES_IN_BOUNDS, ok, message)
        .with_metric("violations", tally.violations)
        .with_metric("with_coordinates", tally.present)
}
