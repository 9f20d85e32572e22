//! Peer medians across the loaded dataset.

use super::field::{FIELD_COUNT, FieldId};
use super::record::{MetricValue, Record};

/// Median of the non-NaN values. Even counts average the two middle values;
/// an empty input has no median.
pub fn median<I>(values: I) -> MetricValue
where
    I: IntoIterator<Item = f64>,
{
    let mut clean: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if clean.is_empty() {
        return None;
    }
    clean.sort_by(f64::total_cmp);

    let mid = clean.len() / 2;
    if clean.len() % 2 == 0 {
        Some((clean[mid - 1] + clean[mid]) / 2.0)
    } else {
        Some(clean[mid])
    }
}

/// One median per field, computed once per batch. There are no mutators:
/// the statistics are fixed from construction on.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerStatistics {
    medians: [MetricValue; FIELD_COUNT],
}

impl PeerStatistics {
    pub fn compute(records: &[Record]) -> Self {
        let mut medians = [None; FIELD_COUNT];
        for field in FieldId::ALL {
            medians[field.index()] = median(records.iter().filter_map(|r| r.get(field)));
        }
        Self { medians }
    }

    pub fn median(&self, field: FieldId) -> MetricValue {
        self.medians[field.index()]
    }

    /// Fields that have a median at all.
    pub fn resolved_count(&self) -> usize {
        self.medians.iter().filter(|m| m.is_some()).count()
    }
}
