//! Per-instrument metric records.

use super::field::{FIELD_COUNT, FieldId};

/// A metric reading; `None` means the value is absent or unparseable.
pub type MetricValue = Option<f64>;

/// All metric values for one instrument. Total over every [`FieldId`]:
/// fields missing from the dataset are simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub symbol: Option<String>,
    values: [MetricValue; FIELD_COUNT],
}

impl Record {
    pub fn new(symbol: Option<String>) -> Self {
        Self {
            symbol,
            values: [None; FIELD_COUNT],
        }
    }

    pub fn with_symbol(symbol: &str) -> Self {
        Self::new(Some(symbol.to_string()))
    }

    pub fn get(&self, field: FieldId) -> MetricValue {
        self.values[field.index()]
    }

    /// Store a value. NaN is normalised to absent.
    pub fn set(&mut self, field: FieldId, value: MetricValue) {
        self.values[field.index()] = value.filter(|v| !v.is_nan());
    }

    pub fn with(mut self, field: FieldId, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Iterate `(field, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, MetricValue)> + '_ {
        FieldId::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}
