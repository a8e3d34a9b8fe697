use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Signed amount in whole currency units (dollars, euros, ...).
///
/// Ledger transactions carry integer milliunits; labels carry decimal units.
/// Comparison is numeric, so `-74.97` and `-74.970` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn from_milliunits(milliunits: i64) -> Self {
        Money(Decimal::new(milliunits, 3))
    }
}
