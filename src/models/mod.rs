pub mod names;
pub mod patient;
pub mod treatment;

use serde::{Deserialize, Serialize};

pub use names::NamePool;
pub use patient::Patient;
pub use treatment::{active_on, Treatment};

/// Subjective well-being on an ordinal 1..=5 scale.
///
/// Every constructor and update clamps, so a value outside the scale can
/// never be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct WellBeing(u8);

impl WellBeing {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn shifted(self, delta: i32) -> Self {
        Self::new(i64::from(self.0) + i64::from(delta))
    }
}

impl From<i64> for WellBeing {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<WellBeing> for u8 {
    fn from(well_being: WellBeing) -> Self {
        well_being.0
    }
}

impl std::fmt::Display for WellBeing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_always_stays_on_scale() {
        for start in 1..=5 {
            for delta in -10..=10 {
                let shifted = WellBeing::new(start).shifted(delta);
                assert!((WellBeing::MIN..=WellBeing::MAX).contains(&shifted.value()));
                assert_eq!(i64::from(shifted.value()), (start + i64::from(delta)).clamp(1, 5));
            }
        }
    }

    #[test]
    fn test_extreme_values_clamp() {
        assert_eq!(WellBeing::new(i64::MIN).value(), 1);
        assert_eq!(WellBeing::new(i64::MAX).value(), 5);
        assert_eq!(WellBeing::new(5).shifted(i32::MAX).value(), 5);
        assert_eq!(WellBeing::new(1).shifted(i32::MIN).value(), 1);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&WellBeing::new(3)).unwrap();
        assert_eq!(json, "3");

        let parsed: WellBeing = serde_json::from_str("9").unwrap();
        assert_eq!(parsed.value(), 5);
    }
}
