//! Types that can be used in other crates

use serde::{Deserialize, Serialize};

/// Amount expressed in the currency's minor unit (cents).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// New amount from a minor-unit count.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw minor-unit count.
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// Major-unit string with exactly two decimals, the form the gateway's
    /// amount fields expect (`1000` becomes `"10.00"`).
    pub fn to_major_string(self) -> String {
        format!("{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_string_has_two_decimals() {
        assert_eq!(MinorUnit::new(1000).to_major_string(), "10.00");
        assert_eq!(MinorUnit::new(2550).to_major_string(), "25.50");
        assert_eq!(MinorUnit::new(5).to_major_string(), "0.05");
        assert_eq!(MinorUnit::new(0).to_major_string(), "0.00");
    }
}
