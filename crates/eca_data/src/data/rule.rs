//! Wolfram rule numbers.

use crate::error::{EcaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of distinct 3-cell neighbourhoods.
pub const NEIGHBORHOODS: usize = 8;

/// Encodes a neighbourhood as `4·left + 2·center + right`.
#[inline]
#[must_use]
pub fn neighborhood_index(left: bool, center: bool, right: bool) -> u8 {
    (left as u8) << 2 | (center as u8) << 1 | (right as u8)
}

/// An elementary cellular automaton rule.
///
/// Bit `i` of the rule number is the next state of a cell whose neighbourhood
/// encodes to `i`, so bit 0 answers `000` and bit 7 answers `111`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rule(u8);

impl Rule {
    /// Rule 30: chaotic, used as a pseudo-random generator.
    pub const RULE_30: Rule = Rule(30);
    /// Rule 90: Sierpinski triangle.
    pub const RULE_90: Rule = Rule(90);
    /// Rule 110: localized structures, Turing complete.
    pub const RULE_110: Rule = Rule(110);
    /// Rule 184: traffic flow.
    pub const RULE_184: Rule = Rule(184);
    /// Rule 250: periodic growth.
    pub const RULE_250: Rule = Rule(250);

    /// Validates a rule number.
    pub fn new(number: i64) -> Result<Self> {
        u8::try_from(number)
            .map(Rule)
            .map_err(|_| EcaError::InvalidRule { rule: number })
    }

    /// Returns the rule number.
    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Next state for an encoded neighbourhood (`pattern` in `0..8`).
    #[inline]
    #[must_use]
    pub fn output(self, pattern: u8) -> bool {
        debug_assert!((pattern as usize) < NEIGHBORHOODS);
        (self.0 >> pattern) & 1 == 1
    }

    /// Next state for an explicit neighbourhood.
    #[inline]
    #[must_use]
    pub fn apply(self, left: bool, center: bool, right: bool) -> bool {
        self.output(neighborhood_index(left, center, right))
    }

    /// Full lookup table, indexed by encoded neighbourhood.
    #[must_use]
    pub fn table(self) -> [bool; NEIGHBORHOODS] {
        let mut table = [false; NEIGHBORHOODS];
        for (pattern, out) in table.iter_mut().enumerate() {
            *out = self.output(pattern as u8);
        }
        table
    }

    /// Neighbourhoods whose next state is 1, ascending.
    #[must_use]
    pub fn active_patterns(self) -> Vec<u8> {
        (0..NEIGHBORHOODS as u8).filter(|&p| self.output(p)).collect()
    }
}

impl From<u8> for Rule {
    fn from(number: u8) -> Self {
        Rule(number)
    }
}

impl From<Rule> for u8 {
    fn from(rule: Rule) -> Self {
        rule.0
    }
}

impl TryFrom<i64> for Rule {
    type Error = EcaError;

    fn try_from(number: i64) -> Result<Self> {
        Rule::new(number)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule {}", self.0)
    }
}

/// Formats an encoded neighbourhood as three binary digits, left first.
#[must_use]
pub fn pattern_label(pattern: u8) -> String {
    format!("{:03b}", pattern & 0b111)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_bounds() {
        assert!(Rule::new(0).is_ok());
        assert!(Rule::new(255).is_ok());
        assert_eq!(Rule::new(256), Err(EcaError::InvalidRule { rule: 256 }));
        assert_eq!(Rule::new(-1), Err(EcaError::InvalidRule { rule: -1 }));
    }

    #[test]
    fn test_rule_30_table() {
        let rule = Rule::RULE_30;
        // 111 110 101 100 011 010 001 000 -> 0 0 0 1 1 1 1 0
        assert!(!rule.apply(true, true, true));
        assert!(!rule.apply(true, true, false));
        assert!(!rule.apply(true, false, true));
        assert!(rule.apply(true, false, false));
        assert!(rule.apply(false, true, true));
        assert!(rule.apply(false, true, false));
        assert!(rule.apply(false, false, true));
        assert!(!rule.apply(false, false, false));
        assert_eq!(rule.active_patterns(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_neighborhood_index() {
        assert_eq!(neighborhood_index(false, false, false), 0);
        assert_eq!(neighborhood_index(true, false, false), 4);
        assert_eq!(neighborhood_index(false, true, false), 2);
        assert_eq!(neighborhood_index(true, true, true), 7);
    }

    #[test]
    fn test_extreme_rules() {
        assert_eq!(Rule::from(0).table(), [false; NEIGHBORHOODS]);
        assert_eq!(Rule::from(255).table(), [true; NEIGHBORHOODS]);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let rule: Rule = serde_json::from_str("110").unwrap();
        assert_eq!(rule, Rule::RULE_110);
        assert!(serde_json::from_str::<Rule>("300").is_err());
        assert_eq!(serde_json::to_string(&Rule::RULE_90).unwrap(), "90");
    }

    #[test]
    fn test_pattern_label() {
        assert_eq!(pattern_label(0), "000");
        assert_eq!(pattern_label(4), "100");
        assert_eq!(pattern_label(6), "110");
    }
}
