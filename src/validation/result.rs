// Tue Jan 13 2026 - Alex

use std::fmt;

/// Verdict of one field validator over one byte window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub reason: &'static str,
    pub confidence: i32,
}

impl ValidationResult {
    pub const fn valid(reason: &'static str, confidence: i32) -> Self {
        Self {
            is_valid: true,
            reason,
            confidence,
        }
    }

    pub const fn invalid(reason: &'static str, confidence: i32) -> Self {
        Self {
            is_valid: false,
            reason,
            confidence,
        }
    }

    /// Valid and strong enough to count as passing during a scan.
    pub fn is_passing(&self, threshold: i32) -> bool {
        self.is_valid && self.confidence >= threshold
    }

    /// Invalid with confidence below `threshold`.
    pub fn is_vetoed_below(&self, threshold: i32) -> bool {
        !self.is_valid && self.confidence < threshold
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.reason, self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates() {
        let weak = ValidationResult::invalid("bad", 20);
        assert!(weak.is_vetoed_below(30));
        assert!(!weak.is_passing(50));

        let strong = ValidationResult::valid("good", 90);
        assert!(strong.is_passing(50));
        assert!(!strong.is_vetoed_below(50));

        let low_valid = ValidationResult::valid("meh", 20);
        assert!(!low_valid.is_vetoed_below(50));
        assert!(!low_valid.is_passing(50));
    }
}
