// Tue Jan 13 2026 - Alex

use std::fmt;

/// Integer mean of field confidences, truncating toward zero. Zero fields score 0.
pub fn mean_confidence(scores: &[i32]) -> i32 {
    if scores.is_empty() {
        return 0;
    }
    let total: i64 = scores.iter().map(|&s| s as i64).sum();
    (total / scores.len() as i64) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const HIGH: i32 = 80;
    pub const MEDIUM: i32 = 60;

    pub fn from_score(score: i32) -> Self {
        if score >= Self::HIGH {
            ConfidenceLevel::High
        } else if score >= Self::MEDIUM {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
