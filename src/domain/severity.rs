use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Model-estimated severity of a skin condition.
///
/// The model is constrained to exactly these three labels; any other string
/// in a reply fails deserialization and with it the whole call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User self-reported severity on a 0-10 scale, recorded with journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SelfSeverity(u8);

impl SelfSeverity {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, AppError> {
        if value > Self::MAX {
            return Err(AppError::invalid_request(
                "severity",
                format!("self-reported severity must be 0-10, got {}", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SelfSeverity {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SelfSeverity::new(value)
    }
}

impl From<SelfSeverity> for u8 {
    fn from(severity: SelfSeverity) -> u8 {
        severity.0
    }
}

impl fmt::Display for SelfSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}
