//! Consent type catalog
//!
//! Closed set of consent categories recorded against a user. The
//! privacy consent is required for service use; analytics consent is
//! optional. Consent records themselves live with an external
//! collaborator; this crate only defines the value type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCodeError;

/// Category of a recorded user consent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentType {
    /// Collection and use of personal information
    Privacy,
    /// Use of data for analytics and research
    Analytics,
}

impl ConsentType {
    /// Every consent category
    pub const ALL: [ConsentType; 2] = [ConsentType::Privacy, ConsentType::Analytics];

    /// Stable wire code for this consent category
    pub fn code(&self) -> &'static str {
        match self {
            ConsentType::Privacy => "PRIVACY",
            ConsentType::Analytics => "ANALYTICS",
        }
    }

    /// Fixed human-readable description for this consent category
    pub fn description(&self) -> &'static str {
        match self {
            ConsentType::Privacy => "Collection and use of personal information",
            ConsentType::Analytics => "Use of data for analytics and research",
        }
    }

    /// Whether this consent is required to use the service
    pub fn required(&self) -> bool {
        matches!(self, ConsentType::Privacy)
    }
}

impl std::fmt::Display for ConsentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ConsentType {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConsentType::ALL
            .into_iter()
            .find(|consent| consent.code() == s)
            .ok_or_else(|| UnknownCodeError {
                kind: "consent type",
                code: s.to_string(),
            })
    }
}
