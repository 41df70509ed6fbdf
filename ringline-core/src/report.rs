//! Report reason catalog
//!
//! Closed set of reason codes for user-submitted reports. Codes are
//! stable on the wire; descriptions are fixed strings resolved by a
//! match-based lookup, so collaborators never carry free-form text.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCodeError;

/// Classification code for a user-submitted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportReason {
    /// Spam or unsolicited advertising
    Spam,
    /// Abusive or insulting language
    AbusiveLanguage,
    /// Sexual harassment or explicit content
    SexualContent,
    /// Hate speech or discrimination
    HateSpeech,
    /// Threats or intimidation
    Threat,
    /// Pretending to be someone else
    Impersonation,
    /// Anything the other codes do not cover
    Other,
}

impl ReportReason {
    /// Every reason in the catalog
    pub const ALL: [ReportReason; 7] = [
        ReportReason::Spam,
        ReportReason::AbusiveLanguage,
        ReportReason::SexualContent,
        ReportReason::HateSpeech,
        ReportReason::Threat,
        ReportReason::Impersonation,
        ReportReason::Other,
    ];

    /// Stable wire code for this reason
    pub fn code(&self) -> &'static str {
        match self {
            ReportReason::Spam => "SPAM",
            ReportReason::AbusiveLanguage => "ABUSIVE_LANGUAGE",
            ReportReason::SexualContent => "SEXUAL_CONTENT",
            ReportReason::HateSpeech => "HATE_SPEECH",
            ReportReason::Threat => "THREAT",
            ReportReason::Impersonation => "IMPERSONATION",
            ReportReason::Other => "OTHER",
        }
    }

    /// Fixed human-readable description for this reason
    pub fn description(&self) -> &'static str {
        match self {
            ReportReason::Spam => "Spam or unsolicited advertising",
            ReportReason::AbusiveLanguage => "Abusive or insulting language",
            ReportReason::SexualContent => "Sexual harassment or explicit content",
            ReportReason::HateSpeech => "Hate speech or discrimination",
            ReportReason::Threat => "Threats or intimidation",
            ReportReason::Impersonation => "Impersonation of another person",
            ReportReason::Other => "Other reason",
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReportReason {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportReason::ALL
            .into_iter()
            .find(|reason| reason.code() == s)
            .ok_or_else(|| UnknownCodeError {
                kind: "report reason",
                code: s.to_string(),
            })
    }
}
