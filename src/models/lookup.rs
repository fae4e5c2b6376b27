//! Lookup request, result and state models

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Place;
use crate::error::{ErrorKind, LookupError};

/// A trimmed, non-empty place query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupQuery(String);

impl LookupQuery {
    /// Trim the raw input and reject it when nothing is left
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::validation("Location cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LookupQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A distance in kilometers together with its two-decimal rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedDistance {
    pub kilometers: f64,
    pub text: String,
}

impl FormattedDistance {
    #[must_use]
    pub fn from_km(kilometers: f64) -> Self {
        Self {
            kilometers,
            text: format!("{kilometers:.2} km"),
        }
    }
}

impl Display for FormattedDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Successful lookup: the matched place and how far it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub place: Place,
    pub distance: FormattedDistance,
}

/// UI-facing lookup state: `Idle -> Loading -> {Success, Error}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    Idle,
    Loading {
        query: String,
        started_at: DateTime<Utc>,
    },
    Success {
        query: String,
        place: Place,
        distance: FormattedDistance,
        message: String,
        completed_at: DateTime<Utc>,
    },
    Error {
        query: String,
        kind: ErrorKind,
        message: String,
        completed_at: DateTime<Utc>,
    },
}

impl LookupState {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, LookupState::Success { .. } | LookupState::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use rstest::rstest;

    #[rstest]
    #[case("Roma", "Roma")]
    #[case("  Milano \n", "Milano")]
    #[case("\tNew York\t", "New York")]
    fn test_query_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(LookupQuery::parse(raw).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn test_blank_query_is_rejected(#[case] raw: &str) {
        let err = LookupQuery::parse(raw).unwrap_err();
        assert!(matches!(err, LookupError::Validation { .. }));
    }

    #[rstest]
    #[case(0.0, "0.00 km")]
    #[case(10_007.543_398, "10007.54 km")]
    #[case(12.346, "12.35 km")]
    fn test_distance_formatting(#[case] km: f64, #[case] expected: &str) {
        let formatted = FormattedDistance::from_km(km);
        assert_eq!(formatted.to_string(), expected);
        assert_eq!(formatted.kilometers, km);
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(LookupState::Idle).unwrap();
        assert_eq!(json["state"], "idle");

        let success = LookupState::Success {
            query: "Roma".to_string(),
            place: Place::new(Coordinate::new(41.9, 12.5).unwrap(), None),
            distance: FormattedDistance::from_km(16.5),
            message: "close".to_string(),
            completed_at: Utc::now(),
        };
        let json = serde_json::to_value(&success).unwrap();
        assert_eq!(json["state"], "success");
        assert_eq!(json["distance"]["text"], "16.50 km");
        assert!(success.is_settled());
    }
}
