//! Domain entities. Pure data structures for the prediction catalog.
//!
//! No IO types here; adapters deserialize into these. All entities are
//! read-only reference data; nothing mutates them after load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked public figure whose predictions are catalogued and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub profile_link: String,
    pub avatar: String,
    /// Fraction in [0, 1] of resolved predictions that were fulfilled.
    pub accuracy: f64,
    /// Editorial score, independent of accuracy.
    pub rating: f64,
    pub total_predictions: u32,
    pub fulfilled_predictions: u32,
    pub failed_predictions: u32,
}

impl Expert {
    /// Predictions still waiting for their target date.
    pub fn pending_predictions(&self) -> u32 {
        self.total_predictions
            .saturating_sub(self.fulfilled_predictions)
            .saturating_sub(self.failed_predictions)
    }

    pub fn accuracy_tier(&self) -> Tier {
        Tier::from_ratio(self.accuracy)
    }

    /// Accuracy as a whole percentage, rounded half away from zero.
    pub fn accuracy_percent(&self) -> u32 {
        percent(self.accuracy)
    }
}

/// A categorical tag predictions are grouped under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    /// Display glyph (usually an emoji).
    pub icon: String,
    pub predictions_count: u32,
    pub success_rate: f64,
}

impl Topic {
    pub fn success_tier(&self) -> Tier {
        Tier::from_ratio(self.success_rate)
    }

    pub fn success_percent(&self) -> u32 {
        percent(self.success_rate)
    }
}

/// A single forecast extracted from a source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: String,
    /// Embedded copy of the owning expert (denormalized).
    pub expert: Expert,
    /// Embedded copy of the topic (denormalized).
    pub topic: Topic,
    pub original_quote: String,
    pub interpretation: String,
    pub status: PredictionStatus,
    pub verification_status: VerificationStatus,
    /// Source video URL. Opaque; only a time offset is ever appended.
    pub source: String,
    #[serde(default)]
    pub source_title: Option<String>,
    /// Offset into the source video, in seconds.
    #[serde(default)]
    pub source_timestamp: Option<u32>,
    pub created_at: NaiveDate,
    pub target_date: NaiveDate,
    pub confidence: Confidence,
    #[serde(default)]
    pub verification: Option<Verification>,
}

impl Prediction {
    /// Verification result, if one has been published.
    /// An empty `actual_result` counts as not yet shown.
    pub fn verification_result(&self) -> Option<&str> {
        self.verification
            .as_ref()
            .map(|v| v.actual_result.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn evidence_link(&self) -> Option<&str> {
        self.verification
            .as_ref()
            .and_then(|v| v.evidence_link.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Outcome record attached to a resolved prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub actual_result: String,
    #[serde(default)]
    pub evidence_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Pending,
    Fulfilled,
    Failed,
}

impl PredictionStatus {
    pub const ALL: [PredictionStatus; 3] = [Self::Pending, Self::Fulfilled, Self::Failed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "fulfilled" => Some(Self::Fulfilled),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Fulfilled => "Came true",
            Self::Failed => "Did not come true",
        }
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// How a prediction's outcome was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    AutoVerified,
    ManualVerified,
    Unverifiable,
}

impl VerificationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::AutoVerified => "Automatic check",
            Self::ManualVerified => "Manual check",
            Self::Unverifiable => "Not verifiable",
        }
    }
}

/// Editorial estimate of how strongly the claim was stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High confidence",
            Self::Medium => "Medium confidence",
            Self::Low => "Low confidence",
        }
    }
}

/// Colour band for accuracy / success ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.7 {
            Tier::High
        } else if ratio >= 0.5 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

fn percent(ratio: f64) -> u32 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_deserializes_camel_case() {
        let json = r#"{
            "id": "p1",
            "expert": {
                "id": "e1", "name": "Anna", "profileLink": "https://yt/@anna",
                "avatar": "a.png", "accuracy": 0.75, "rating": 4.5,
                "totalPredictions": 10, "fulfilledPredictions": 6, "failedPredictions": 2
            },
            "topic": { "id": "t1", "name": "Economy", "icon": "💰", "predictionsCount": 3, "successRate": 0.5 },
            "originalQuote": "The rate will drop",
            "interpretation": "Key rate below 10% by June",
            "status": "fulfilled",
            "verificationStatus": "manual_verified",
            "source": "https://youtube.com/watch?v=abc",
            "sourceTimestamp": 95,
            "createdAt": "2024-01-15",
            "targetDate": "2024-06-30",
            "confidence": "high",
            "verification": { "actualResult": "Dropped to 9.5%", "evidenceLink": "https://cbr.ru" }
        }"#;

        let p: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, PredictionStatus::Fulfilled);
        assert_eq!(p.verification_status, VerificationStatus::ManualVerified);
        assert_eq!(p.source_timestamp, Some(95));
        assert_eq!(p.source_title, None);
        assert_eq!(p.verification_result(), Some("Dropped to 9.5%"));
        assert_eq!(p.evidence_link(), Some("https://cbr.ru"));
        assert_eq!(p.expert.pending_predictions(), 2);
        assert_eq!(p.created_at, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Tier::from_ratio(0.7), Tier::High);
        assert_eq!(Tier::from_ratio(0.69), Tier::Medium);
        assert_eq!(Tier::from_ratio(0.5), Tier::Medium);
        assert_eq!(Tier::from_ratio(0.49), Tier::Low);
    }

    #[test]
    fn test_status_parse_roundtrip_names() {
        for s in PredictionStatus::ALL {
            assert_eq!(PredictionStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(PredictionStatus::parse("all"), None);
        assert_eq!(Confidence::parse("medium"), Some(Confidence::Medium));
    }
}
