//! Test builders shared by domain and use-case tests.

use crate::domain::entities::{
    Confidence, Expert, Prediction, PredictionStatus, Topic, Verification, VerificationStatus,
};
use chrono::NaiveDate;

pub fn expert(id: &str, name: &str) -> Expert {
    Expert {
        id: id.to_string(),
        name: name.to_string(),
        profile_link: format!("https://youtube.com/@{}", id),
        avatar: format!("https://img.example/{}.jpg", id),
        accuracy: 0.5,
        rating: 4.0,
        total_predictions: 10,
        fulfilled_predictions: 4,
        failed_predictions: 4,
    }
}

pub fn expert_with_accuracy(id: &str, accuracy: f64) -> Expert {
    Expert {
        accuracy,
        ..expert(id, &format!("Expert {}", id))
    }
}

pub fn topic(id: &str, name: &str) -> Topic {
    Topic {
        id: id.to_string(),
        name: name.to_string(),
        icon: "📊".to_string(),
        predictions_count: 0,
        success_rate: 0.5,
    }
}

pub fn prediction(id: &str, expert: &Expert, topic: &Topic, status: PredictionStatus) -> Prediction {
    let verification = status.is_resolved().then(|| Verification {
        actual_result: format!("Outcome of {}", id),
        evidence_link: Some(format!("https://evidence.example/{}", id)),
    });
    Prediction {
        id: id.to_string(),
        expert: expert.clone(),
        topic: topic.clone(),
        original_quote: format!("Quote {}", id),
        interpretation: format!("Interpretation {}", id),
        status,
        verification_status: VerificationStatus::ManualVerified,
        source: format!("https://youtube.com/watch?v={}", id),
        source_title: Some(format!("Video {}", id)),
        source_timestamp: None,
        created_at: date(2024, 1, 10),
        target_date: date(2024, 12, 31),
        confidence: Confidence::Medium,
        verification,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
