use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A ranked match produced by the upstream function
///
/// Only `matched_user_id` is interpreted here. Score, rationale and profile
/// fields are kept verbatim in `details` so the dashboard can render whatever
/// the function returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub matched_user_id: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Match {
    pub fn new(matched_user_id: impl Into<String>) -> Self {
        Self {
            matched_user_id: matched_user_id.into(),
            details: Map::new(),
        }
    }

    /// Look up an opaque field such as `score` or `explanation`
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.details.get(name)
    }
}

/// Visual weight of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Neutral,
    Destructive,
}

/// A toast-style message raised by the match controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn neutral(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Neutral,
            title: title.into(),
            description: None,
        }
    }

    pub fn destructive(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: NotificationKind::Destructive,
            title: title.into(),
            description,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Destructive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_keeps_opaque_fields() {
        let m: Match = serde_json::from_value(json!({
            "matched_user_id": "u1",
            "score": 0.92,
            "explanation": "Both invest in DePIN infrastructure"
        }))
        .unwrap();

        assert_eq!(m.matched_user_id, "u1");
        assert_eq!(m.field("score"), Some(&json!(0.92)));

        let back = serde_json::to_value(&m).unwrap();
        assert_eq!(back["explanation"], "Both invest in DePIN infrastructure");
    }

    #[test]
    fn test_match_requires_user_id() {
        let result: Result<Match, _> = serde_json::from_value(json!({ "score": 1 }));
        assert!(result.is_err());
    }
}
