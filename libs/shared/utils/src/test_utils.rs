use chrono::{DateTime, Duration, Offset, Utc};
use serde_json::{json, Value};

use shared_config::{AppConfig, TimeWindowConfig};

pub struct TestConfig {
    pub healthie_api_url: String,
    pub healthie_api_key: String,
    pub use_test_mode: bool,
    pub hours_to_check: u32,
    pub test_time: DateTime<Utc>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            healthie_api_url: "http://localhost:4000/graphql".to_string(),
            healthie_api_key: "test-api-key".to_string(),
            use_test_mode: true,
            hours_to_check: 1,
            test_time: fixed_now(),
        }
    }
}

impl TestConfig {
    /// Config pointed at a mock server, e.g. `wiremock::MockServer::uri()`.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            healthie_api_url: url.into(),
            ..Self::default()
        }
    }

    pub fn time_window(&self) -> TimeWindowConfig {
        TimeWindowConfig {
            use_test_mode: self.use_test_mode,
            hours_to_check: self.hours_to_check,
            test_time: self.test_time,
            display_offset: Some(Utc.fix()),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            healthie_api_url: self.healthie_api_url.clone(),
            healthie_api_key: self.healthie_api_key.clone(),
            time_window: self.time_window(),
        }
    }
}

/// Fixed instant used as "now" across tests: 2025-04-24T17:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-04-24T17:00:00Z")
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// `fixed_now()` shifted by `minutes`, as an RFC 3339 string.
pub fn minutes_from_now(minutes: i64) -> String {
    (fixed_now() + Duration::minutes(minutes)).to_rfc3339()
}

pub struct MockHealthieResponses;

impl MockHealthieResponses {
    pub fn current_user_response(user_id: &str) -> Value {
        json!({
            "data": {
                "currentUser": {
                    "id": user_id,
                    "first_name": "Notify",
                    "last_name": "Bot"
                }
            }
        })
    }

    pub fn provider(id: &str, doc_share_id: Option<&str>) -> Value {
        json!({
            "id": id,
            "first_name": "Gregory",
            "last_name": "House",
            "doc_share_id": doc_share_id
        })
    }

    pub fn appointment(id: &str, date: &str, provider: Value) -> Value {
        json!({
            "id": id,
            "date": date,
            "location": "Room 4",
            "provider": provider
        })
    }

    pub fn user(
        id: &str,
        has_completed_intake_forms: Option<bool>,
        next_app: Option<Value>,
        appointments: Vec<Value>,
    ) -> Value {
        json!({
            "id": id,
            "first_name": "Pat",
            "last_name": format!("Patient-{}", id),
            "has_completed_intake_forms": has_completed_intake_forms,
            "next_app": next_app,
            "appointments": appointments
        })
    }

    pub fn users_response(users: Vec<Value>) -> Value {
        json!({ "data": { "users": users } })
    }

    pub fn conversation_created(conversation_id: &str) -> Value {
        json!({
            "data": {
                "createConversation": {
                    "conversation": { "id": conversation_id },
                    "messages": []
                }
            }
        })
    }

    pub fn conversation_rejected(field: &str, message: &str) -> Value {
        json!({
            "data": {
                "createConversation": {
                    "conversation": null,
                    "messages": [{ "field": field, "message": message }]
                }
            }
        })
    }

    pub fn note_created(note_id: &str, user_id: &str) -> Value {
        json!({
            "data": {
                "createNote": {
                    "note": { "id": note_id, "content": "reminder", "user_id": user_id },
                    "messages": []
                }
            }
        })
    }

    pub fn note_rejected(field: &str, message: &str) -> Value {
        json!({
            "data": {
                "createNote": {
                    "note": null,
                    "messages": [{ "field": field, "message": message }]
                }
            }
        })
    }

    pub fn error_response(messages: &[&str]) -> Value {
        let errors: Vec<Value> = messages.iter().map(|m| json!({ "message": m })).collect();
        json!({ "data": null, "errors": errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_url("http://127.0.0.1:9999").to_app_config();

        assert_eq!(config.healthie_api_url, "http://127.0.0.1:9999");
        assert_eq!(config.healthie_api_key, "test-api-key");
        assert!(config.is_configured());
        assert_eq!(config.time_window.test_time, fixed_now());
    }

    #[test]
    fn test_minutes_from_now_is_rfc3339() {
        let parsed = DateTime::parse_from_rfc3339(&minutes_from_now(30)).unwrap();
        assert_eq!(parsed, fixed_now() + Duration::minutes(30));
    }

    #[test]
    fn test_user_fixture_shape() {
        let user = MockHealthieResponses::user("7", Some(false), None, vec![]);
        assert_eq!(user["has_completed_intake_forms"], json!(false));
        assert!(user["next_app"].is_null());
    }
}
