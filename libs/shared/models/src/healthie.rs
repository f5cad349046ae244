//! Wire shapes of the Healthie GraphQL operations the notifier consumes.
//!
//! Every field the service may omit or null out is optional here; deciding
//! what a missing value means is left to the callers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts an id sent either as a JSON string or a JSON number.
pub fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentUserData {
    #[serde(rename = "currentUser", default)]
    pub current_user: Option<CurrentUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderNode {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "opaque_id")]
    pub doc_share_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentNode {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    /// Raw upstream timestamp; parsed by the collector.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub provider: Option<ProviderNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserNode {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub has_completed_intake_forms: Option<bool>,
    #[serde(default)]
    pub next_app: Option<AppointmentNode>,
    #[serde(default)]
    pub appointments: Option<Vec<Option<AppointmentNode>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersData {
    #[serde(default)]
    pub users: Option<Vec<UserNode>>,
}

/// Validation message returned by Healthie mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMessage {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FieldMessage {
    /// Renders messages as `field: message` pairs joined by `", "`.
    pub fn join(messages: &[FieldMessage]) -> String {
        messages
            .iter()
            .map(|m| {
                format!(
                    "{}: {}",
                    m.field.as_deref().unwrap_or_default(),
                    m.message.as_deref().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationNode {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateConversationPayload {
    #[serde(default)]
    pub conversation: Option<ConversationNode>,
    #[serde(default)]
    pub messages: Option<Vec<FieldMessage>>,
}

impl CreateConversationPayload {
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation.as_ref().and_then(|c| c.id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConversationData {
    #[serde(rename = "createConversation", default)]
    pub create_conversation: Option<CreateConversationPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteNode {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "opaque_id")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateNotePayload {
    #[serde(default)]
    pub note: Option<NoteNode>,
    #[serde(default)]
    pub messages: Option<Vec<FieldMessage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteData {
    #[serde(rename = "createNote", default)]
    pub create_note: Option<CreateNotePayload>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
}

/// Envelope every GraphQL response arrives in.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse {
    /// Concatenated error messages, if the response carries any.
    pub fn error_summary(&self) -> Option<String> {
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
    }
}
