use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::healthie::{
    CreateConversationData, CreateConversationPayload, CreateNoteData, CreateNotePayload,
    CurrentUser, CurrentUserData, GraphQLResponse, UserNode, UsersData,
};
use shared_models::ApiError;

use crate::queries::{
    CREATE_CONVERSATION_MUTATION, CREATE_NOTE_MUTATION, CURRENT_USER_QUERY,
    USERS_WITH_APPOINTMENTS_QUERY,
};

/// Single-endpoint GraphQL gateway to the Healthie API.
///
/// One POST per operation, no retries. Application-level `errors` lists are
/// preferred over the generic HTTP failure whenever the body carries one.
pub struct HealthieClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HealthieClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.healthie_api_url.clone(),
            api_key: config.healthie_api_key.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("authorizationsource"),
            HeaderValue::from_static("API"),
        );

        match HeaderValue::from_str(&format!("Basic {}", self.api_key)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => error!("HEALTHIE_API_KEY contains characters not allowed in a header"),
        }

        headers
    }

    /// Sends one operation and returns its `data` decoded as `T`.
    pub async fn execute<T>(&self, query: &str, variables: Value) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        debug!("Sending GraphQL operation to {}", self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .headers(self.get_headers())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let envelope = serde_json::from_str::<GraphQLResponse>(&body);

        if !status.is_success() {
            error!("API error ({}): {}", status, body);

            if let Some(messages) = envelope.as_ref().ok().and_then(|e| e.error_summary()) {
                return Err(ApiError::Upstream(messages));
            }
            return Err(ApiError::Http { status, body });
        }

        let envelope = envelope?;
        if let Some(messages) = envelope.error_summary() {
            error!("GraphQL errors: {}", messages);
            return Err(ApiError::Upstream(messages));
        }

        let data = envelope.data.ok_or(ApiError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }

    /// Identity of the API key's owner. `None` when the service returns no user.
    pub async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError> {
        let data: CurrentUserData = self.execute(CURRENT_USER_QUERY, json!({})).await?;
        Ok(data.current_user)
    }

    pub async fn users_with_appointments(&self) -> Result<Vec<UserNode>, ApiError> {
        let data: UsersData = self.execute(USERS_WITH_APPOINTMENTS_QUERY, json!({})).await?;
        Ok(data.users.unwrap_or_default())
    }

    pub async fn create_conversation(
        &self,
        doc_share_id: &str,
        name: &str,
    ) -> Result<CreateConversationPayload, ApiError> {
        let data: CreateConversationData = self
            .execute(
                CREATE_CONVERSATION_MUTATION,
                json!({ "simple_added_users": doc_share_id, "name": name }),
            )
            .await?;
        Ok(data.create_conversation.unwrap_or_default())
    }

    pub async fn create_note(
        &self,
        user_id: &str,
        content: &str,
        conversation_id: &str,
    ) -> Result<CreateNotePayload, ApiError> {
        let data: CreateNoteData = self
            .execute(
                CREATE_NOTE_MUTATION,
                json!({
                    "user_id": user_id,
                    "content": content,
                    "conversation_id": conversation_id
                }),
            )
            .await?;
        Ok(data.create_note.unwrap_or_default())
    }
}
