use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{EditOptions, EditResponse, TermsApi};
use crate::app_config::ApiConfig;
use crate::entity_id::EntityId;
use crate::errors::ApiError;
use crate::terms::{AuthoritativeEntity, ChangeSet};

/// Client for a MediaWiki `api.php` endpoint with Wikibase installed
pub struct MediaWikiApi {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of `api.php`
    endpoint: String,
    /// OAuth 2 access token, sent as a bearer token when set
    access_token: Option<String>,
}

impl std::fmt::Debug for MediaWikiApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaWikiApi")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

impl MediaWikiApi {
    /// Create a new client with default timeout
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(user_agent, Duration::from_secs(30))?,
            endpoint: endpoint.into(),
            access_token: None,
        })
    }

    /// Create a client from the `api` section of the configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let access_token = Some(config.access_token.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Ok(Self {
            client: build_client(&config.user_agent, Duration::from_secs(config.timeout_secs))?,
            endpoint: config.endpoint.clone(),
            access_token,
        })
    }

    /// Attach an OAuth 2 access token to every request
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return the decoded body, surfacing API error objects
    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("MediaWiki API error ({}): {}", status, body);
        }
        parse_response(status.as_u16(), &body)
    }

    async fn csrf_token(&self) -> Result<String, ApiError> {
        let request = self.client.get(&self.endpoint).query(&[
            ("action", "query"),
            ("meta", "tokens"),
            ("type", "csrf"),
            ("format", "json"),
        ]);
        let body = self.send(request).await?;

        body.pointer("/query/tokens/csrftoken")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ApiError::Parse("response carries no csrf token".to_string()))
    }
}

fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))
}

/// Query parameters of the `wbgetentities` read, all languages included
fn fetch_query(id: &EntityId) -> Vec<(&'static str, String)> {
    vec![
        ("action", "wbgetentities".to_string()),
        ("ids", id.to_string()),
        ("props", "labels|descriptions|aliases".to_string()),
        ("format", "json".to_string()),
    ]
}

/// Form fields of the `wbeditentity` write
fn edit_form(id: &EntityId, data: &str, options: &EditOptions, token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("action", "wbeditentity".to_string()),
        ("id", id.to_string()),
        ("data", data.to_string()),
        ("summary", options.summary.clone()),
        ("maxlag", options.maxlag.to_string()),
        ("format", "json".to_string()),
        ("token", token.to_string()),
    ]
}

/// Decode a response of any status. An API error object wins over the HTTP status.
fn parse_response(status_code: u16, body: &str) -> Result<Value, ApiError> {
    if (200..300).contains(&status_code) {
        return parse_body(body);
    }

    match parse_body(body) {
        Err(server @ ApiError::Server { .. }) => Err(server),
        _ => Err(ApiError::Http {
            status_code,
            message: body.to_string(),
        }),
    }
}

/// Decode a response body, turning `{"error": {...}}` into `ApiError::Server`
fn parse_body(body: &str) -> Result<Value, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    if let Some(error_value) = value.get("error") {
        let api_error: ApiErrorBody = serde_json::from_value(error_value.clone())
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        return Err(ApiError::Server {
            code: api_error.code,
            info: api_error.info,
        });
    }

    Ok(value)
}

/// Extract one entity's terms from a `wbgetentities` response
fn entity_from_response(body: &Value, id: &EntityId) -> Result<AuthoritativeEntity, ApiError> {
    let entity = body
        .get("entities")
        .and_then(|entities| entities.get(id.as_str()))
        .ok_or_else(|| ApiError::Parse(format!("response does not contain entity {}", id)))?;

    if entity.get("missing").is_some() {
        return Err(ApiError::MissingEntity(id.to_string()));
    }

    serde_json::from_value(entity.clone()).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Revision id reported by `wbeditentity`
fn revision_from_response(body: &Value) -> Option<u64> {
    body.pointer("/entity/lastrevid").and_then(Value::as_u64)
}

#[async_trait]
impl TermsApi for MediaWikiApi {
    async fn fetch_terms(&self, id: &EntityId) -> Result<AuthoritativeEntity, ApiError> {
        debug!("Fetching terms of {} from {}", id, self.endpoint);

        let request = self.client.get(&self.endpoint).query(&fetch_query(id));
        let body = self.send(request).await?;

        entity_from_response(&body, id)
    }

    async fn edit_entity(
        &self,
        id: &EntityId,
        change_set: &ChangeSet,
        options: &EditOptions,
    ) -> Result<EditResponse, ApiError> {
        let data = change_set
            .to_payload()
            .map_err(|e| ApiError::Parse(format!("Failed to serialize change set: {}", e)))?;
        let token = self.csrf_token().await?;

        let request = self
            .client
            .post(&self.endpoint)
            .form(&edit_form(id, &data, options, &token));
        let body = self.send(request).await?;

        Ok(EditResponse {
            revision: revision_from_response(&body),
        })
    }
}
