//! HTTP implementation of the store.

use async_trait::async_trait;
use caixa_core::{DeletionIntent, DepositIntent, DisplaySettings, Snapshot, TransactionDraft, VaultDraft};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::RemoteStore;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    /// The access token, as long as the store issued a bearer token.
    fn into_bearer(self) -> Result<String, StoreError> {
        match self.token_type.as_deref() {
            Some(kind) if !kind.eq_ignore_ascii_case("bearer") => {
                Err(StoreError::Decode(format!("unsupported token type: {kind}")))
            }
            _ => Ok(self.access_token),
        }
    }
}

/// A store without a logout endpoint (404/405) or one that already dropped
/// the token (401) still counts as logged out.
fn logout_outcome<T>(result: Result<T, StoreError>) -> Result<(), StoreError> {
    match result {
        Ok(_) => Ok(()),
        Err(StoreError::Api { status: 404 | 405, .. }) | Err(StoreError::AuthRequired) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Talks to the store over HTTP, sending the bearer token when one is held.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "store request");
        let rb = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn send(&self, rb: RequestBuilder) -> Result<Response, StoreError> {
        let resp = rb.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = StoreError::from_response(status.as_u16(), &body);
        if matches!(err, StoreError::AuthRequired) {
            warn!("store rejected the session token");
        } else {
            debug!(status = status.as_u16(), %body, "store error");
        }
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<T, StoreError> {
        let body = self.send(rb).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Exchange credentials for a bearer token and keep it for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, StoreError> {
        let rb = self
            .request(Method::POST, "/token")
            .form(&[("username", username), ("password", password)]);
        let out: TokenResponse = self.send_json(rb).await?;
        let token = out.into_bearer()?;
        self.token = Some(token.clone());
        Ok(token)
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let rb = self
            .request(Method::POST, "/signup")
            .form(&[("username", username), ("password", password)]);
        self.send(rb).await?;
        Ok(())
    }

    /// End the session on the store. The token is dropped locally even when
    /// the store has no logout endpoint.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        let result = self.send(self.request(Method::POST, "/logout")).await;
        self.token = None;
        logout_outcome(result)
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn fetch_snapshot(&self) -> Result<Snapshot, StoreError> {
        self.send_json(self.request(Method::GET, "/api/data")).await
    }

    async fn fetch_settings(&self) -> Result<DisplaySettings, StoreError> {
        self.send_json(self.request(Method::GET, "/api/settings")).await
    }

    async fn save_settings(&self, settings: &DisplaySettings) -> Result<(), StoreError> {
        let rb = self.request(Method::POST, "/api/settings").json(settings);
        self.send(rb).await?;
        Ok(())
    }

    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<(), StoreError> {
        let rb = self.request(Method::POST, "/api/transactions").json(draft);
        self.send(rb).await?;
        Ok(())
    }

    async fn delete_transaction(&self, intent: DeletionIntent) -> Result<(), StoreError> {
        let path = format!("/api/transactions/{}", intent.transaction_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn create_vault(&self, draft: &VaultDraft) -> Result<(), StoreError> {
        let rb = self.request(Method::POST, "/api/caixinhas").json(draft);
        self.send(rb).await?;
        Ok(())
    }

    async fn deposit(&self, intent: DepositIntent) -> Result<(), StoreError> {
        let path = format!("/api/caixinhas/{}/deposit", intent.vault_id);
        let rb = self.request(Method::POST, &path).json(&intent);
        self.send(rb).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let store = HttpStore::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8000");
        assert_eq!(store.url("/api/data"), "http://localhost:8000/api/data");
    }

    #[test]
    fn test_bearer_header_attached() {
        let store = HttpStore::new("http://localhost:8000", Duration::from_secs(5))
            .unwrap()
            .with_token("abc");
        let req = store
            .request(Method::GET, "/api/data")
            .build()
            .unwrap();
        assert_eq!(
            req.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer abc"
        );
        assert_eq!(req.url().path(), "/api/data");
    }

    #[test]
    fn test_no_token_no_header() {
        let store = HttpStore::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        let req = store.request(Method::POST, "/token").build().unwrap();
        assert!(req.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_response_shape() {
        let out: TokenResponse =
            serde_json::from_str(r#"{"access_token": "xyz", "token_type": "bearer"}"#).unwrap();
        assert_eq!(out.access_token, "xyz");
        assert_eq!(out.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn test_non_bearer_token_is_rejected() {
        let out: TokenResponse =
            serde_json::from_str(r#"{"access_token": "xyz", "token_type": "mac"}"#).unwrap();
        assert!(matches!(out.into_bearer(), Err(StoreError::Decode(_))));

        let out: TokenResponse =
            serde_json::from_str(r#"{"access_token": "xyz", "token_type": "Bearer"}"#).unwrap();
        assert_eq!(out.into_bearer().unwrap(), "xyz");

        let out: TokenResponse = serde_json::from_str(r#"{"access_token": "xyz"}"#).unwrap();
        assert_eq!(out.into_bearer().unwrap(), "xyz");
    }

    #[test]
    fn test_logout_tolerates_missing_endpoint_and_expired_token() {
        for status in [404, 405, 401] {
            let result: Result<(), StoreError> = Err(StoreError::from_response(status, ""));
            assert!(logout_outcome(result).is_ok(), "status {status}");
        }
        assert!(logout_outcome(Ok(())).is_ok());

        let result: Result<(), StoreError> = Err(StoreError::from_response(500, ""));
        assert!(matches!(
            logout_outcome(result),
            Err(StoreError::Api { status: 500, .. })
        ));
    }
}
