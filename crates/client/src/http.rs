//! REST implementation of [`MemorialBackend`] on top of [`reqwest`].

use async_trait::async_trait;
use gravekeeper_core::account::AccountDeletionStep;
use gravekeeper_core::types::DbId;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::backend::MemorialBackend;
use crate::error::BackendError;
use crate::models::{
    AuthResponse, CurrentUser, DataEnvelope, Deceased, DeceasedUpdate, DeletionReport, Graveyard,
    GraveyardUpdate, Identity, NewDeceased, NewGraveyard, Profile, ProfileUpdate,
};

#[derive(Debug, Clone)]
struct Tokens {
    access: String,
    refresh: String,
}

/// Error body produced by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
    step: Option<AccountDeletionStep>,
}

/// HTTP client for one Gravekeeper server. Holds the session tokens.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    tokens: RwLock<Option<Tokens>>,
}

impl HttpBackend {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: RwLock::new(None),
        }
    }

    /// Resume a session persisted by the caller.
    pub async fn restore_session(&self, access_token: String, refresh_token: String) {
        *self.tokens.write().await = Some(Tokens {
            access: access_token,
            refresh: refresh_token,
        });
    }

    /// The refresh token, for the caller to persist.
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.refresh.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn access_token(&self) -> Result<String, BackendError> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access.clone())
            .ok_or(BackendError::NoSession)
    }

    async fn store_session(&self, auth: AuthResponse) -> Identity {
        *self.tokens.write().await = Some(Tokens {
            access: auth.access_token,
            refresh: auth.refresh_token,
        });
        auth.user
    }

    /// Trade the refresh token for a new pair. Returns false when the server
    /// rejects it, in which case the session is dropped.
    async fn refresh_session(&self) -> Result<bool, BackendError> {
        let Some(refresh) = self.refresh_token().await else {
            return Ok(false);
        };
        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .json(&json!({ "refresh_token": refresh }))
            .send()
            .await?;

        match Self::parse_response::<AuthResponse>(response).await {
            Ok(auth) => {
                self.store_session(auth).await;
                Ok(true)
            }
            Err(err) if err.status() == Some(401) => {
                *self.tokens.write().await = None;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Send a request with the access token. A 401 triggers one refresh and
    /// one retry; if the refresh is rejected the original 401 is returned.
    async fn send_authed<F>(&self, build: F) -> Result<reqwest::Response, BackendError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let token = self.access_token().await?;
        let response = build().bearer_auth(token).send().await?;
        if response.status() != reqwest::StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!("Access token rejected, refreshing session");
        if !self.refresh_session().await? {
            return Ok(response);
        }
        let token = self.access_token().await?;
        Ok(build().bearer_auth(token).send().await?)
    }

    /// Send an authenticated request and unwrap the `data` envelope.
    async fn fetch_data<T, F>(&self, build: F) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let response = self.send_authed(build).await?;
        let envelope: DataEnvelope<T> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    // ---- private helpers ----

    /// Map a non-2xx response into [`BackendError::Api`], reading the
    /// server's `{error, code, step}` body when present.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let err = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => BackendError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.error,
                step: body.step,
            },
            Err(_) => BackendError::Api {
                status: status.as_u16(),
                code: "UNKNOWN".to_string(),
                message: text,
                step: None,
            },
        };
        Err(err)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl MemorialBackend for HttpBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        graveyard_name: Option<&str>,
    ) -> Result<Identity, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({
                "email": email,
                "password": password,
                "graveyard_name": graveyard_name,
            }))
            .send()
            .await?;
        let auth = Self::parse_response(response).await?;
        Ok(self.store_session(auth).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let auth = Self::parse_response(response).await?;
        Ok(self.store_session(auth).await)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        // Forget the tokens first; the remote revoke is best effort.
        let Some(tokens) = self.tokens.write().await.take() else {
            return Ok(());
        };
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .bearer_auth(tokens.access)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn current_user(&self) -> Result<Option<CurrentUser>, BackendError> {
        if self.tokens.read().await.is_none() {
            return Ok(None);
        }
        let response = self
            .send_authed(|| self.request(Method::GET, "/auth/me"))
            .await?;
        match Self::parse_response::<CurrentUser>(response).await {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.status() == Some(401) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, BackendError> {
        self.fetch_data(|| self.request(Method::PUT, "/profile").json(update))
            .await
    }

    async fn list_graveyards(&self) -> Result<Vec<Graveyard>, BackendError> {
        self.fetch_data(|| self.request(Method::GET, "/graveyards"))
            .await
    }

    async fn create_graveyard(&self, input: &NewGraveyard) -> Result<Graveyard, BackendError> {
        self.fetch_data(|| self.request(Method::POST, "/graveyards").json(input))
            .await
    }

    async fn update_graveyard(
        &self,
        id: DbId,
        update: &GraveyardUpdate,
    ) -> Result<Graveyard, BackendError> {
        let path = format!("/graveyards/{id}");
        self.fetch_data(|| self.request(Method::PUT, &path).json(update))
            .await
    }

    async fn activate_graveyard(&self, id: DbId) -> Result<Graveyard, BackendError> {
        let path = format!("/graveyards/{id}/activate");
        self.fetch_data(|| self.request(Method::POST, &path)).await
    }

    async fn delete_graveyard(&self, id: DbId) -> Result<(), BackendError> {
        let path = format!("/graveyards/{id}");
        let response = self
            .send_authed(|| self.request(Method::DELETE, &path))
            .await?;
        Self::check_status(response).await
    }

    async fn list_deceased(
        &self,
        graveyard_id: Option<DbId>,
    ) -> Result<Vec<Deceased>, BackendError> {
        self.fetch_data(|| {
            let request = self.request(Method::GET, "/deceased");
            match graveyard_id {
                Some(id) => request.query(&[("graveyard_id", id)]),
                None => request,
            }
        })
        .await
    }

    async fn create_deceased(&self, input: &NewDeceased) -> Result<Deceased, BackendError> {
        self.fetch_data(|| self.request(Method::POST, "/deceased").json(input))
            .await
    }

    async fn update_deceased(
        &self,
        id: DbId,
        update: &DeceasedUpdate,
    ) -> Result<Deceased, BackendError> {
        let path = format!("/deceased/{id}");
        self.fetch_data(|| self.request(Method::PUT, &path).json(update))
            .await
    }

    async fn delete_deceased(&self, id: DbId) -> Result<(), BackendError> {
        let path = format!("/deceased/{id}");
        let response = self
            .send_authed(|| self.request(Method::DELETE, &path))
            .await?;
        Self::check_status(response).await
    }

    async fn delete_account(&self, confirmation: &str) -> Result<DeletionReport, BackendError> {
        let body = json!({ "confirmation": confirmation });
        let report = self
            .fetch_data(|| self.request(Method::DELETE, "/account").json(&body))
            .await?;
        *self.tokens.write().await = None;
        Ok(report)
    }
}
