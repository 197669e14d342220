//! HTTP collaborator for account creation and sign-in.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{CreateUserRequest, CreateUserResponse, SignInRequest, SignInResponse};
use tracing::debug;
use url::Url;

use crate::error::ApiError;

pub const CREATE_USER_ENDPOINT: &str = "create-user";
pub const SIGN_IN_ENDPOINT: &str = "sign-in";

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn create_user(&self, request: &CreateUserRequest)
        -> Result<CreateUserResponse, ApiError>;
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, ApiError>;
}

/// Makes `base` usable with `Url::join` by giving its path a trailing slash.
pub fn normalize_base_url(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

pub struct HttpAuthApi {
    http: Client,
    base_url: Url,
}

impl HttpAuthApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // The backend answers failures with a JSON body too, so the body is decoded
    // before the status code is considered.
    async fn post_json<B, R>(&self, endpoint: &'static str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|source| ApiError::Url { endpoint, source })?;
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        match serde_json::from_slice::<R>(&bytes) {
            Ok(parsed) => {
                debug!(endpoint, status = status.as_u16(), "auth endpoint responded");
                Ok(parsed)
            }
            Err(_) if !status.is_success() => Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            }),
            Err(source) => Err(ApiError::Decode { endpoint, source }),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<CreateUserResponse, ApiError> {
        self.post_json(CREATE_USER_ENDPOINT, request).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, ApiError> {
        self.post_json(SIGN_IN_ENDPOINT, request).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
