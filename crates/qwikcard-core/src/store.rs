//! The profile storage collaborator and its HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use qwikcard_protocol::{
    profile_path, CreateProfileRequest, CreateProfileResponse, FieldPayload, ProfileRecord,
    CREATE_PROFILE_PATH,
};
use thiserror::Error;

use crate::config::ServiceConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile service returned HTTP {status}")]
    Status { status: u16 },
    #[error("profile service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A stored profile as read back from the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Fields keep their raw type token; unknown tokens are allowed here.
    pub fields: Vec<FieldPayload>,
}

impl Profile {
    pub fn from_record(id: impl Into<String>, record: ProfileRecord) -> Self {
        Self {
            id: id.into(),
            name: record.name,
            fields: record.fields,
        }
    }
}

/// Create and fetch operations the core needs from profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Store a new profile and return its opaque identifier.
    async fn create_profile(&self, request: &CreateProfileRequest) -> Result<String, StoreError>;

    async fn fetch_profile(&self, profile_id: &str) -> Result<Profile, StoreError>;
}

/// [`ProfileStore`] backed by the profile service's JSON API.
#[derive(Clone, Debug)]
pub struct HttpProfileStore {
    client: reqwest::Client,
    api_base: String,
}

impl HttpProfileStore {
    pub fn new(config: &ServiceConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn create_profile(&self, request: &CreateProfileRequest) -> Result<String, StoreError> {
        let url = format!("{}{}", self.api_base, CREATE_PROFILE_PATH);
        tracing::debug!(%url, fields = request.fields.len(), "creating profile");
        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        let body: CreateProfileResponse = resp.json().await?;
        Ok(body.profile_id)
    }

    async fn fetch_profile(&self, profile_id: &str) -> Result<Profile, StoreError> {
        let url = format!("{}{}", self.api_base, profile_path(profile_id));
        tracing::debug!(%url, "fetching profile");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        let record: ProfileRecord = resp.json().await?;
        Ok(Profile::from_record(profile_id, record))
    }
}
