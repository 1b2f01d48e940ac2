//! Draft submission: `idle -> submitting -> ready | failed`.

use thiserror::Error;

use crate::fields::{DraftError, ProfileDraft};
use crate::store::{ProfileStore, StoreError};

/// Message shown to the user when the create call fails.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create profile.";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Ready {
        profile_id: String,
    },
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Ready { .. } => "ready",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    pub fn profile_id(&self) -> Option<&str> {
        match self {
            SubmissionState::Ready { profile_id } => Some(profile_id),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error("Failed to create profile.")]
    Store(#[source] StoreError),
}

/// Holds the flow in `Submitting` for the duration of one store call. If the
/// call is dropped before it settles, the flow falls back to `Idle`.
struct PendingSubmission<'a> {
    state: &'a mut SubmissionState,
}

impl<'a> PendingSubmission<'a> {
    fn start(state: &'a mut SubmissionState) -> Self {
        *state = SubmissionState::Submitting;
        Self { state }
    }

    fn settle(self, next: SubmissionState) {
        *self.state = next;
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if *self.state == SubmissionState::Submitting {
            *self.state = SubmissionState::Idle;
        }
    }
}

/// Sends drafts to the profile store and tracks the outcome.
pub struct SubmissionFlow<S> {
    store: S,
    public_origin: String,
    state: SubmissionState,
}

impl<S: ProfileStore> SubmissionFlow<S> {
    /// `public_origin` is where shareable profile links point.
    pub fn new(store: S, public_origin: impl Into<String>) -> Self {
        let public_origin = public_origin.into().trim_end_matches('/').to_string();
        Self {
            store,
            public_origin,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `<public_origin>/profile/<id>` once a profile has been created.
    pub fn profile_url(&self) -> Option<String> {
        self.state
            .profile_id()
            .map(|id| profile_url(&self.public_origin, id))
    }

    /// Submit `draft`. Any previous result is cleared first; a draft without
    /// a name leaves the flow idle and never reaches the store. Dropping the
    /// returned future mid-call also leaves the flow idle.
    pub async fn submit(&mut self, draft: &ProfileDraft) -> Result<String, SubmitError> {
        self.state = SubmissionState::Idle;
        draft.validate()?;

        let request = draft.to_request();
        let pending = PendingSubmission::start(&mut self.state);
        match self.store.create_profile(&request).await {
            Ok(profile_id) => {
                tracing::info!(%profile_id, fields = request.fields.len(), "profile created");
                pending.settle(SubmissionState::Ready {
                    profile_id: profile_id.clone(),
                });
                Ok(profile_id)
            }
            Err(source) => {
                tracing::warn!(error = %source, "profile creation failed");
                pending.settle(SubmissionState::Failed {
                    message: CREATE_FAILED_MESSAGE.to_string(),
                });
                Err(SubmitError::Store(source))
            }
        }
    }
}

/// Shareable link that resolves to the profile page.
pub fn profile_url(public_origin: &str, profile_id: &str) -> String {
    format!(
        "{}/profile/{}",
        public_origin.trim_end_matches('/'),
        profile_id
    )
}
