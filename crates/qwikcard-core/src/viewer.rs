use serde::Serialize;

use crate::actions::{ActionLink, ActionResolver};
use crate::store::{Profile, ProfileStore};

/// Shown when a profile cannot be loaded for any reason.
pub const NOT_FOUND_MESSAGE: &str = "Profile not found! This QR code may be invalid.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub links: Vec<ActionLink>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedProfile {
    pub id: String,
    pub name: String,
    pub fields: Vec<ResolvedField>,
}

impl ResolvedProfile {
    pub fn resolve(profile: &Profile, resolver: &ActionResolver) -> Self {
        let fields = profile
            .fields
            .iter()
            .map(|field| ResolvedField {
                kind: field.kind.clone(),
                value: field.value.clone(),
                links: resolver.resolve_token(&field.kind, &field.value, &profile.id),
            })
            .collect();
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            fields,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(ResolvedProfile),
    Error(String),
}

/// Viewing-side counterpart of the submission flow: fetch by id, then
/// resolve every field into links.
pub struct ProfileViewer<S> {
    store: S,
    resolver: ActionResolver,
    state: ViewState,
}

impl<S: ProfileStore> ProfileViewer<S> {
    pub fn new(store: S, resolver: ActionResolver) -> Self {
        Self {
            store,
            resolver,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub async fn load(&mut self, profile_id: &str) -> &ViewState {
        self.state = ViewState::Loading;
        self.state = match self.store.fetch_profile(profile_id).await {
            Ok(profile) => {
                tracing::info!(profile_id, fields = profile.fields.len(), "profile loaded");
                ViewState::Loaded(ResolvedProfile::resolve(&profile, &self.resolver))
            }
            Err(err) => {
                tracing::warn!(profile_id, error = %err, "profile lookup failed");
                ViewState::Error(NOT_FOUND_MESSAGE.to_string())
            }
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryProfileStore;
    use qwikcard_protocol::{CreateProfileRequest, FieldPayload};

    #[tokio::test]
    async fn missing_profile_shows_not_found() {
        let mut viewer = ProfileViewer::new(
            MemoryProfileStore::new(),
            ActionResolver::new("http://127.0.0.1:8000"),
        );
        assert_eq!(viewer.state(), &ViewState::Loading);
        let state = viewer.load("nope").await;
        assert_eq!(state, &ViewState::Error(NOT_FOUND_MESSAGE.into()));
    }

    #[tokio::test]
    async fn unknown_field_types_render_without_links() {
        let store = MemoryProfileStore::new();
        let id = store.insert(CreateProfileRequest {
            name: "Ada".into(),
            fields: vec![
                FieldPayload::new("fax", "+1 555 0199"),
                FieldPayload::new("upi", "ada@bank"),
            ],
        });
        let mut viewer = ProfileViewer::new(store, ActionResolver::new("http://127.0.0.1:8000"));
        let ViewState::Loaded(profile) = viewer.load(&id).await.clone() else {
            panic!("expected loaded profile");
        };
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.fields[0].kind, "fax");
        assert!(profile.fields[0].links.is_empty());
        assert_eq!(profile.fields[1].links[0].href, "upi://pay?pa=ada@bank");
    }
}
