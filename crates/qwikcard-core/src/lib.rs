//! Profile model, action link resolution and code export for QwikCard.
//!
//! The storage service is reached through [`ProfileStore`]; everything else
//! here is local and synchronous apart from the create/fetch round-trips.

pub mod actions;
pub mod color;
mod config;
pub mod export;
pub mod fields;
pub mod registry;
pub mod store;
pub mod submission;
pub mod viewer;

#[cfg(any(test, feature = "test_support"))]
pub mod test_support;

pub use actions::{ActionLink, ActionResolver, LinkKind};
pub use color::{ColorError, HexColor};
pub use config::{
    config_schema_json, load_config, parse_config, Config, ExportConfig, ServiceConfig,
};
pub use export::{CodeExporter, ExportError, ExportRequest, ExportedImage, EXPORT_SIZE};
pub use fields::{ContactField, DraftError, ProfileDraft, ProfileFieldSet};
pub use registry::{all_types, is_known_type, FieldType};
pub use store::{HttpProfileStore, Profile, ProfileStore, StoreError};
pub use submission::{profile_url, SubmissionFlow, SubmissionState, SubmitError};
pub use viewer::{ProfileViewer, ResolvedField, ResolvedProfile, ViewState};
