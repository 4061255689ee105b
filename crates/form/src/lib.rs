//! Product form state: an observable draft store plus the helpers the
//! editing surfaces drive it with.
//!
//! Layout:
//! - `store.rs`: the store (`update_state`, `validate`, `submit`)
//! - `editor.rs`: image/variant/SKU-row helpers and the variant editor panel state
//! - `events.rs`: change notifications for subscribers
//! - `preview.rs`: image preview handles (injected)
//! - `submit.rs`: the submission seam and its HTTP implementation
//! - `config.rs`: submitter configuration from the environment
//!
//! The store is handed to its consumers explicitly (usually as an `Arc`);
//! there is no ambient/global instance.

pub mod config;
pub mod editor;
pub mod events;
pub mod preview;
pub mod store;
pub mod submit;

pub use config::SubmitterConfig;
pub use editor::VariantEditor;
pub use events::{StoreEvent, Subscription};
pub use preview::{ObjectUrlResolver, PreviewResolver};
pub use store::{FAILURE_MESSAGE, FormStatus, FormStore, SUCCESS_MESSAGE, SubmitOutcome, Update};
pub use submit::{HttpSubmitter, ProductSubmitter, SubmitError};
