//! markdown-view library crate
//!
//! Admission control for the MarkdownView custom resource: a mutating webhook
//! that fills in defaults and a validating webhook that rejects invalid views.

pub mod crd;
pub mod webhooks;

pub use webhooks::{
    AdmissionHandler, Decision, JsonDecoder, MUTATE_PATH, Mutator, VALIDATE_PATH, Validator,
    review, webhook_handlers,
};
