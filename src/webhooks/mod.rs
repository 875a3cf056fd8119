//! Admission webhooks for MarkdownView.
//!
//! - `Mutator`: defaults `spec.viewerImage`
//! - `Validator`: enforces replica bounds and the required `SUMMARY.md`
//!   document, warns about non-default viewer images
//!
//! Both implement [`AdmissionHandler`] so a transport can serve either one
//! through [`review`].

pub mod decision;
pub mod decoder;
pub mod field;
pub mod handler;
pub mod mutator;
pub mod policies;
pub mod validator;

pub use decision::Decision;
pub use decoder::{DecodeError, Decoder, JsonDecoder};
pub use field::{FieldError, FieldErrorList, FieldErrorType, FieldPath, InvalidError};
pub use handler::{
    AdmissionHandler, AdmissionInput, MUTATE_PATH, VALIDATE_PATH, review, webhook_handlers,
};
pub use mutator::{Mutator, apply_defaults};
pub use policies::ValidationContext;
pub use validator::{Validator, validate_resource};

// Re-export kube-rs admission types for transports and contract tests
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
