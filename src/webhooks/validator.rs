//! Validating webhook: rejects invalid MarkdownView objects and warns about
//! questionable ones.

use tracing::{error, info, warn};

use super::decision::Decision;
use super::decoder::Decoder;
use super::field::InvalidError;
use super::handler::{AdmissionHandler, AdmissionInput};
use super::policies::{ValidationContext, validate_all, warn_all};
use crate::crd::MarkdownView;

/// Validate a decoded MarkdownView.
///
/// Hard rules are evaluated first; warnings are only collected when every
/// hard rule passes.
pub fn validate_resource(view: &MarkdownView) -> Decision {
    let ctx = ValidationContext::new(view);

    let errors = validate_all(&ctx);
    if !errors.is_empty() {
        let name = view.metadata.name.clone().unwrap_or_default();
        let err = InvalidError::new(MarkdownView::group_kind(), name, errors);
        warn!(name = %err.name(), causes = err.causes().len(), error = %err, "validation error");
        return Decision::Denied(err);
    }

    Decision::Allowed(warn_all(&ctx))
}

/// Validates MarkdownView objects on CREATE and UPDATE.
pub struct Validator<D> {
    decoder: D,
}

impl<D: Decoder> Validator<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decode and validate the object in `raw`.
    pub fn validate(&self, raw: &[u8]) -> Decision {
        match self.decoder.decode(raw) {
            Ok(view) => validate_resource(&view),
            Err(e) => {
                error!(error = %e, "Failed to decode MarkdownView");
                Decision::DecodeFailed(e)
            }
        }
    }
}

impl<D: Decoder> AdmissionHandler for Validator<D> {
    fn name(&self) -> &'static str {
        "Validator"
    }

    fn handle(&self, input: &AdmissionInput) -> Decision {
        info!(name = %input.name, namespace = ?input.namespace, "validating");

        // Only objects being written are validated
        if !input.is_write() {
            return Decision::allowed();
        }
        self.validate(&input.object)
    }
}
