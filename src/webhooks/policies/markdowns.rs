//! Markdown document validation policy.
//!
//! Hard rule: `spec.markdowns` must contain REQUIRED_DOCUMENT, the mdBook
//! table of contents.

use super::ValidationContext;
use crate::crd::REQUIRED_DOCUMENT;
use crate::webhooks::field::{FieldError, FieldPath};

/// Validate that the required document is present
pub fn validate(ctx: &ValidationContext<'_>) -> Option<FieldError> {
    if ctx.resource.spec.markdowns.contains_key(REQUIRED_DOCUMENT) {
        return None;
    }

    Some(FieldError::required(
        FieldPath::spec("markdowns"),
        format!("markdowns must have {}.", REQUIRED_DOCUMENT),
    ))
}
