//! Admission policies for MarkdownView.
//!
//! Policies come in two kinds:
//! - Hard rules: a violation denies the request (replicas, markdowns)
//! - Soft rules: a violation only adds a warning (viewer image)
//!
//! Every rule is evaluated; nothing short-circuits on the first violation.

pub mod markdowns;
pub mod replicas;
pub mod viewer_image;

use crate::crd::MarkdownView;
use crate::webhooks::field::FieldErrorList;

/// Context for validation
pub struct ValidationContext<'a> {
    /// The resource being validated
    pub resource: &'a MarkdownView,
}

impl<'a> ValidationContext<'a> {
    pub fn new(resource: &'a MarkdownView) -> Self {
        Self { resource }
    }
}

/// Run all hard rules in fixed order and collect every violation.
pub fn validate_all(ctx: &ValidationContext<'_>) -> FieldErrorList {
    [replicas::validate(ctx), markdowns::validate(ctx)]
        .into_iter()
        .flatten()
        .collect()
}

/// Run all soft rules and collect every warning.
pub fn warn_all(ctx: &ValidationContext<'_>) -> Vec<String> {
    [viewer_image::warn(ctx)].into_iter().flatten().collect()
}
