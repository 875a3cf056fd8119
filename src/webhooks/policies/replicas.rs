//! Replica count validation policy.
//!
//! Hard rule: `spec.replicas` must be within MIN_REPLICAS..=MAX_REPLICAS.

use super::ValidationContext;
use crate::crd::{MAX_REPLICAS, MIN_REPLICAS};
use crate::webhooks::field::{FieldError, FieldPath};

/// Validate the replica count
pub fn validate(ctx: &ValidationContext<'_>) -> Option<FieldError> {
    let replicas = ctx.resource.spec.replicas;

    if (MIN_REPLICAS..=MAX_REPLICAS).contains(&replicas) {
        return None;
    }

    Some(FieldError::invalid(
        FieldPath::spec("replicas"),
        replicas,
        format!(
            "replicas must be in the range of {} to {}.",
            MIN_REPLICAS, MAX_REPLICAS
        ),
    ))
}
