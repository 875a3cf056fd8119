//! Viewer image advisory policy.
//!
//! Soft rule: warn when `spec.viewerImage` is not DEFAULT_VIEWER_IMAGE.

use super::ValidationContext;
use crate::crd::DEFAULT_VIEWER_IMAGE;
use crate::webhooks::field::FieldPath;

/// Warning for a non-default viewer image
pub fn warn(ctx: &ValidationContext<'_>) -> Option<String> {
    let image = &ctx.resource.spec.viewer_image;
    if image == DEFAULT_VIEWER_IMAGE {
        return None;
    }

    Some(format!(
        "{}: {:?}: viewerImage is not default",
        FieldPath::spec("viewerImage"),
        image
    ))
}
