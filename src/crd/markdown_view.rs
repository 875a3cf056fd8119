//! MarkdownView Custom Resource Definition.
//!
//! A MarkdownView holds a set of markdown documents that the controller
//! renders with an mdBook viewer. Admission webhooks default the viewer image
//! and reject views that cannot be rendered.

use std::collections::BTreeMap;

use kube::{CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Viewer image used when `spec.viewerImage` is left empty.
pub const DEFAULT_VIEWER_IMAGE: &str = "peaceiris/mdbook:latest";

/// Document every MarkdownView must contain (the mdBook table of contents).
pub const REQUIRED_DOCUMENT: &str = "SUMMARY.md";

/// Minimum number of viewer replicas (inclusive)
pub const MIN_REPLICAS: i32 = 1;

/// Maximum number of viewer replicas (inclusive)
pub const MAX_REPLICAS: i32 = 5;

/// MarkdownView is a custom resource for serving markdown documents.
///
/// Example:
/// ```yaml
/// apiVersion: view.cappyzawa.github.io/v1
/// kind: MarkdownView
/// metadata:
///   name: sample
/// spec:
///   markdowns:
///     SUMMARY.md: |
///       # Summary
///       - [Page1](page1.md)
///     page1.md: |
///       # Page 1
///   replicas: 1
///   viewerImage: peaceiris/mdbook:latest
/// ```
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "view.cappyzawa.github.io",
    version = "v1",
    kind = "MarkdownView",
    plural = "markdownviews",
    status = "MarkdownViewStatus",
    namespaced,
    derive = "PartialEq",
    printcolumn = r#"{"name":"Replicas", "type":"integer", "jsonPath":".spec.replicas"}"#,
    printcolumn = r#"{"name":"Status", "type":"string", "jsonPath":".status"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownViewSpec {
    /// Markdown documents keyed by file name.
    /// Must contain `SUMMARY.md`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub markdowns: BTreeMap<String, String>,

    /// Number of viewer replicas (1 to 5).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub replicas: i32,

    /// Viewer container image (defaulted to `peaceiris/mdbook:latest`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub viewer_image: String,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// Status of a MarkdownView as reported by the controller
/// (e.g. `NotReady`, `Available`, `Healthy`).
///
/// Kept as an opaque string: admission never interprets it, and a value
/// written by a newer controller must still decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct MarkdownViewStatus(pub String);

impl std::fmt::Display for MarkdownViewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl MarkdownView {
    /// Qualified kind used in API error messages, e.g.
    /// `MarkdownView.view.cappyzawa.github.io`.
    pub fn group_kind() -> String {
        format!("{}.{}", Self::kind(&()), Self::group(&()))
    }
}
