//! Mutating webhook: fills unset MarkdownView fields with defaults.

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use super::decision::Decision;
use super::decoder::{DecodeError, Decoder};
use super::handler::{AdmissionHandler, AdmissionInput};
use crate::crd::{DEFAULT_VIEWER_IMAGE, MarkdownView};

/// Apply defaults in place. Returns true if anything changed.
pub fn apply_defaults(view: &mut MarkdownView) -> bool {
    if view.spec.viewer_image.is_empty() {
        view.spec.viewer_image = DEFAULT_VIEWER_IMAGE.to_string();
        return true;
    }
    false
}

/// Copy of `original` with the defaulted viewer image set and nothing else
/// touched, so the diff against `original` only covers defaulted fields.
fn default_fields(original: &Value, view: &MarkdownView) -> Result<Value, serde_json::Error> {
    let image = serde_json::to_value(&view.spec.viewer_image)?;
    let mut defaulted = original.clone();
    if let Some(root) = defaulted.as_object_mut() {
        let spec = root
            .entry("spec")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(spec) = spec.as_object_mut() {
            spec.insert("viewerImage".to_string(), image);
        }
    }
    Ok(defaulted)
}

/// Defaults MarkdownView objects on CREATE and UPDATE.
pub struct Mutator<D> {
    decoder: D,
}

impl<D: Decoder> Mutator<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Default the object in `raw` and return the patch against `raw`.
    pub fn mutate(&self, raw: &[u8]) -> Decision {
        let mut view = match self.decoder.decode(raw) {
            Ok(view) => view,
            Err(e) => {
                error!(error = %e, "Failed to decode MarkdownView");
                return Decision::DecodeFailed(e);
            }
        };

        if !apply_defaults(&mut view) {
            return Decision::allowed();
        }

        let original: Value = match serde_json::from_slice(raw) {
            Ok(value) => value,
            Err(e) => return Decision::DecodeFailed(DecodeError::Json(e)),
        };
        let defaulted = match default_fields(&original, &view) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, "Failed to serialize defaulted MarkdownView");
                return Decision::Errored(e.to_string());
            }
        };

        let patch = json_patch::diff(&original, &defaulted);
        debug!(operations = patch.0.len(), "Computed defaulting patch");
        if patch.0.is_empty() {
            return Decision::allowed();
        }
        Decision::Patched(patch)
    }
}

impl<D: Decoder> AdmissionHandler for Mutator<D> {
    fn name(&self) -> &'static str {
        "Mutator"
    }

    fn handle(&self, input: &AdmissionInput) -> Decision {
        info!(name = %input.name, namespace = ?input.namespace, "mutation");

        if !input.is_write() {
            return Decision::allowed();
        }
        self.mutate(&input.object)
    }
}
