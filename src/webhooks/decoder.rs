//! Decoding of admission payloads into typed MarkdownView objects.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::crd::MarkdownView;

/// Errors raised while decoding an admission payload
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Request carried no object
    #[error("there is no content to decode")]
    Empty,

    /// Payload is not a valid MarkdownView
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Turns raw object bytes into a MarkdownView.
///
/// Implementations must not retain state between calls; the same decoder is
/// shared by every in-flight request.
pub trait Decoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<MarkdownView, DecodeError>;
}

/// Decoder for JSON encoded objects, the encoding used in AdmissionReview.
///
/// An object without `spec` decodes with an all-default spec, so it reaches
/// the policies instead of failing as malformed.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, raw: &[u8]) -> Result<MarkdownView, DecodeError> {
        if raw.is_empty() || raw == b"null" {
            return Err(DecodeError::Empty);
        }
        let mut value: Value = serde_json::from_slice(raw)?;
        if let Some(object) = value.as_object_mut() {
            object
                .entry("spec")
                .or_insert_with(|| Value::Object(Map::new()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl<D: Decoder + ?Sized> Decoder for std::sync::Arc<D> {
    fn decode(&self, raw: &[u8]) -> Result<MarkdownView, DecodeError> {
        (**self).decode(raw)
    }
}
