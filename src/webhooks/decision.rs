//! Admission decisions and their translation into AdmissionResponse.

use json_patch::Patch;
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse};
use kube::core::response::Status;
use tracing::error;

use super::decoder::DecodeError;
use super::field::InvalidError;

/// HTTP status used for client errors (decode failures and denials)
pub const STATUS_BAD_REQUEST: u16 = 400;
/// HTTP status used for internal failures
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Outcome of one admission request.
#[derive(Debug)]
pub enum Decision {
    /// Request accepted, possibly with advisory warnings
    Allowed(Vec<String>),
    /// Request accepted once the patch is applied to the original object
    Patched(Patch),
    /// One or more hard rules were violated
    Denied(InvalidError),
    /// The object could not be decoded
    DecodeFailed(DecodeError),
    /// Internal failure while building the response
    Errored(String),
}

impl Decision {
    /// Allowed without warnings
    pub fn allowed() -> Self {
        Decision::Allowed(Vec::new())
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed(_) | Decision::Patched(_))
    }

    /// Warnings attached to an allowed decision
    pub fn warnings(&self) -> &[String] {
        match self {
            Decision::Allowed(warnings) => warnings,
            _ => &[],
        }
    }

    /// HTTP-equivalent status of the decision
    pub fn status_code(&self) -> u16 {
        match self {
            Decision::Allowed(_) | Decision::Patched(_) => 200,
            Decision::Denied(_) | Decision::DecodeFailed(_) => STATUS_BAD_REQUEST,
            Decision::Errored(_) => STATUS_INTERNAL_SERVER_ERROR,
        }
    }

    /// Failure message, `None` for allowed decisions
    pub fn message(&self) -> Option<String> {
        match self {
            Decision::Allowed(_) | Decision::Patched(_) => None,
            Decision::Denied(err) => Some(err.to_string()),
            Decision::DecodeFailed(err) => Some(err.to_string()),
            Decision::Errored(message) => Some(message.clone()),
        }
    }

    /// Build the AdmissionResponse for `request`.
    pub fn into_response(self, request: &AdmissionRequest<DynamicObject>) -> AdmissionResponse {
        let code = self.status_code();
        match self {
            Decision::Allowed(warnings) => {
                let mut response = AdmissionResponse::from(request);
                if !warnings.is_empty() {
                    response.warnings = Some(warnings);
                }
                response
            }
            Decision::Patched(patch) => match AdmissionResponse::from(request).with_patch(patch) {
                Ok(response) => response,
                Err(e) => {
                    error!(uid = %request.uid, error = %e, "Failed to serialize patch");
                    errored(request, STATUS_INTERNAL_SERVER_ERROR, &e.to_string())
                }
            },
            Decision::Denied(err) => {
                let message = err.to_string();
                let mut response = AdmissionResponse::from(request).deny(&message);
                response.result = err.to_status(code);
                response
            }
            Decision::DecodeFailed(err) => errored(request, code, &err.to_string()),
            Decision::Errored(message) => errored(request, code, &message),
        }
    }
}

fn errored(request: &AdmissionRequest<DynamicObject>, code: u16, message: &str) -> AdmissionResponse {
    let reason = if code >= STATUS_INTERNAL_SERVER_ERROR {
        "InternalError"
    } else {
        "BadRequest"
    };
    let mut response = AdmissionResponse::from(request).deny(message);
    response.result = Status::failure(message, reason).with_code(code);
    response
}
