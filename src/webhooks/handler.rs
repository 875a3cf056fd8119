//! The handler capability shared by the mutating and validating webhooks.
//!
//! A transport decodes the AdmissionReview envelope once and hands an
//! [`AdmissionInput`] to any [`AdmissionHandler`]; see [`review`].

use std::sync::Arc;

use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use tracing::{debug, error, info, warn};

use super::decision::Decision;
use super::decoder::Decoder;
use super::mutator::Mutator;
use super::validator::Validator;

/// Path the mutating webhook is registered under
pub const MUTATE_PATH: &str = "/mutate-view-cappyzawa-github-io-v1-markdownview";
/// Path the validating webhook is registered under
pub const VALIDATE_PATH: &str = "/validate-view-cappyzawa-github-io-v1-markdownview";

/// One admission request as seen by a handler.
#[derive(Clone, Debug)]
pub struct AdmissionInput {
    pub uid: String,
    pub operation: Operation,
    /// Raw JSON of the object being admitted (empty when absent)
    pub object: Vec<u8>,
    pub name: String,
    pub namespace: Option<String>,
}

impl AdmissionInput {
    /// Whether the request writes the object
    pub fn is_write(&self) -> bool {
        matches!(self.operation, Operation::Create | Operation::Update)
    }
}

impl TryFrom<&AdmissionRequest<DynamicObject>> for AdmissionInput {
    type Error = serde_json::Error;

    fn try_from(request: &AdmissionRequest<DynamicObject>) -> Result<Self, Self::Error> {
        let object = match &request.object {
            Some(obj) => serde_json::to_vec(obj)?,
            None => Vec::new(),
        };
        Ok(Self {
            uid: request.uid.clone(),
            operation: request.operation.clone(),
            object,
            name: request.name.clone(),
            namespace: request.namespace.clone(),
        })
    }
}

/// Handles one admission request and returns a decision.
///
/// Implementations hold no per-request state and are called concurrently.
pub trait AdmissionHandler: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn handle(&self, input: &AdmissionInput) -> Decision;
}

/// Run `handler` against an AdmissionReview and wrap the result in a review.
pub fn review(
    handler: &dyn AdmissionHandler,
    review: AdmissionReview<DynamicObject>,
) -> AdmissionReview<DynamicObject> {
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(handler = handler.name(), error = %e, "Failed to extract admission request");
            return AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                .into_review();
        }
    };

    let input = match AdmissionInput::try_from(&request) {
        Ok(input) => input,
        Err(e) => {
            error!(uid = %request.uid, error = %e, "Failed to encode admission object");
            return Decision::Errored(e.to_string())
                .into_response(&request)
                .into_review();
        }
    };

    debug!(
        handler = handler.name(),
        uid = %input.uid,
        operation = ?input.operation,
        namespace = ?input.namespace,
        name = %input.name,
        "Processing admission request"
    );

    let decision = handler.handle(&input);
    match &decision {
        Decision::Allowed(warnings) => info!(
            handler = handler.name(),
            uid = %input.uid,
            warnings = warnings.len(),
            "Admission request allowed"
        ),
        Decision::Patched(patch) => info!(
            handler = handler.name(),
            uid = %input.uid,
            operations = patch.0.len(),
            "Admission request patched"
        ),
        _ => warn!(
            handler = handler.name(),
            uid = %input.uid,
            code = decision.status_code(),
            "Admission request rejected"
        ),
    }

    decision.into_response(&request).into_review()
}

/// Handlers keyed by the path they serve, for a transport to mount.
pub fn webhook_handlers<D>(decoder: D) -> Vec<(&'static str, Arc<dyn AdmissionHandler>)>
where
    D: Decoder + Clone + 'static,
{
    vec![
        (MUTATE_PATH, Arc::new(Mutator::new(decoder.clone())) as Arc<dyn AdmissionHandler>),
        (VALIDATE_PATH, Arc::new(Validator::new(decoder)) as Arc<dyn AdmissionHandler>),
    ]
}
