//! Structured field errors for admission denials.
//!
//! A denial is reported as one [`InvalidError`] that carries every violated
//! field, so callers can inspect the causes instead of parsing the message.

use std::fmt;

use kube::core::response::{Status, StatusCause, StatusDetails};
use serde_json::Value;
use thiserror::Error;

/// Dotted path to a field, e.g. `spec.replicas`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path of a field under `spec`
    pub fn spec(field: &str) -> Self {
        Self::new(["spec", field])
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Kind of field violation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldErrorType {
    /// The value is present but not acceptable
    Invalid,
    /// A required value is missing
    Required,
}

impl FieldErrorType {
    /// Reason string used in `StatusCause.reason`
    pub fn reason(&self) -> &'static str {
        match self {
            FieldErrorType::Invalid => "FieldValueInvalid",
            FieldErrorType::Required => "FieldValueRequired",
        }
    }
}

impl fmt::Display for FieldErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorType::Invalid => write!(f, "Invalid value"),
            FieldErrorType::Required => write!(f, "Required value"),
        }
    }
}

/// One violated field: path, offending value (if any) and reason.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub error_type: FieldErrorType,
    pub field: FieldPath,
    pub bad_value: Option<Value>,
    pub detail: String,
}

impl FieldError {
    pub fn invalid(field: FieldPath, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self {
            error_type: FieldErrorType::Invalid,
            field,
            bad_value: Some(value.into()),
            detail: detail.into(),
        }
    }

    pub fn required(field: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            error_type: FieldErrorType::Required,
            field,
            bad_value: None,
            detail: detail.into(),
        }
    }

    /// Message without the field path, e.g. `Invalid value: 0: too small`
    pub fn body(&self) -> String {
        match &self.bad_value {
            Some(value) => format!("{}: {}: {}", self.error_type, value, self.detail),
            None => format!("{}: {}", self.error_type, self.detail),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.body())
    }
}

/// Ordered list of field violations
pub type FieldErrorList = Vec<FieldError>;

/// A request rejected because one or more fields are invalid.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{group_kind} \"{name}\" is invalid: {}", format_causes(.causes))]
pub struct InvalidError {
    group_kind: String,
    name: String,
    causes: FieldErrorList,
}

fn format_causes(causes: &[FieldError]) -> String {
    match causes {
        [single] => single.to_string(),
        many => {
            let joined: Vec<String> = many.iter().map(ToString::to_string).collect();
            format!("[{}]", joined.join(", "))
        }
    }
}

impl InvalidError {
    pub fn new(group_kind: impl Into<String>, name: impl Into<String>, causes: FieldErrorList) -> Self {
        Self {
            group_kind: group_kind.into(),
            name: name.into(),
            causes,
        }
    }

    pub fn group_kind(&self) -> &str {
        &self.group_kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Violations in the order they were found
    pub fn causes(&self) -> &[FieldError] {
        &self.causes
    }

    /// Status returned to the API server for this denial.
    pub fn to_status(&self, code: u16) -> Status {
        let (kind, group) = self
            .group_kind
            .split_once('.')
            .unwrap_or((self.group_kind.as_str(), ""));

        let details = StatusDetails {
            name: self.name.clone(),
            group: group.to_string(),
            kind: kind.to_string(),
            causes: self
                .causes
                .iter()
                .map(|cause| StatusCause {
                    reason: cause.error_type.reason().to_string(),
                    message: cause.body(),
                    field: cause.field.to_string(),
                })
                .collect(),
            uid: String::new(),
            retry_after_seconds: 0,
        };

        Status::failure(&self.to_string(), "Invalid")
            .with_code(code)
            .with_details(details)
    }
}
