//! Operation result envelope
//!
//! This module provides [`OperationResult`], the uniform outcome type every
//! handler in the pipeline returns: success-with-data, success-without-data,
//! validation failure (field-keyed error lists), or not-found. Each variant
//! carries a status classification that maps directly onto an HTTP status,
//! but the envelope itself is transport-independent.
//!
//! Envelopes are constructed once through factory functions and are read-only
//! afterwards, so a handler cannot accidentally mutate a result after
//! returning it.
//!
//! # Example
//!
//! ```rust
//! use request_pipeline::envelope::{OperationResult, OperationStatus};
//!
//! let result = OperationResult::success(42_i64);
//! assert!(result.is_success());
//! assert_eq!(result.status(), OperationStatus::Ok);
//! assert_eq!(result.data(), Some(&42));
//!
//! let missing: OperationResult<i64> = OperationResult::not_found();
//! assert!(!missing.is_success());
//! assert_eq!(missing.status(), OperationStatus::NotFound);
//! ```

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Map from field name to the ordered list of messages for that field.
///
/// The empty-string key holds errors that are not specific to any field.
pub type ErrorMap = HashMap<String, Vec<String>>;

/// Key used for errors that do not belong to a particular field.
pub const GENERAL_ERROR_KEY: &str = "";

/// Status classification of an operation outcome
///
/// The classification is transport-independent; [`OperationStatus::status_code`]
/// gives the HTTP mapping used by the axum integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    /// The operation completed successfully
    Ok,
    /// The request failed validation
    BadRequest,
    /// The requested entity does not exist
    NotFound,
}

impl OperationStatus {
    /// Get the HTTP status code for this classification
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum::http::StatusCode;
    /// use request_pipeline::envelope::OperationStatus;
    ///
    /// assert_eq!(OperationStatus::Ok.status_code(), StatusCode::OK);
    /// assert_eq!(OperationStatus::BadRequest.status_code(), StatusCode::BAD_REQUEST);
    /// assert_eq!(OperationStatus::NotFound.status_code(), StatusCode::NOT_FOUND);
    /// ```
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Builder for field-keyed validation errors
///
/// Collects messages per field and converts into an [`ErrorMap`] for
/// [`OperationResult::fail`]. Message order within a field is preserved.
///
/// # Example
///
/// ```rust
/// use request_pipeline::envelope::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("name", "Name is required");
/// errors.add("name", "Name must be unique");
/// errors.add_general("Request could not be processed");
///
/// assert!(!errors.is_empty());
/// assert_eq!(errors.len(), 3);
/// let map = errors.into_map();
/// assert_eq!(map.get("name").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: ErrorMap,
}

impl FieldErrors {
    /// Create an empty error collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a field, preserving insertion order per field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Add a message that is not specific to any field
    pub fn add_general(&mut self, message: impl Into<String>) {
        self.add(GENERAL_ERROR_KEY, message);
    }

    /// Check whether any messages have been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Consume the builder, yielding the underlying map
    #[must_use]
    pub fn into_map(self) -> ErrorMap {
        self.errors
    }
}

impl From<FieldErrors> for ErrorMap {
    fn from(errors: FieldErrors) -> Self {
        errors.into_map()
    }
}

/// Uniform outcome envelope for pipeline operations
///
/// Construct through the factory functions ([`success`](Self::success),
/// [`success_empty`](Self::success_empty), [`fail`](Self::fail),
/// [`fail_with_message`](Self::fail_with_message),
/// [`not_found`](Self::not_found)); fields are read-only afterwards.
///
/// The error map is populated only for [`OperationStatus::BadRequest`]
/// outcomes, and the payload only for successful ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult<T> {
    success: bool,
    status: OperationStatus,
    #[serde(skip_serializing_if = "ErrorMap::is_empty")]
    errors: ErrorMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

// Deserialization goes through the same consistency rules the factories
// enforce; a wire envelope cannot smuggle in a state no factory produces.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for OperationResult<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound(deserialize = "T: Deserialize<'de>"))]
        struct Raw<T> {
            success: bool,
            status: OperationStatus,
            #[serde(default)]
            errors: ErrorMap,
            #[serde(default)]
            data: Option<T>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        if raw.success != (raw.status == OperationStatus::Ok) {
            return Err(serde::de::Error::custom(
                "success flag does not match status",
            ));
        }
        if !raw.errors.is_empty() && raw.status != OperationStatus::BadRequest {
            return Err(serde::de::Error::custom(
                "errors are only valid on a validation failure",
            ));
        }
        if raw.data.is_some() && !raw.success {
            return Err(serde::de::Error::custom(
                "payload is only valid on a successful outcome",
            ));
        }
        Ok(Self {
            success: raw.success,
            status: raw.status,
            errors: raw.errors,
            data: raw.data,
        })
    }
}

/// Envelope for commands that carry no payload on success
pub type CommandResult = OperationResult<()>;

impl<T> OperationResult<T> {
    /// Successful outcome carrying a payload
    ///
    /// # Example
    ///
    /// ```rust
    /// use request_pipeline::envelope::OperationResult;
    ///
    /// let result = OperationResult::success("created");
    /// assert!(result.is_success());
    /// assert_eq!(result.data(), Some(&"created"));
    /// assert!(result.errors().is_empty());
    /// ```
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            status: OperationStatus::Ok,
            errors: ErrorMap::new(),
            data: Some(data),
        }
    }

    /// Successful outcome with no payload
    ///
    /// # Example
    ///
    /// ```rust
    /// use request_pipeline::envelope::CommandResult;
    ///
    /// let result = CommandResult::success_empty();
    /// assert!(result.is_success());
    /// assert!(result.data().is_none());
    /// ```
    #[must_use]
    pub fn success_empty() -> Self {
        Self {
            success: true,
            status: OperationStatus::Ok,
            errors: ErrorMap::new(),
            data: None,
        }
    }

    /// Validation failure carrying a field-keyed error map
    ///
    /// The given map is kept exactly: same keys, same per-field message
    /// order. No payload is set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use request_pipeline::envelope::{FieldErrors, OperationResult, OperationStatus};
    ///
    /// let mut errors = FieldErrors::new();
    /// errors.add("email", "Email format is invalid");
    ///
    /// let result: OperationResult<()> = OperationResult::fail(errors.into_map());
    /// assert!(!result.is_success());
    /// assert_eq!(result.status(), OperationStatus::BadRequest);
    /// assert_eq!(result.errors()["email"], vec!["Email format is invalid"]);
    /// ```
    #[must_use]
    pub fn fail(errors: ErrorMap) -> Self {
        Self {
            success: false,
            status: OperationStatus::BadRequest,
            errors,
            data: None,
        }
    }

    /// Validation failure with a single non-field-specific message
    ///
    /// Builds an error map with one entry keyed by [`GENERAL_ERROR_KEY`]
    /// containing the message, then delegates to [`fail`](Self::fail).
    #[must_use]
    pub fn fail_with_message(message: impl Into<String>) -> Self {
        let mut errors = ErrorMap::new();
        errors.insert(GENERAL_ERROR_KEY.to_string(), vec![message.into()]);
        Self::fail(errors)
    }

    /// Not-found outcome: no payload, no errors
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            success: false,
            status: OperationStatus::NotFound,
            errors: ErrorMap::new(),
            data: None,
        }
    }

    /// Whether the operation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Status classification of the outcome
    #[must_use]
    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// Field-keyed errors; empty unless the outcome is a validation failure
    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Borrow the payload, if any
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume the envelope, yielding the payload
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the payload to a new type, preserving status and errors
    ///
    /// # Example
    ///
    /// ```rust
    /// use request_pipeline::envelope::OperationResult;
    ///
    /// let result = OperationResult::success(42).map(|n| n.to_string());
    /// assert_eq!(result.data(), Some(&"42".to_string()));
    /// ```
    pub fn map<U, F>(self, f: F) -> OperationResult<U>
    where
        F: FnOnce(T) -> U,
    {
        OperationResult {
            success: self.success,
            status: self.status,
            errors: self.errors,
            data: self.data.map(f),
        }
    }
}

impl<T: Serialize> IntoResponse for OperationResult<T> {
    fn into_response(self) -> Response {
        match self.status {
            OperationStatus::Ok => match self.data {
                Some(data) => (StatusCode::OK, Json(data)).into_response(),
                None => StatusCode::OK.into_response(),
            },
            OperationStatus::BadRequest => {
                tracing::debug!(
                    error_count = self.errors.values().map(Vec::len).sum::<usize>(),
                    "returning validation failure"
                );
                (StatusCode::BAD_REQUEST, Json(self.errors)).into_response()
            }
            OperationStatus::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
