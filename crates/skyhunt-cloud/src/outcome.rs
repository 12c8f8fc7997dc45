//! Attempt outcome taxonomy and failure classification
//!
//! Every launch attempt resolves to exactly one [`AttemptOutcome`]. The
//! classification table in [`classify`] is the single point of truth for
//! mapping raw API failures into the taxonomy; the engine never inspects
//! raw errors itself.

use serde::{Deserialize, Serialize};

/// Raw failure returned by a provider's launch call
///
/// Providers normalize whatever their transport gives them (service error
/// body, CLI stderr, connection failure) into this shape before it reaches
/// the classifier. A missing `status` means the request never produced an
/// HTTP response (connection refused, timeout, DNS).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    /// HTTP status, if a response was received
    pub status: Option<u16>,

    /// Service error code (e.g. "OutOfHostCapacity", "LimitExceeded")
    pub code: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: Option<u16>, code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    /// Failure with no HTTP response at all (network-level)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.status, &self.code) {
            (Some(status), Some(code)) => write!(f, "[{status} {code}] {}", self.message),
            (Some(status), None) => write!(f, "[{status}] {}", self.message),
            (None, Some(code)) => write!(f, "[{code}] {}", self.message),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

/// Classified result of a single launch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Instance created; carries the new instance OCID
    Success(String),

    /// The allocator has no capacity for this placement right now.
    /// Expected steady state for free-tier shapes; the pass moves on to
    /// the next candidate.
    CapacityExhausted,

    /// Network fault, timeout, or throttling. Retryable by moving to the
    /// next candidate; no in-place retry.
    TransientFault(String),

    /// Authentication, malformed request, or account-level quota. Every
    /// remaining candidate would fail identically, so the pass aborts.
    FatalConfig(String),
}

impl AttemptOutcome {
    /// Short label used in per-attempt log lines
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::CapacityExhausted => "capacity",
            AttemptOutcome::TransientFault(_) => "transient",
            AttemptOutcome::FatalConfig(_) => "fatal",
        }
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Success(id) => write!(f, "success ({id})"),
            AttemptOutcome::CapacityExhausted => write!(f, "capacity exhausted"),
            AttemptOutcome::TransientFault(detail) => write!(f, "transient fault: {detail}"),
            AttemptOutcome::FatalConfig(detail) => write!(f, "configuration error: {detail}"),
        }
    }
}

/// Map a raw API failure to its outcome class.
///
/// Total over every failure shape a provider can produce. Routing rules,
/// in order:
///
/// 1. capacity signatures -> `CapacityExhausted`
/// 2. throttling, timeouts, connection-level failures -> `TransientFault`
/// 3. auth / bad request / account quota -> `FatalConfig`
/// 4. remaining 5xx -> `TransientFault` (server-side, independent of our
///    request)
/// 5. everything else -> `FatalConfig` (persistent until a human looks)
pub fn classify(failure: &ApiFailure) -> AttemptOutcome {
    let code = failure.code.as_deref().unwrap_or("");
    let message = failure.message.to_lowercase();

    if is_capacity(code, &message) {
        return AttemptOutcome::CapacityExhausted;
    }

    if is_transient(failure.status, code, &message) {
        return AttemptOutcome::TransientFault(failure.to_string());
    }

    if is_fatal(failure.status, code) {
        return AttemptOutcome::FatalConfig(failure.to_string());
    }

    match failure.status {
        Some(status) if status >= 500 => AttemptOutcome::TransientFault(failure.to_string()),
        _ => AttemptOutcome::FatalConfig(failure.to_string()),
    }
}

fn is_capacity(code: &str, message: &str) -> bool {
    match code {
        "OutOfHostCapacity" | "OutOfCapacity" => return true,
        // Shape-scoped limit errors fluctuate with free-tier availability
        // and behave like capacity; account-wide limits do not.
        "LimitExceeded" if message.contains("shape") => return true,
        _ => {}
    }
    message.contains("out of host capacity") || message.contains("out of capacity")
}

fn is_transient(status: Option<u16>, code: &str, message: &str) -> bool {
    if status.is_none() {
        // No HTTP response: connection refused, DNS, timeout.
        return true;
    }
    if status == Some(429) || code == "TooManyRequests" {
        return true;
    }
    message.contains("timed out") || message.contains("timeout")
}

fn is_fatal(status: Option<u16>, code: &str) -> bool {
    matches!(
        code,
        "NotAuthenticated"
            | "NotAuthorizedOrNotFound"
            | "InvalidParameter"
            | "CannotParseRequest"
            | "LimitExceeded"
            | "QuotaExceeded"
    ) || matches!(status, Some(400..=499))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: Option<u16>, code: Option<&str>, message: &str) -> ApiFailure {
        ApiFailure::new(status, code, message)
    }

    #[test]
    fn test_out_of_host_capacity_is_capacity() {
        let outcome = classify(&failure(
            Some(500),
            Some("OutOfHostCapacity"),
            "Out of host capacity.",
        ));
        assert_eq!(outcome, AttemptOutcome::CapacityExhausted);
    }

    #[test]
    fn test_capacity_message_without_code_is_capacity() {
        let outcome = classify(&failure(
            Some(500),
            Some("InternalError"),
            "Out of host capacity in AD-1",
        ));
        assert_eq!(outcome, AttemptOutcome::CapacityExhausted);
    }

    #[test]
    fn test_shape_limit_is_capacity() {
        let outcome = classify(&failure(
            Some(400),
            Some("LimitExceeded"),
            "The following service limits were exceeded: standard-a1-core-count. \
             Request a service limit increase for this shape.",
        ));
        assert_eq!(outcome, AttemptOutcome::CapacityExhausted);
    }

    #[test]
    fn test_account_limit_is_fatal() {
        let outcome = classify(&failure(
            Some(400),
            Some("LimitExceeded"),
            "Max number of instances for this tenancy exceeded",
        ));
        assert!(matches!(outcome, AttemptOutcome::FatalConfig(_)));
    }

    #[test]
    fn test_throttling_is_transient() {
        let outcome = classify(&failure(
            Some(429),
            Some("TooManyRequests"),
            "Too many requests for the user",
        ));
        assert!(matches!(outcome, AttemptOutcome::TransientFault(_)));
    }

    #[test]
    fn test_connection_failure_is_transient() {
        let outcome = classify(&ApiFailure::transport("connection refused"));
        assert!(matches!(outcome, AttemptOutcome::TransientFault(_)));
    }

    #[test]
    fn test_timeout_is_transient() {
        let outcome = classify(&failure(Some(504), None, "request timed out"));
        assert!(matches!(outcome, AttemptOutcome::TransientFault(_)));
    }

    #[test]
    fn test_not_authenticated_is_fatal() {
        let outcome = classify(&failure(
            Some(401),
            Some("NotAuthenticated"),
            "The required information to complete authentication was not provided",
        ));
        assert!(matches!(outcome, AttemptOutcome::FatalConfig(_)));
    }

    #[test]
    fn test_not_authorized_is_fatal() {
        let outcome = classify(&failure(
            Some(404),
            Some("NotAuthorizedOrNotFound"),
            "Authorization failed or requested resource not found",
        ));
        assert!(matches!(outcome, AttemptOutcome::FatalConfig(_)));
    }

    #[test]
    fn test_invalid_parameter_is_fatal() {
        let outcome = classify(&failure(
            Some(400),
            Some("InvalidParameter"),
            "subnetId is invalid",
        ));
        assert!(matches!(outcome, AttemptOutcome::FatalConfig(_)));
    }

    #[test]
    fn test_unknown_server_error_is_transient() {
        let outcome = classify(&failure(Some(502), None, "bad gateway"));
        assert!(matches!(outcome, AttemptOutcome::TransientFault(_)));
    }

    #[test]
    fn test_unknown_client_error_is_fatal() {
        let outcome = classify(&failure(Some(409), Some("Conflict"), "conflicting operation"));
        assert!(matches!(outcome, AttemptOutcome::FatalConfig(_)));
    }

    #[test]
    fn test_display_includes_status_and_code() {
        let f = failure(Some(500), Some("OutOfHostCapacity"), "no capacity");
        assert_eq!(f.to_string(), "[500 OutOfHostCapacity] no capacity");
    }

    #[test]
    fn test_labels() {
        assert_eq!(AttemptOutcome::CapacityExhausted.label(), "capacity");
        assert_eq!(AttemptOutcome::Success("id".into()).label(), "success");
    }
}
