//! Concurrent fetch of a view's endpoints.
//!
//! A view describes what it needs as a list of [`Endpoint`]s.
//! [`fetch_batch`] issues them all at once and waits for every one to
//! settle. A failed required endpoint fails the batch; a failed optional
//! endpoint is logged and leaves an empty slot.

use futures::future::join_all;
use serde_json::Value;

use crate::api::{ApiError, MlApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One request of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    /// Path relative to the API base URL, query string included.
    pub path: String,
    /// JSON body; `None` sends no body.
    pub body: Option<Value>,
    pub required: bool,
}

impl Endpoint {
    /// A required GET.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            required: true,
        }
    }

    /// A required POST without a body.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(path)
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark the endpoint as optional: its failure degrades to `None`.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Bodies of a settled batch, index-aligned with the endpoint list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResponse {
    bodies: Vec<Option<Value>>,
}

static ABSENT: Value = Value::Null;

impl BatchResponse {
    /// Body of a required endpoint. Out-of-range indices read as JSON
    /// `null`, which every normalizer rejects.
    pub fn required(&self, index: usize) -> &Value {
        self.optional(index).unwrap_or(&ABSENT)
    }

    /// Body of an optional endpoint, `None` if it failed.
    pub fn optional(&self, index: usize) -> Option<&Value> {
        self.bodies.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Fetch every endpoint concurrently.
///
/// Waits for all requests before assembling the result, so a required
/// failure never yields partial data. The first required failure in
/// list order is returned.
pub async fn fetch_batch(api: &MlApi, endpoints: &[Endpoint]) -> Result<BatchResponse, ApiError> {
    let results = join_all(endpoints.iter().map(|endpoint| api.send(endpoint))).await;
    collect_results(endpoints, results)
}

fn collect_results(
    endpoints: &[Endpoint],
    results: Vec<Result<Value, ApiError>>,
) -> Result<BatchResponse, ApiError> {
    let mut bodies = Vec::with_capacity(results.len());
    for (endpoint, result) in endpoints.iter().zip(results) {
        match result {
            Ok(body) => bodies.push(Some(body)),
            Err(e) if endpoint.required => {
                tracing::warn!(path = %endpoint.path, error = %e, "Required endpoint failed");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    path = %endpoint.path,
                    error = %e,
                    "Optional endpoint failed, continuing without it"
                );
                bodies.push(None);
            }
        }
    }
    Ok(BatchResponse { bodies })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn builders() {
        let e = Endpoint::post("/api/x/").with_body(json!({"a": 1})).optional();
        assert_eq!(e.method, Method::Post);
        assert_eq!(e.body, Some(json!({"a": 1})));
        assert!(!e.required);
        assert!(Endpoint::get("/api/y").required);
    }

    #[test]
    fn optional_failure_leaves_empty_slot() {
        let endpoints = [Endpoint::get("/a"), Endpoint::get("/b").optional()];
        let results = vec![Ok(json!({"ok": true})), Err(status(503))];
        let batch = collect_results(&endpoints, results).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.required(0), &json!({"ok": true}));
        assert_eq!(batch.optional(1), None);
        assert_eq!(batch.required(5), &Value::Null);
    }

    #[test]
    fn first_required_failure_fails_batch() {
        let endpoints = [Endpoint::get("/a").optional(), Endpoint::get("/b"), Endpoint::get("/c")];
        let result = collect_results(
            &endpoints,
            vec![Err(status(500)), Err(status(404)), Err(status(502))],
        );
        assert_matches!(result, Err(ApiError::Status { status: 404, .. }));
    }
}
