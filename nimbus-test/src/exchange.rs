//! Canned responses and recorded requests

use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use nimbus_core::xml;

/// A response the mock endpoint plays back for one request
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    /// A successful query protocol response
    pub fn xml(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, "text/xml", body)
    }

    /// A successful JSON 1.0 response
    pub fn json(body: serde_json::Value) -> Self {
        Self::new(StatusCode::OK, "application/x-amz-json-1.0", body.to_string())
    }

    /// A query protocol `<ErrorResponse>`
    pub fn query_error(status: StatusCode, code: &str, message: &str) -> Self {
        let body = format!(
            "<ErrorResponse><Error><Type>Sender</Type><Code>{}</Code><Message>{}</Message></Error><RequestId>mock-request</RequestId></ErrorResponse>",
            xml::escape(code),
            xml::escape(message)
        );
        Self::new(status, "text/xml", body)
    }

    /// A JSON protocol error with a namespaced `__type`
    pub fn json_error(status: StatusCode, code: &str, message: &str) -> Self {
        let body = serde_json::json!({
            "__type": format!("com.amazonaws.dynamodb.v20120810#{code}"),
            "message": message,
        });
        Self::new(status, "application/x-amz-json-1.0", body.to_string())
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_lowercase(), value.to_string()));
        self
    }

    /// Add the `x-amz-crc32` checksum of the body
    pub fn with_crc32(self) -> Self {
        let checksum = crc32fast::hash(self.body.as_bytes()).to_string();
        self.with_header("x-amz-crc32", &checksum)
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("text/xml"));

        (self.status, headers, self.body).into_response()
    }
}

/// A request as received by the mock endpoint
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// `Action` form parameter, or the operation part of `X-Amz-Target`
    pub operation: String,
    pub method: String,
    pub path: String,
    /// Lowercase header names, in arrival order
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    /// Outcome of SigV4 verification against the test credentials
    pub signature: Result<(), String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded form parameters of a query protocol body
    pub fn form(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(&self.body).into_owned().collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// JSON body, `Null` when it is not JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_is_escaped() {
        let response = MockResponse::query_error(StatusCode::BAD_REQUEST, "ValidationError", "a < b");
        assert!(response.body.contains("<Message>a &lt; b</Message>"));
    }

    #[test]
    fn test_recorded_form_params() {
        let request = RecordedRequest {
            operation: "DeleteQueue".to_string(),
            method: "POST".to_string(),
            path: "/".to_string(),
            headers: vec![("content-type".to_string(), "application/x-www-form-urlencoded".to_string())],
            body: Bytes::from_static(b"Action=DeleteQueue&QueueUrl=http%3A%2F%2Fq"),
            signature: Ok(()),
        };
        assert_eq!(request.param("QueueUrl").as_deref(), Some("http://q"));
        assert_eq!(request.header("Content-Type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(request.json(), serde_json::Value::Null);
    }
}
