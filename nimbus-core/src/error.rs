//! Client-side error types

use http::{HeaderMap, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::xml;

/// Well-known AWS error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    // Common
    AccessDenied,
    InvalidClientTokenId,
    SignatureDoesNotMatch,
    RequestExpired,
    ExpiredToken,
    InternalFailure,
    ServiceUnavailable,
    Throttling,
    ThrottlingException,
    RequestLimitExceeded,
    TooManyRequestsException,
    MissingParameter,
    InvalidParameterValue,

    // CloudFormation specific
    ValidationError,
    AlreadyExistsException,
    LimitExceededException,
    TokenAlreadyExistsException,

    // DynamoDB specific
    ResourceNotFoundException,
    ResourceInUseException,
    ValidationException,
    ConditionalCheckFailedException,
    ProvisionedThroughputExceededException,
    TransactionConflictException,
    InternalServerError,

    // SQS specific
    QueueDoesNotExist,
    QueueNameExists,
    QueueDeletedRecently,

    /// Any code this crate does not know about
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AccessDenied => "AccessDenied",
            Self::InvalidClientTokenId => "InvalidClientTokenId",
            Self::SignatureDoesNotMatch => "SignatureDoesNotMatch",
            Self::RequestExpired => "RequestExpired",
            Self::ExpiredToken => "ExpiredToken",
            Self::InternalFailure => "InternalFailure",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::Throttling => "Throttling",
            Self::ThrottlingException => "ThrottlingException",
            Self::RequestLimitExceeded => "RequestLimitExceeded",
            Self::TooManyRequestsException => "TooManyRequestsException",
            Self::MissingParameter => "MissingParameter",
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::ValidationError => "ValidationError",
            Self::AlreadyExistsException => "AlreadyExistsException",
            Self::LimitExceededException => "LimitExceededException",
            Self::TokenAlreadyExistsException => "TokenAlreadyExistsException",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ResourceInUseException => "ResourceInUseException",
            Self::ValidationException => "ValidationException",
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::ProvisionedThroughputExceededException => "ProvisionedThroughputExceededException",
            Self::TransactionConflictException => "TransactionConflictException",
            Self::InternalServerError => "InternalServerError",
            Self::QueueDoesNotExist => "AWS.SimpleQueueService.NonExistentQueue",
            Self::QueueNameExists => "QueueAlreadyExists",
            Self::QueueDeletedRecently => "AWS.SimpleQueueService.QueueDeletedRecently",
            Self::Other(code) => code,
        }
    }

    /// Map a wire error code to a known variant
    pub fn parse(code: &str) -> Self {
        match code {
            "AccessDenied" | "AccessDeniedException" => Self::AccessDenied,
            "InvalidClientTokenId" | "UnrecognizedClientException" => Self::InvalidClientTokenId,
            "SignatureDoesNotMatch" | "InvalidSignatureException" => Self::SignatureDoesNotMatch,
            "RequestExpired" => Self::RequestExpired,
            "ExpiredToken" | "ExpiredTokenException" => Self::ExpiredToken,
            "InternalFailure" => Self::InternalFailure,
            "ServiceUnavailable" | "ServiceUnavailableException" => Self::ServiceUnavailable,
            "Throttling" => Self::Throttling,
            "ThrottlingException" => Self::ThrottlingException,
            "RequestLimitExceeded" => Self::RequestLimitExceeded,
            "TooManyRequestsException" => Self::TooManyRequestsException,
            "MissingParameter" => Self::MissingParameter,
            "InvalidParameterValue" => Self::InvalidParameterValue,
            "ValidationError" => Self::ValidationError,
            "AlreadyExistsException" => Self::AlreadyExistsException,
            "LimitExceededException" => Self::LimitExceededException,
            "TokenAlreadyExistsException" => Self::TokenAlreadyExistsException,
            "ResourceNotFoundException" => Self::ResourceNotFoundException,
            "ResourceInUseException" => Self::ResourceInUseException,
            "ValidationException" => Self::ValidationException,
            "ConditionalCheckFailedException" => Self::ConditionalCheckFailedException,
            "ProvisionedThroughputExceededException" => Self::ProvisionedThroughputExceededException,
            "TransactionConflictException" => Self::TransactionConflictException,
            "InternalServerError" => Self::InternalServerError,
            "AWS.SimpleQueueService.NonExistentQueue" | "QueueDoesNotExist" => {
                Self::QueueDoesNotExist
            }
            "QueueAlreadyExists" | "QueueNameExists" => Self::QueueNameExists,
            "AWS.SimpleQueueService.QueueDeletedRecently" | "QueueDeletedRecently" => {
                Self::QueueDeletedRecently
            }
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_throttling(&self) -> bool {
        matches!(
            self,
            Self::Throttling
                | Self::ThrottlingException
                | Self::RequestLimitExceeded
                | Self::TooManyRequestsException
                | Self::ProvisionedThroughputExceededException
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned by the remote service
#[derive(Debug, Clone, Error)]
#[error("{code}: {message} (HTTP {status})")]
pub struct ServiceError {
    pub code: ErrorCode,
    pub message: String,
    /// `Sender` or `Receiver` for query protocol services
    pub kind: Option<String>,
    pub status: StatusCode,
    pub request_id: Option<String>,
}

impl ServiceError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            kind: None,
            status,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        if request_id.is_some() {
            self.request_id = request_id;
        }
        self
    }

    /// Parse a query protocol error document
    ///
    /// ```xml
    /// <ErrorResponse>
    ///   <Error><Type>Sender</Type><Code>ValidationError</Code><Message>...</Message></Error>
    ///   <RequestId>...</RequestId>
    /// </ErrorResponse>
    /// ```
    pub fn from_xml(status: StatusCode, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let Ok(root) = xml::parse(&text) else {
            return Self::unknown(status, &text);
        };

        let error = if root.name == "Error" {
            Some(&root)
        } else {
            root.child("Error")
        };

        let Some(error) = error else {
            return Self::unknown(status, &text);
        };

        let code = error
            .opt_string("Code")
            .map_or_else(|| ErrorCode::Other("Unknown".to_string()), |c| ErrorCode::parse(&c));

        Self {
            code,
            message: error.opt_string("Message").unwrap_or_default(),
            kind: error.opt_string("Type"),
            status,
            request_id: root.opt_string("RequestId").or_else(|| error.opt_string("RequestId")),
        }
    }

    /// Parse a JSON protocol error document
    ///
    /// The code comes from `__type` (stripping the `namespace#` prefix) or
    /// from the `x-amzn-ErrorType` header.
    pub fn from_json(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Self {
        let header_code = headers
            .get("x-amzn-errortype")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(':').next().unwrap_or(v).to_string());

        let value: Option<Value> = serde_json::from_slice(body).ok();

        let body_code = value
            .as_ref()
            .and_then(|v| v.get("__type").or_else(|| v.get("code")))
            .and_then(Value::as_str)
            .map(|t| t.rsplit('#').next().unwrap_or(t).to_string());

        let message = value
            .as_ref()
            .and_then(|v| v.get("message").or_else(|| v.get("Message")))
            .and_then(Value::as_str)
            .map(str::to_string);

        match header_code.or(body_code) {
            Some(code) => Self {
                code: ErrorCode::parse(&code),
                message: message.unwrap_or_default(),
                kind: None,
                status,
                request_id: None,
            },
            None => Self::unknown(status, &String::from_utf8_lossy(body)),
        }
    }

    fn unknown(status: StatusCode, body: &str) -> Self {
        Self::new(status, ErrorCode::Other("Unknown".to_string()), body.trim())
    }

    pub fn is_throttling(&self) -> bool {
        self.code.is_throttling() || self.status == StatusCode::TOO_MANY_REQUESTS
    }

    pub fn is_retryable(&self) -> bool {
        self.is_throttling() || self.status.is_server_error()
    }
}

/// Errors surfaced by every Nimbus client
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing parameter \"{field}\" for \"{operation}\". The value cannot be null.")]
    MissingParameter {
        operation: &'static str,
        field: &'static str,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No credentials configured")]
    MissingCredentials,

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Request signing failed: {0}")]
    Signing(#[from] nimbus_auth::SigV4Error),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Response checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("Prefetch task failed: {0}")]
    Prefetch(#[from] tokio::task::JoinError),

    #[error("Waiter {waiter} gave up after {attempts} attempts")]
    WaiterTimeout { waiter: &'static str, attempts: u32 },

    #[error("Waiter {waiter} reached a failure state: {reason}")]
    WaiterFailure { waiter: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// The service error, if this is one
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the service rejected the call with `code`
    pub fn is_code(&self, code: &ErrorCode) -> bool {
        self.as_service().is_some_and(|e| &e.code == code)
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_builder() && !e.is_decode(),
            Self::Service(e) => e.is_retryable(),
            Self::ChecksumMismatch { .. } => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_format() {
        let body = br#"<ErrorResponse xmlns="http://cloudformation.amazonaws.com/doc/2010-05-15/">
  <Error>
    <Type>Sender</Type>
    <Code>ValidationError</Code>
    <Message>Stack with id missing does not exist</Message>
  </Error>
  <RequestId>b9b4b068-3a41-11e5-94eb-example</RequestId>
</ErrorResponse>"#;

        let error = ServiceError::from_xml(StatusCode::BAD_REQUEST, body);
        assert_eq!(error.code, ErrorCode::ValidationError);
        assert_eq!(error.message, "Stack with id missing does not exist");
        assert_eq!(error.kind.as_deref(), Some("Sender"));
        assert_eq!(error.request_id.as_deref(), Some("b9b4b068-3a41-11e5-94eb-example"));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_sqs_error_code() {
        let body = br"<ErrorResponse><Error><Type>Sender</Type><Code>AWS.SimpleQueueService.NonExistentQueue</Code><Message>The specified queue does not exist.</Message></Error><RequestId>r-1</RequestId></ErrorResponse>";

        let error = ServiceError::from_xml(StatusCode::BAD_REQUEST, body);
        assert_eq!(error.code, ErrorCode::QueueDoesNotExist);
    }

    #[test]
    fn test_json_error_format() {
        let body = br#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"Requested resource not found"}"#;

        let error = ServiceError::from_json(StatusCode::BAD_REQUEST, &HeaderMap::new(), body);
        assert_eq!(error.code, ErrorCode::ResourceNotFoundException);
        assert_eq!(error.message, "Requested resource not found");
    }

    #[test]
    fn test_json_error_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-amzn-errortype",
            "ThrottlingException:http://internal.amazon.com/".parse().unwrap(),
        );

        let error = ServiceError::from_json(StatusCode::BAD_REQUEST, &headers, b"{}");
        assert_eq!(error.code, ErrorCode::ThrottlingException);
        assert!(error.is_retryable());
    }

    #[test]
    fn test_unparseable_error_body() {
        let error = ServiceError::from_json(
            StatusCode::BAD_GATEWAY,
            &HeaderMap::new(),
            b"<html>bad gateway</html>",
        );
        assert_eq!(error.code, ErrorCode::Other("Unknown".to_string()));
        assert!(error.message.contains("bad gateway"));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_missing_parameter_message() {
        let error = Error::MissingParameter {
            operation: "DeleteQueue",
            field: "QueueUrl",
        };
        assert_eq!(
            error.to_string(),
            "Missing parameter \"QueueUrl\" for \"DeleteQueue\". The value cannot be null."
        );
        assert!(!error.is_retryable());
    }
}
