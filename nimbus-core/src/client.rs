//! Signed HTTP transport shared by the service clients

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use http::header::{HeaderValue, HOST, USER_AGENT};
use http::HeaderMap;
use nimbus_auth::SigningParams;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::ServiceError;
use crate::operation::Operation;
use crate::request::{Request, Response};
use crate::request_id::{invocation_id, RequestId};
use crate::retry::RetryPolicy;
use crate::Error;

const USER_AGENT_VALUE: &str = concat!("nimbus/", env!("CARGO_PKG_VERSION"));

/// How a service serializes requests and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Form-encoded `Action=...` bodies, XML responses
    Query,
    /// `X-Amz-Target` plus JSON bodies
    Json,
}

/// Static description of one AWS service
#[derive(Debug, Clone, Copy)]
pub struct ServiceMetadata {
    /// Service name in the SigV4 credential scope
    pub signing_name: &'static str,
    /// First label of the default endpoint host
    pub endpoint_prefix: &'static str,
    pub protocol: Protocol,
    pub api_version: &'static str,
}

/// Low-level client for one service: builds URLs, signs, retries
#[derive(Clone)]
pub struct AwsClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    service: ServiceMetadata,
    config: ClientConfig,
    endpoint: Url,
    credentials: Option<Credentials>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for AwsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsClient")
            .field("service", &self.inner.service.signing_name)
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("region", &self.inner.config.region)
            .finish()
    }
}

impl AwsClient {
    /// Client with credentials from `config`, falling back to the `AWS_*` environment
    pub fn new(service: ServiceMetadata, config: ClientConfig) -> Result<Self, Error> {
        let credentials = Credentials::resolve(&config);
        Self::with_credentials(service, config, credentials)
    }

    /// Client with the given credentials; calls fail with
    /// [`Error::MissingCredentials`] when there are none
    pub fn with_credentials(
        service: ServiceMetadata,
        config: ClientConfig,
        credentials: Option<Credentials>,
    ) -> Result<Self, Error> {
        let endpoint = resolve_endpoint(&service, &config)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let retry = RetryPolicy::with_max_attempts(config.max_attempts);

        debug!(
            service = service.signing_name,
            endpoint = %endpoint,
            region = %config.region,
            "Created client"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                service,
                config,
                endpoint,
                credentials,
                retry,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub fn service(&self) -> &ServiceMetadata {
        &self.inner.service
    }

    /// Serialize, send and parse one operation
    pub async fn call<O: Operation>(&self, operation: O) -> Result<O::Output, Error> {
        let request = operation.request()?;
        let response = self.send(O::OPERATION, request).await?;
        O::parse(response)
    }

    /// Send a request, retrying transient failures
    pub async fn send(&self, operation: &'static str, request: Request) -> Result<Response, Error> {
        let credentials = self
            .inner
            .credentials
            .as_ref()
            .ok_or(Error::MissingCredentials)?;
        let invocation_id = invocation_id();
        let retry = &self.inner.retry;

        let mut attempt = 1;
        loop {
            match self
                .attempt(operation, &request, credentials, &invocation_id, attempt)
                .await
            {
                Err(err) if err.is_retryable() && retry.should_retry(attempt) => {
                    let delay = retry.delay(attempt);
                    warn!(
                        service = self.inner.service.signing_name,
                        operation,
                        attempt,
                        ?delay,
                        error = %err,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn attempt(
        &self,
        operation: &'static str,
        request: &Request,
        credentials: &Credentials,
        invocation_id: &str,
        attempt: u32,
    ) -> Result<Response, Error> {
        let inner = &*self.inner;

        let mut url = inner.endpoint.clone();
        url.set_path(&request.path);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        let mut headers = request.headers.clone();
        headers.insert(HOST, header_value(&host_header(&url))?);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert("amz-sdk-invocation-id", header_value(invocation_id)?);
        headers.insert(
            "amz-sdk-request",
            header_value(&format!("attempt={}; max={}", attempt, inner.retry.max_attempts))?,
        );

        let params = SigningParams {
            access_key: &credentials.access_key_id,
            secret_key: &credentials.secret_access_key,
            session_token: credentials.session_token.as_deref(),
            region: &inner.config.region,
            service: inner.service.signing_name,
            time: Utc::now(),
        };
        nimbus_auth::sign(
            &params,
            request.method.as_str(),
            url.path(),
            &request.query,
            &mut headers,
            &request.body,
        )?;

        debug!(
            service = inner.service.signing_name,
            operation,
            attempt,
            url = %url,
            "Sending request"
        );

        let response = inner
            .http
            .request(request.method.clone(), url)
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let request_id = RequestId::from_headers(&headers).map(|id| id.id);

        if !status.is_success() {
            let error = match inner.service.protocol {
                Protocol::Query => ServiceError::from_xml(status, &body),
                Protocol::Json => ServiceError::from_json(status, &headers, &body),
            }
            .with_request_id(request_id);

            debug!(
                operation,
                status = status.as_u16(),
                code = %error.code,
                request_id = ?error.request_id,
                "Service returned an error"
            );
            return Err(error.into());
        }

        verify_crc32(&headers, &body)?;

        Ok(Response {
            status,
            headers,
            body,
            request_id,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidArgument(format!("invalid header value {value:?}")))
}

/// Endpoint override, or `https://{prefix}.{region}.amazonaws.com`
fn resolve_endpoint(service: &ServiceMetadata, config: &ClientConfig) -> Result<Url, Error> {
    if let Some(endpoint) = &config.endpoint {
        return Ok(Url::parse(endpoint)?);
    }

    if config.region.is_empty() {
        return Err(Error::InvalidArgument("region must not be empty".to_string()));
    }

    let suffix = if config.region.starts_with("cn-") {
        "amazonaws.com.cn"
    } else {
        "amazonaws.com"
    };
    Ok(Url::parse(&format!(
        "https://{}.{}.{}",
        service.endpoint_prefix, config.region, suffix
    ))?)
}

/// `Host` header value; the port is only included when it is not the default
fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Check the body against `x-amz-crc32`, when the service sends one
fn verify_crc32(headers: &HeaderMap, body: &[u8]) -> Result<(), Error> {
    let Some(expected) = headers
        .get("x-amz-crc32")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u32>().ok())
    else {
        return Ok(());
    };

    let actual = crc32fast::hash(body);
    if actual != expected {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQS: ServiceMetadata = ServiceMetadata {
        signing_name: "sqs",
        endpoint_prefix: "sqs",
        protocol: Protocol::Query,
        api_version: "2012-11-05",
    };

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default().with_region("eu-west-1");
        let url = resolve_endpoint(&SQS, &config).unwrap();
        assert_eq!(url.as_str(), "https://sqs.eu-west-1.amazonaws.com/");

        let config = ClientConfig::default().with_region("cn-north-1");
        let url = resolve_endpoint(&SQS, &config).unwrap();
        assert_eq!(url.host_str(), Some("sqs.cn-north-1.amazonaws.com.cn"));
    }

    #[test]
    fn test_endpoint_override() {
        let config = ClientConfig::default().with_endpoint("http://localhost:4566");
        let url = resolve_endpoint(&SQS, &config).unwrap();
        assert_eq!(host_header(&url), "localhost:4566");

        let config = ClientConfig::default().with_endpoint("not a url");
        assert!(matches!(
            resolve_endpoint(&SQS, &config),
            Err(Error::Endpoint(_))
        ));
    }

    #[test]
    fn test_host_header_omits_default_port() {
        let url = Url::parse("https://dynamodb.us-east-1.amazonaws.com:443/").unwrap();
        assert_eq!(host_header(&url), "dynamodb.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_crc32_check() {
        let body = br#"{"TableNames":[]}"#;
        let mut headers = HeaderMap::new();
        assert!(verify_crc32(&headers, body).is_ok());

        headers.insert(
            "x-amz-crc32",
            HeaderValue::from_str(&crc32fast::hash(body).to_string()).unwrap(),
        );
        assert!(verify_crc32(&headers, body).is_ok());

        headers.insert("x-amz-crc32", HeaderValue::from_static("1"));
        assert!(matches!(
            verify_crc32(&headers, body),
            Err(Error::ChecksumMismatch { expected: 1, .. })
        ));
    }
}
