//! AWS Signature Version 4 implementation

use chrono::{DateTime, NaiveDateTime, Utc};
use hmac::{Hmac, Mac};
use http::header::{HeaderValue, AUTHORIZATION};
use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

const MAX_SKEW_MINUTES: i64 = 15;

/// Characters left alone by SigV4 URI encoding
const URI_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Errors during signing or signature verification
#[derive(Debug, Error)]
pub enum SigV4Error {
    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Missing credential")]
    MissingCredential,

    #[error("Invalid credential format")]
    InvalidCredentialFormat,

    #[error("Missing signed headers")]
    MissingSignedHeaders,

    #[error("Missing signature")]
    MissingSignature,

    #[error("Missing or invalid x-amz-date header")]
    InvalidDate,

    #[error("Request time too skewed")]
    RequestTimeTooSkewed,

    #[error("Signature mismatch")]
    SignatureMismatch,

    #[error("Header value cannot be sent: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

/// Who signs, for which region and service, and when
#[derive(Debug, Clone)]
pub struct SigningParams<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub session_token: Option<&'a str>,
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
}

/// Parsed SigV4 authorization header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    pub algorithm: String,
    pub access_key: String,
    pub date: String,
    pub region: String,
    pub service: String,
    pub signed_headers: Vec<String>,
    pub signature: String,
}

/// Read the credential scope, signed headers and signature out of an
/// `Authorization` header value, e.g.
///
/// ```text
/// AWS4-HMAC-SHA256 Credential=AKID/20240102/us-east-1/sqs/aws4_request,
///     SignedHeaders=host;x-amz-date, Signature=<hex>
/// ```
pub fn parse_authorization_header(header: &str) -> Result<AuthorizationHeader, SigV4Error> {
    let (algorithm, fields) = header
        .trim()
        .split_once(' ')
        .ok_or(SigV4Error::InvalidAuthFormat)?;

    let field = |name: &str| {
        fields
            .split(',')
            .filter_map(|f| f.trim().split_once('='))
            .find_map(|(k, v)| (k == name).then_some(v))
    };

    let credential = field("Credential").ok_or(SigV4Error::MissingCredential)?;
    let signed_headers = field("SignedHeaders").ok_or(SigV4Error::MissingSignedHeaders)?;
    let signature = field("Signature").ok_or(SigV4Error::MissingSignature)?;

    let scope: Vec<&str> = credential.split('/').collect();
    let [access_key, date, region, service, "aws4_request"] = scope.as_slice() else {
        return Err(SigV4Error::InvalidCredentialFormat);
    };

    Ok(AuthorizationHeader {
        algorithm: algorithm.to_string(),
        access_key: (*access_key).to_string(),
        date: (*date).to_string(),
        region: (*region).to_string(),
        service: (*service).to_string(),
        signed_headers: signed_headers.split(';').map(str::to_string).collect(),
        signature: signature.to_string(),
    })
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // new_from_slice only fails for fixed-size keys, which HMAC does not have
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// `kSigning`: the secret chained through date, region, service and terminator
fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    [date, region, service, "aws4_request"]
        .iter()
        .fold(format!("AWS4{secret_key}").into_bytes(), |key, part| {
            hmac_sha256(&key, part.as_bytes())
        })
}

fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, URI_ENCODE).to_string()
}

/// URI-encode every path segment, keeping the slashes
fn canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

/// Encode and sort query parameters
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (uri_encode(k), uri_encode(v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Create the canonical request string
fn create_canonical_request(
    method: &str,
    path: &str,
    query_string: &str,
    headers: &[(String, String)],
    signed_headers: &[String],
    payload_hash: &str,
) -> String {
    let canonical_headers: String = signed_headers
        .iter()
        .map(|h| {
            let value = headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case(h))
                .map(|(_, v)| v.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join(",");
            format!("{}:{}\n", h.to_lowercase(), value)
        })
        .collect();

    let signed_headers_str = signed_headers.join(";");

    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, path, query_string, canonical_headers, signed_headers_str, payload_hash
    )
}

/// Create the string to sign
fn create_string_to_sign(
    algorithm: &str,
    timestamp: &str,
    scope: &str,
    canonical_request: &str,
) -> String {
    let canonical_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
    format!(
        "{}\n{}\n{}\n{}",
        algorithm, timestamp, scope, canonical_hash
    )
}

fn compute_signature(
    secret_key: &str,
    amz_date: &str,
    scope: &Scope<'_>,
    canonical_request: &str,
) -> String {
    let string_to_sign = create_string_to_sign(ALGORITHM, amz_date, &scope.to_string(), canonical_request);
    let key = derive_signing_key(secret_key, scope.date, scope.region, scope.service);
    hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()))
}

struct Scope<'a> {
    date: &'a str,
    region: &'a str,
    service: &'a str,
}

impl std::fmt::Display for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}/aws4_request", self.date, self.region, self.service)
    }
}

fn should_sign(name: &str) -> bool {
    name == "host" || name == "content-type" || name.starts_with("x-amz-")
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect()
}

/// Sign a request in place
///
/// Adds `x-amz-date`, `x-amz-security-token` (for temporary credentials)
/// and `Authorization`. Signs `host`, `content-type` and every `x-amz-*`
/// header present, so `host` must already be set.
pub fn sign(
    params: &SigningParams<'_>,
    method: &str,
    path: &str,
    query: &[(String, String)],
    headers: &mut HeaderMap,
    payload: &[u8],
) -> Result<(), SigV4Error> {
    let amz_date = params.time.format(AMZ_DATE_FORMAT).to_string();
    let date = params.time.format("%Y%m%d").to_string();

    headers.remove(AUTHORIZATION);
    headers.insert("x-amz-date", HeaderValue::from_str(&amz_date)?);
    if let Some(token) = params.session_token {
        headers.insert("x-amz-security-token", HeaderValue::from_str(token)?);
    }

    let pairs = header_pairs(headers);
    let mut signed_headers: Vec<String> = pairs
        .iter()
        .map(|(k, _)| k.clone())
        .filter(|k| should_sign(k))
        .collect();
    signed_headers.sort();
    signed_headers.dedup();

    let payload_hash = hex::encode(Sha256::digest(payload));
    let canonical_request = create_canonical_request(
        method,
        &canonical_uri(path),
        &canonical_query_string(query),
        &pairs,
        &signed_headers,
        &payload_hash,
    );
    trace!(canonical_request = %canonical_request, "SigV4 canonical request");

    let scope = Scope {
        date: &date,
        region: params.region,
        service: params.service,
    };
    let signature = compute_signature(params.secret_key, &amz_date, &scope, &canonical_request);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM,
        params.access_key,
        scope,
        signed_headers.join(";"),
        signature
    );
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&authorization)?);

    Ok(())
}

/// A received request, as needed to check its signature
#[derive(Debug, Clone, Copy)]
pub struct ReceivedRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a [(String, String)],
    pub headers: &'a [(String, String)],
    pub payload: &'a [u8],
}

/// Verify a SigV4 signature against the caller's secret key
pub fn verify_signature(
    request: &ReceivedRequest<'_>,
    auth_header: &AuthorizationHeader,
    secret_key: &str,
    now: &DateTime<Utc>,
) -> Result<(), SigV4Error> {
    if auth_header.algorithm != ALGORITHM {
        return Err(SigV4Error::InvalidAuthFormat);
    }

    let amz_date = request
        .headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("x-amz-date"))
        .map(|(_, v)| v.as_str())
        .ok_or(SigV4Error::InvalidDate)?;

    let timestamp = NaiveDateTime::parse_from_str(amz_date, AMZ_DATE_FORMAT)
        .map_err(|_| SigV4Error::InvalidDate)?
        .and_utc();
    if (*now - timestamp).num_minutes().abs() > MAX_SKEW_MINUTES {
        return Err(SigV4Error::RequestTimeTooSkewed);
    }
    if !amz_date.starts_with(&auth_header.date) {
        return Err(SigV4Error::InvalidCredentialFormat);
    }

    let payload_hash = hex::encode(Sha256::digest(request.payload));
    let canonical_request = create_canonical_request(
        request.method,
        &canonical_uri(request.path),
        &canonical_query_string(request.query),
        request.headers,
        &auth_header.signed_headers,
        &payload_hash,
    );

    let scope = Scope {
        date: &auth_header.date,
        region: &auth_header.region,
        service: &auth_header.service,
    };
    let expected = compute_signature(secret_key, amz_date, &scope, &canonical_request);

    if expected == auth_header.signature {
        Ok(())
    } else {
        Err(SigV4Error::SignatureMismatch)
    }
}
