//! AWS request signing for Nimbus
//!
//! Implements AWS Signature Version 4 for outgoing requests, plus the
//! parsing and verification side used by the test endpoint.

pub mod sigv4;

pub use sigv4::{
    canonical_query_string, parse_authorization_header, sign, verify_signature,
    AuthorizationHeader, ReceivedRequest, SigV4Error, SigningParams,
};
