//! Request ID handling

use http::HeaderMap;
use uuid::Uuid;

/// AWS-style request ID as reported by a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId {
    /// Primary request ID (x-amzn-requestid or x-amz-request-id)
    pub id: String,
    /// Extended request ID (x-amz-id-2), when the service sends one
    pub extended_id: Option<String>,
}

impl RequestId {
    /// Read the request ID pair from response headers
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let id = header("x-amzn-requestid").or_else(|| header("x-amz-request-id"))?;

        Some(Self {
            id,
            extended_id: header("x-amz-id-2"),
        })
    }
}

/// Generate the `amz-sdk-invocation-id` shared by every attempt of one call
pub fn invocation_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_id_generation() {
        let id1 = invocation_id();
        let id2 = invocation_id();

        // IDs should be unique
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
    }

    #[test]
    fn test_request_id_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-request-id", "4442587FB7D0A2F9".parse().unwrap());
        headers.insert("x-amz-id-2", "vlR7PnpV2Ce81l0PRw6jlUpck7Jo5ZsQjryTjKlc5aLWGVHPZLj5NeC6qMa0emYBDXOo6QBU0Wo=".parse().unwrap());

        let id = RequestId::from_headers(&headers).unwrap();
        assert_eq!(id.id, "4442587FB7D0A2F9");
        assert!(id.extended_id.is_some());
    }

    #[test]
    fn test_json_services_use_amzn_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-amzn-requestid", "TQ1R9KS5HA4MDKD6QBJ1VV6KJFVV4KQNSO5AEMVJF66Q9ASUAAJG".parse().unwrap());

        let id = RequestId::from_headers(&headers).unwrap();
        assert_eq!(id.id, "TQ1R9KS5HA4MDKD6QBJ1VV6KJFVV4KQNSO5AEMVJF66Q9ASUAAJG");
        assert_eq!(id.extended_id, None);
    }

    #[test]
    fn test_missing_request_id() {
        assert_eq!(RequestId::from_headers(&HeaderMap::new()), None);
    }
}
