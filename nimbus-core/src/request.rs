//! Wire-level request and response

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::xml::{self, XmlNode};
use crate::Error;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_1_0_CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// A serialized API call, ready to be signed and sent
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// `POST /` with a form-encoded query protocol body
    pub fn query_protocol(body: &QueryBody) -> Self {
        let mut request = Self::new(Method::POST, "/");
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        request.body = Bytes::from(body.encode());
        request
    }

    /// `POST /` with an `X-Amz-Target` header and a JSON 1.0 body
    pub fn json_1_0(target: &str, body: &impl Serialize) -> Result<Self, Error> {
        let mut request = Self::new(Method::POST, "/");
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_1_0_CONTENT_TYPE));
        request.headers.insert(
            "x-amz-target",
            HeaderValue::from_str(target)
                .map_err(|_| Error::InvalidArgument(format!("invalid target {target:?}")))?,
        );
        request.body = Bytes::from(serde_json::to_vec(body)?);
        Ok(request)
    }
}

/// A raw response with a 2xx status
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub request_id: Option<String>,
}

impl Response {
    /// Root element of an XML body
    pub fn xml(&self) -> Result<XmlNode, Error> {
        xml::parse(&String::from_utf8_lossy(&self.body))
    }

    /// The `<{Operation}Result>` element of a query protocol response
    pub fn query_result(&self, operation: &str) -> Result<XmlNode, Error> {
        let mut root = self.xml()?;
        let name = format!("{operation}Result");
        match root.children.iter().position(|c| c.name == name) {
            Some(index) => Ok(root.children.swap_remove(index)),
            // Some operations answer without a result wrapper at all
            None => Ok(XmlNode::new(name)),
        }
    }

    /// Decode a JSON body; an empty body reads as `{}`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"{}")?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Builder for query protocol bodies
///
/// Lists use `Name.member.N`, flattened lists `Name.N` and maps
/// `Name.N.<key label>` / `Name.N.<value label>`; indexes start at 1.
#[derive(Debug, Clone)]
pub struct QueryBody {
    params: Vec<(String, String)>,
}

impl QueryBody {
    pub fn new(action: &str, version: &str) -> Self {
        Self {
            params: vec![
                ("Action".to_string(), action.to_string()),
                ("Version".to_string(), version.to_string()),
            ],
        }
    }

    pub fn param(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    pub fn opt_param(&mut self, name: impl Into<String>, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.param(name, value);
        }
        self
    }

    pub fn member_list<T: ToString>(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        for (index, value) in values.into_iter().enumerate() {
            self.param(format!("{name}.member.{}", index + 1), value);
        }
        self
    }

    pub fn flattened_list<T: ToString>(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        for (index, value) in values.into_iter().enumerate() {
            self.param(format!("{name}.{}", index + 1), value);
        }
        self
    }

    pub fn flattened_map<K: ToString, V: ToString>(
        &mut self,
        name: &str,
        key_label: &str,
        value_label: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self {
        for (index, (key, value)) in entries.into_iter().enumerate() {
            let prefix = format!("{name}.{}", index + 1);
            self.param(format!("{prefix}.{key_label}"), key);
            self.param(format!("{prefix}.{value_label}"), value);
        }
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the first parameter named `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `application/x-www-form-urlencoded` encoding, spaces as `+` and `*` as `%2A`
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
            .replace('*', "%2A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_query_body_encoding() {
        let mut body = QueryBody::new("DeleteQueue", "2012-11-05");
        body.param("QueueUrl", "https://sqs.us-east-1.amazonaws.com/123/my queue");

        assert_eq!(
            body.encode(),
            "Action=DeleteQueue&Version=2012-11-05&QueueUrl=https%3A%2F%2Fsqs.us-east-1.amazonaws.com%2F123%2Fmy+queue"
        );
    }

    #[test]
    fn test_asterisk_is_percent_encoded() {
        let mut body = QueryBody::new("ListStacks", "2010-05-15");
        body.param("NextToken", "a*b~c");

        assert_eq!(
            body.encode(),
            "Action=ListStacks&Version=2010-05-15&NextToken=a%2Ab%7Ec"
        );
    }

    #[test]
    fn test_lists_and_maps() {
        let attributes: BTreeMap<&str, &str> =
            [("DelaySeconds", "45"), ("VisibilityTimeout", "60")].into_iter().collect();

        let mut body = QueryBody::new("CreateQueue", "2012-11-05");
        body.member_list("StackStatusFilter", ["CREATE_COMPLETE", "UPDATE_COMPLETE"])
            .flattened_list("AttributeName", ["All"])
            .flattened_map("Attribute", "Name", "Value", attributes)
            .opt_param("Missing", None::<&str>);

        assert_eq!(body.get("StackStatusFilter.member.1"), Some("CREATE_COMPLETE"));
        assert_eq!(body.get("StackStatusFilter.member.2"), Some("UPDATE_COMPLETE"));
        assert_eq!(body.get("AttributeName.1"), Some("All"));
        assert_eq!(body.get("Attribute.1.Name"), Some("DelaySeconds"));
        assert_eq!(body.get("Attribute.2.Value"), Some("60"));
        assert_eq!(body.get("Missing"), None);
    }

    #[test]
    fn test_json_request_headers() {
        let request =
            Request::json_1_0("DynamoDB_20120810.ListTables", &serde_json::json!({"Limit": 5}))
                .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.headers["x-amz-target"], "DynamoDB_20120810.ListTables");
        assert_eq!(request.headers[CONTENT_TYPE], JSON_1_0_CONTENT_TYPE);
        assert_eq!(&request.body[..], br#"{"Limit":5}"#);
    }

    #[test]
    fn test_empty_json_body() {
        let response = Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            request_id: None,
        };
        let value: serde_json::Value = response.json().unwrap();
        assert!(value.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_query_result_wrapper() {
        let response = Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(
                b"<GetQueueUrlResponse><GetQueueUrlResult><QueueUrl>u</QueueUrl></GetQueueUrlResult><ResponseMetadata><RequestId>r</RequestId></ResponseMetadata></GetQueueUrlResponse>",
            ),
            request_id: None,
        };
        let result = response.query_result("GetQueueUrl").unwrap();
        assert_eq!(result.opt_string("QueueUrl").as_deref(), Some("u"));
    }
}
