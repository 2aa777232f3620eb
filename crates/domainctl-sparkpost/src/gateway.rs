// # API Gateway
//
// Builds and sends authenticated requests to the SparkPost REST API and
// normalizes transport and status failures into `domainctl_core::Error`.
//
// ## Constraints
//
// - Exactly one network round trip per `send` call
// - NO retry logic, NO backoff (owned by the host)
// - NO caching, NO background tasks
// - API key never appears in logs, errors or Debug output
//
// ## Request Shape
//
// Paths are given as segments. Each segment is percent-encoded on its own,
// so a domain can never address a different resource than the one named.
//
// ```http
// POST {api_url}/{segment}/{segment}...
// Authorization: <api key>
// Content-Type: application/json
// X-MSYS-SUBACCOUNT: <id>        (only when a positive subaccount is given)
//
// {json body, only when one is given}
// ```

use std::time::Duration;

use domainctl_core::config::ProviderConfig;
use domainctl_core::resources::subaccount_scope;
use domainctl_core::{Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

/// Header scoping a request to one subaccount
pub const SUBACCOUNT_HEADER: &str = "X-MSYS-SUBACCOUNT";

/// Decoded response of a successful call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code (always the caller's expected code)
    pub status: u16,
    /// Decoded JSON body; `Value::Null` when the body was empty
    pub body: Value,
}

impl ApiResponse {
    /// The `results` object of a SparkPost envelope (`Null` if missing)
    pub fn results(&self) -> &Value {
        &self.body["results"]
    }
}

/// Shared, stateless transport for one configured endpoint + credential
///
/// Built once per provider session and handed to every reconciler behind an
/// `Arc`. The underlying `reqwest::Client` pools connections internally and
/// is safe for reuse across sequential calls.
pub struct ApiGateway {
    config: ProviderConfig,
    base_url: Url,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("api_url", &self.config.api_url)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl ApiGateway {
    /// Create a gateway from a validated provider configuration
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the configuration is invalid
    /// - `Error::Transport` if the HTTP client cannot be built
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.api_url)
            .map_err(|e| Error::config(format!("api_url is not a valid URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "api_url cannot carry request paths: {}",
                config.api_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Base URL requests are joined onto
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Join path segments onto the base URL, encoding each one
    ///
    /// Empty, `.` and `..` segments are rejected rather than dropped or
    /// resolved against the base path.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::config(format!(
                "'{}' is not a valid request path segment",
                bad
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("api_url cannot carry request paths"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and check its status
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP method
    /// - `segments`: path relative to the configured base URL, one entry
    ///   per segment
    /// - `body`: JSON payload; `None` sends no payload
    /// - `subaccount`: scope header value; `None` or `0` means account level
    /// - `expected`: the only status treated as success
    ///
    /// # Errors
    ///
    /// - `Error::Config` if a segment is empty, `.` or `..`
    /// - `Error::Transport` if the request cannot be sent or read
    /// - `Error::StatusMismatch` for any status other than `expected`
    /// - `Error::Json` if a successful body is not valid JSON
    pub async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
        subaccount: Option<u64>,
        expected: StatusCode,
    ) -> Result<ApiResponse> {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        let scope = subaccount_scope(subaccount);

        debug!(
            method = %method,
            path = %path,
            subaccount = ?scope,
            "Sending SparkPost API request"
        );

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .header(CONTENT_TYPE, "application/json");

        if let Some(id) = scope {
            request = request.header(SUBACCOUNT_HEADER, id.to_string());
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("{} {} failed: {}", method, path, e)))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::transport(format!("Failed to read response of {} {}: {}", method, path, e))
        })?;

        debug!(method = %method, path = %path, status = status.as_u16(), "SparkPost API response");

        if status != expected {
            return Err(Error::StatusMismatch {
                expected: expected.as_u16(),
                status: status.as_u16(),
                status_line: status.to_string(),
                body: text,
            });
        }

        let body = decode_body(&text)
            .map_err(|e| e.with_context(format!("Failed to decode response of {} {}", method, path)))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode a response body, treating an empty body as `Null`
fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domainctl_core::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> ApiGateway {
        ApiGateway::new(ProviderConfig::new("test-key").with_api_url(server.uri())).unwrap()
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(ApiGateway::new(ProviderConfig::new("")).is_err());
    }

    #[test]
    fn test_api_key_not_exposed_in_debug() {
        let gateway = ApiGateway::new(ProviderConfig::new("secret_key_12345")).unwrap();
        let debug_str = format!("{:?}", gateway);
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("ApiGateway"));
    }

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body("").unwrap(), Value::Null);
        assert_eq!(decode_body("  \n").unwrap(), Value::Null);
        assert_eq!(decode_body(r#"{"a":1}"#).unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_send_attaches_auth_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sending-domains"))
            .and(header("Authorization", "test-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"domain": "example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let response = gateway_for(&server)
            .send(
                Method::POST,
                &["sending-domains"],
                Some(&json!({"domain": "example.com"})),
                None,
                StatusCode::OK,
            )
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.results(), &json!({}));
    }

    #[tokio::test]
    async fn test_send_scopes_positive_subaccount_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        gateway
            .send(Method::GET, &["subaccounts"], None, Some(9), StatusCode::OK)
            .await
            .unwrap();
        gateway
            .send(Method::GET, &["subaccounts"], None, Some(0), StatusCode::OK)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].headers.get(SUBACCOUNT_HEADER).unwrap(),
            "9"
        );
        assert!(requests[1].headers.get(SUBACCOUNT_HEADER).is_none());
        assert!(requests[1].body.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_status_is_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .send(
                Method::DELETE,
                &["tracking-domains", "t.example.com"],
                None,
                None,
                StatusCode::NO_CONTENT,
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StatusMismatch);
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("200 OK"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .send(Method::GET, &["subaccounts"], None, None, StatusCode::OK)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport() {
        let gateway =
            ApiGateway::new(ProviderConfig::new("k").with_api_url("http://127.0.0.1:1")).unwrap();

        let err = gateway
            .send(Method::GET, &["subaccounts"], None, None, StatusCode::OK)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.to_string().contains("\"k\""));
    }

    #[test]
    fn test_url_keeps_base_path() {
        let gateway = ApiGateway::new(ProviderConfig::new("k")).unwrap();
        let url = gateway.url(&["sending-domains", "example.com", "verify"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.eu.sparkpost.com/api/v1/sending-domains/example.com/verify"
        );

        let bare =
            ApiGateway::new(ProviderConfig::new("k").with_api_url("http://127.0.0.1:8080")).unwrap();
        assert_eq!(
            bare.url(&["subaccounts"]).unwrap().as_str(),
            "http://127.0.0.1:8080/subaccounts"
        );
    }

    #[test]
    fn test_url_encodes_each_segment() {
        let gateway = ApiGateway::new(ProviderConfig::new("k")).unwrap();
        let url = gateway.url(&["sending-domains", "victim.com#x?y/z"]).unwrap();

        assert_eq!(url.path(), "/api/v1/sending-domains/victim.com%23x%3Fy%2Fz");
        assert!(url.fragment().is_none());
        assert!(url.query().is_none());
    }

    #[test]
    fn test_url_rejects_dot_segments() {
        let gateway = ApiGateway::new(ProviderConfig::new("k")).unwrap();
        for bad in ["", ".", ".."] {
            let err = gateway.url(&["sending-domains", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }
}
