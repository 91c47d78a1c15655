// ABOUTME: HTTP/1 platform client built directly on hyper.
// ABOUTME: Opens a connection per call, enforces the request timeout, and decodes faults.

use super::error::{
    ApiError, BuildRequestSnafu, ClientError, ConnectSnafu, DecodeSnafu, EncodeSnafu,
    HandshakeSnafu, InvalidEndpointSnafu, ReadBodySnafu, RequestSnafu, UnexpectedResponseSnafu,
};
use super::fault::FaultEnvelope;
use super::request::{Certificate, CreationRequest, DeploymentRecord, Routing};
use super::traits::{CertificateApi, DeploymentApi};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::time::Duration;
use tokio::net::TcpStream;

const DEPLOYMENTS_PATH: &str = "/v13/deployments";
const CERTS_PATH: &str = "/v3/certs";

/// Parsed `http://host[:port][/base]` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoint {
    host: String,
    port: u16,
    base_path: String,
}

impl Endpoint {
    fn parse(raw: &str) -> Result<Self, ClientError> {
        let uri: hyper::Uri = raw.parse().map_err(|e: hyper::http::uri::InvalidUri| {
            InvalidEndpointSnafu {
                endpoint: raw,
                reason: e.to_string(),
            }
            .build()
        })?;

        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => {
                return InvalidEndpointSnafu {
                    endpoint: raw,
                    reason: format!("unsupported scheme '{other}', expected http"),
                }
                .fail();
            }
            None => {
                return InvalidEndpointSnafu {
                    endpoint: raw,
                    reason: "missing scheme",
                }
                .fail();
            }
        }

        let host = match uri.host() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                return InvalidEndpointSnafu {
                    endpoint: raw,
                    reason: "missing host",
                }
                .fail();
            }
        };

        Ok(Self {
            host,
            port: uri.port_u16().unwrap_or(80),
            base_path: uri.path().trim_end_matches('/').to_string(),
        })
    }

    fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Platform client speaking JSON over HTTP/1.
#[derive(Debug, Clone)]
pub struct HttpPlatformClient {
    endpoint: Endpoint,
    token: Option<String>,
    timeout: Duration,
}

impl HttpPlatformClient {
    /// Create a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidEndpoint` unless `endpoint` is an
    /// `http://` URL with a host.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::parse(endpoint)?,
            token: None,
            timeout,
        })
    }

    /// Authenticate requests with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn path_for(&self, resource: &str, routing: &Routing) -> String {
        match &routing.team_id {
            Some(team) => format!(
                "{}{}?teamId={}",
                self.endpoint.base_path,
                resource,
                urlencoding::encode(team)
            ),
            None => format!("{}{}", self.endpoint.base_path, resource),
        }
    }

    /// POST a JSON body and decode either the success value or the fault.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: String,
        body: Vec<u8>,
    ) -> Result<T, ApiError> {
        let (status, bytes) = tokio::time::timeout(self.timeout, self.round_trip(&path, body))
            .await
            .map_err(|_| ClientError::Timeout {
                path: path.clone(),
                timeout: self.timeout,
            })??;

        tracing::debug!(%status, path = %path, bytes = bytes.len(), "platform responded");

        if status.is_success() {
            return serde_json::from_slice(&bytes)
                .context(DecodeSnafu { path })
                .map_err(ApiError::from);
        }

        match serde_json::from_slice::<FaultEnvelope>(&bytes) {
            Ok(envelope) => Err(ApiError::Fault(envelope.error.with_status(status.as_u16()))),
            Err(_) => Err(UnexpectedResponseSnafu {
                status: status.as_u16(),
                path,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }
            .build()
            .into()),
        }
    }

    async fn round_trip(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<(StatusCode, Bytes), ClientError> {
        let authority = self.endpoint.authority();

        let stream = TcpStream::connect((self.endpoint.host.as_str(), self.endpoint.port))
            .await
            .context(ConnectSnafu {
                authority: authority.clone(),
            })?;
        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .context(HandshakeSnafu {
                authority: authority.clone(),
            })?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("platform connection error: {}", e);
            }
        });

        let mut builder = hyper::Request::builder()
            .method("POST")
            .uri(path)
            .header("Host", authority.as_str())
            .header("Content-Type", "application/json")
            .header(
                "User-Agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            );
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let req = builder
            .body(Full::new(Bytes::from(body)))
            .context(BuildRequestSnafu { path })?;

        let resp = sender.send_request(req).await.context(RequestSnafu { path })?;
        let status = resp.status();
        let collected = resp
            .into_body()
            .collect()
            .await
            .context(ReadBodySnafu { path })?;

        Ok((status, collected.to_bytes()))
    }
}

#[async_trait]
impl DeploymentApi for HttpPlatformClient {
    async fn create_deployment(
        &self,
        request: &CreationRequest,
        routing: &Routing,
    ) -> Result<DeploymentRecord, ApiError> {
        let body = request.encode().context(EncodeSnafu)?;
        let path = self.path_for(DEPLOYMENTS_PATH, routing);
        tracing::debug!(path = %path, context = %routing.context, "creating deployment");
        self.post_json(path, body).await
    }
}

#[async_trait]
impl CertificateApi for HttpPlatformClient {
    async fn issue_certificate(
        &self,
        domains: &[String],
        routing: &Routing,
    ) -> Result<Certificate, ApiError> {
        let body = serde_json::to_vec(&serde_json::json!({ "domains": domains }))
            .context(EncodeSnafu)?;
        let path = self.path_for(CERTS_PATH, routing);
        tracing::debug!(path = %path, ?domains, "issuing certificate");
        self.post_json(path, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContextName;

    #[test]
    fn parses_endpoint_with_port_and_base_path() {
        let endpoint = Endpoint::parse("http://127.0.0.1:8080/api/").unwrap();
        assert_eq!(endpoint.host, "127.0.0.1");
        assert_eq!(endpoint.port, 8080);
        assert_eq!(endpoint.base_path, "/api");
    }

    #[test]
    fn defaults_to_port_80() {
        let endpoint = Endpoint::parse("http://gateway.internal").unwrap();
        assert_eq!(endpoint.port, 80);
        assert_eq!(endpoint.base_path, "");
    }

    #[test]
    fn rejects_https() {
        let err = Endpoint::parse("https://api.example.com").unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(Endpoint::parse("api.example.com").is_err());
    }

    #[test]
    fn team_id_is_url_encoded() {
        let client = HttpPlatformClient::new("http://localhost:3000", Duration::from_secs(5))
            .unwrap();
        let routing =
            Routing::new(ContextName::new("team-x").unwrap()).with_team_id("team x&y");
        assert_eq!(
            client.path_for(DEPLOYMENTS_PATH, &routing),
            "/v13/deployments?teamId=team%20x%26y"
        );
    }
}
