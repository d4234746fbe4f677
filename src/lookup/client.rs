use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::{ResolverError, Result},
    lookup::types::{Candidate, Identity, LookupOutcome, TransportError, NOT_AVAILABLE, UNKNOWN_BANK},
};

/// One probe against the lookup service. Failures come back as values, never as `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupClient: Send + Sync {
    async fn probe(&self, candidate: &Candidate) -> LookupOutcome;
}

#[derive(Clone)]
pub struct HttpLookupClient {
    http: reqwest::Client,
    url_template: String,
}

impl HttpLookupClient {
    pub fn new(url_template: &str, timeout: Duration) -> Result<Self> {
        if !url_template.contains("{}") {
            return Err(ResolverError::Config(format!(
                "lookup URL template has no {{}} placeholder: {}",
                url_template
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("upi-resolver/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url_template: url_template.to_string(),
        })
    }

    pub fn url_for(&self, candidate: &Candidate) -> String {
        self.url_template.replacen("{}", &candidate.address(), 1)
    }
}

#[async_trait]
impl LookupClient for HttpLookupClient {
    async fn probe(&self, candidate: &Candidate) -> LookupOutcome {
        let url = self.url_for(candidate);
        debug!("GET {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return LookupOutcome::TransportError(transport_error(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            debug!("{} answered {}", candidate, status);
            return LookupOutcome::TransportError(TransportError::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(body) => classify_body(&body),
            Err(e) => LookupOutcome::TransportError(transport_error(&e)),
        }
    }
}

fn transport_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() {
        TransportError::InvalidResponse
    } else {
        TransportError::Request(e.to_string())
    }
}

/// Classifies a 2xx response body.
///
/// The service answers with
/// `{"data": {"vpa_details": {"name", "vpa", "ifsc"}, "bank_details_raw": {"BANK"}}}`,
/// any part of which may be missing. Only the holder name decides validity.
pub fn classify_body(body: &str) -> LookupOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return LookupOutcome::TransportError(TransportError::InvalidResponse),
    };

    if !value.is_object() {
        return LookupOutcome::TransportError(TransportError::InvalidResponse);
    }

    let name = match text_at(&value, "/data/vpa_details/name") {
        Some(name) if !name.eq_ignore_ascii_case(NOT_AVAILABLE) => name,
        _ => return LookupOutcome::Invalid,
    };

    LookupOutcome::Valid(Identity {
        name,
        bank: text_at(&value, "/data/bank_details_raw/BANK")
            .unwrap_or_else(|| UNKNOWN_BANK.to_string()),
        vpa: text_at(&value, "/data/vpa_details/vpa").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ifsc: text_at(&value, "/data/vpa_details/ifsc")
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    })
}

fn text_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::types::PhoneNumber;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn candidate() -> Candidate {
        Candidate {
            number: PhoneNumber::parse("8900200543").unwrap(),
            handle: "@ybl".to_string(),
        }
    }

    /// Serves one canned HTTP response and returns the base URL template.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });

        format!("http://{}/upi?upi_id={{}}", addr)
    }

    #[test]
    fn valid_body_yields_identity() {
        let body = r#"{"data":{"vpa_details":{"name":"JOHN DOE","vpa":"8900200543@ybl","ifsc":"SBIN0001234"},"bank_details_raw":{"BANK":"STATE BANK"}}}"#;
        match classify_body(body) {
            LookupOutcome::Valid(identity) => {
                assert_eq!(identity.name, "JOHN DOE");
                assert_eq!(identity.bank, "STATE BANK");
                assert_eq!(identity.vpa, "8900200543@ybl");
                assert_eq!(identity.ifsc, "SBIN0001234");
            }
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn missing_sub_fields_default_to_sentinels() {
        let body = r#"{"data":{"vpa_details":{"name":"JANE ROE"}}}"#;
        match classify_body(body) {
            LookupOutcome::Valid(identity) => {
                assert_eq!(identity.bank, UNKNOWN_BANK);
                assert_eq!(identity.vpa, NOT_AVAILABLE);
                assert_eq!(identity.ifsc, NOT_AVAILABLE);
            }
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn placeholder_or_blank_name_is_invalid() {
        for body in [
            r#"{"data":{"vpa_details":{"name":"N/A"}}}"#,
            r#"{"data":{"vpa_details":{"name":"n/a"}}}"#,
            r#"{"data":{"vpa_details":{"name":"   "}}}"#,
            r#"{"data":{}}"#,
            r#"{"status":"error"}"#,
        ] {
            assert_eq!(classify_body(body), LookupOutcome::Invalid, "{body}");
        }
    }

    #[test]
    fn unparseable_or_non_object_body_is_invalid_response() {
        for body in ["<html>busy</html>", "[1,2,3]", "\"ok\""] {
            assert_eq!(
                classify_body(body),
                LookupOutcome::TransportError(TransportError::InvalidResponse),
                "{body}"
            );
        }
    }

    #[test]
    fn url_embeds_candidate_address() {
        let client =
            HttpLookupClient::new("https://api.example.com/upi?upi_id={}", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.url_for(&candidate()),
            "https://api.example.com/upi?upi_id=8900200543@ybl"
        );
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(matches!(
            HttpLookupClient::new("https://api.example.com/upi", Duration::from_secs(1)),
            Err(ResolverError::Config(_))
        ));
    }

    #[tokio::test]
    async fn probe_classifies_live_response() {
        let template = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"data":{"vpa_details":{"name":"JOHN DOE"},"bank_details_raw":{"BANK":"STATE BANK"}}}"#,
        )
        .await;
        let client = HttpLookupClient::new(&template, Duration::from_secs(5)).unwrap();

        let outcome = client.probe(&candidate()).await;
        assert!(outcome.is_valid());
    }

    #[tokio::test]
    async fn probe_reports_http_status() {
        let template = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
        let client = HttpLookupClient::new(&template, Duration::from_secs(5)).unwrap();

        assert_eq!(
            client.probe(&candidate()).await,
            LookupOutcome::TransportError(TransportError::Status(503))
        );
    }

    #[tokio::test]
    async fn probe_reports_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = HttpLookupClient::new(
            &format!("http://{}/upi?upi_id={{}}", addr),
            Duration::from_millis(200),
        )
        .unwrap();

        assert_eq!(
            client.probe(&candidate()).await,
            LookupOutcome::TransportError(TransportError::Timeout)
        );
    }
}
