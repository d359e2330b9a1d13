//! 전달 세션.
//! 대상 설정과 마지막 요청/응답을 보관하고, 페이로드 한 건을 전송한다.

mod error;
mod request;

use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{Codec, HttpTransport};
use crate::domain::delivery::{DeliveryMethod, DeliveryRequest, DeliveryResponse};

pub use error::DeliveryError;
pub use request::{FORM_CONTENT_TYPE, build_request};

/// 프로세스당 하나를 만들어 `ShellContext`가 소유한다.
pub struct DeliverySession {
    transport: Box<dyn HttpTransport>,
    codec: Arc<dyn Codec>,
    host: String,
    method: DeliveryMethod,
    parameter: String,
    encoding: bool,
    configured: bool,
    last_command: String,
    last_request: Option<DeliveryRequest>,
    last_response: Option<DeliveryResponse>,
    last_form: Option<Vec<(String, String)>>,
}

impl DeliverySession {
    pub fn new(transport: Box<dyn HttpTransport>, codec: Arc<dyn Codec>) -> Self {
        Self {
            transport,
            codec,
            host: String::new(),
            method: DeliveryMethod::default(),
            parameter: String::new(),
            encoding: true,
            configured: false,
            last_command: String::new(),
            last_request: None,
            last_response: None,
            last_form: None,
        }
    }

    /// 대상 설정을 통째로 교체한다. 값 검증은 다음 `send`에서 일어난다.
    pub fn set_config(
        &mut self,
        host: &str,
        method: DeliveryMethod,
        parameter: &str,
        encoding: bool,
    ) {
        self.host = host.to_string();
        self.method = method;
        self.parameter = parameter.to_string();
        self.encoding = encoding;
        self.configured = true;

        // 이전 대상의 기록이 새 설정의 결과처럼 보이지 않게 비운다.
        self.last_command.clear();
        self.last_request = None;
        self.last_response = None;
        self.last_form = None;
    }

    pub fn is_setup(&self) -> bool {
        self.configured
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn method(&self) -> DeliveryMethod {
        self.method
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn encoding(&self) -> bool {
        self.encoding
    }

    /// 마지막으로 전송한 (인코딩된) 페이로드.
    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    /// 페이로드를 인코딩해 요청 한 건으로 보내고, 성공 시 디코딩된 본문으로 `on_success`를 호출한다.
    ///
    /// 전송 계층 실패는 [`DeliveryError::is_fatal`]이 참인 오류로 반환된다.
    /// 4xx/5xx 응답은 콜백 없이 [`DeliveryError::HttpStatus`]로 반환된다.
    pub async fn send<F>(&mut self, payload: &str, on_success: F) -> Result<(), DeliveryError>
    where
        F: FnOnce(&str) + Send,
    {
        if !self.configured {
            return Err(DeliveryError::NotConfigured);
        }

        let encoded = if self.encoding {
            self.codec.encode(payload)
        } else {
            payload.to_string()
        };
        self.last_command = encoded.clone();

        let request = build_request(self.method, &self.host, &self.parameter, &encoded)?;
        self.last_form = match self.method {
            DeliveryMethod::Body => Some(vec![(self.parameter.clone(), encoded)]),
            DeliveryMethod::Query | DeliveryMethod::Header | DeliveryMethod::Cookie => None,
        };

        debug!(method = %self.method, verb = %request.verb, url = %request.url, "sending payload");
        self.last_request = Some(request.clone());

        let response = self
            .transport
            .execute(&request)
            .await
            .map_err(|err| DeliveryError::Transport(format!("{err:#}")))?;
        debug!(status = response.status, bytes = response.body.len(), "response received");

        let status_error = response.is_error().then(|| DeliveryError::HttpStatus {
            status: response.status_line(),
            code: response.status,
        });
        let body = response.body_text();
        self.last_response = Some(response);

        if let Some(err) = status_error {
            return Err(err);
        }

        let decoded = if self.encoding {
            self.codec
                .decode(&body)
                .map_err(|err| DeliveryError::Decode(format!("{err:#}")))?
        } else {
            body
        };

        on_success(&decoded);
        Ok(())
    }

    pub fn response(&self) -> Option<&DeliveryResponse> {
        self.last_response.as_ref()
    }

    /// 마지막 요청을 반환하되, 제출했던 form 값을 다시 채워 돌려준다.
    pub fn request(&self) -> Option<DeliveryRequest> {
        let mut request = self.last_request.clone()?;
        request.form = self.last_form.clone().unwrap_or_default();
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::testing::{RecordingTransport, base64_codec};
    use pretty_assertions::assert_eq;

    fn session_with(transport: RecordingTransport) -> DeliverySession {
        let mut session = DeliverySession::new(Box::new(transport), base64_codec());
        session.set_config("http://h", DeliveryMethod::Query, "p", true);
        session
    }

    #[tokio::test]
    async fn unconfigured_session_refuses_to_send() {
        let transport = RecordingTransport::ok("b2s=");
        let mut session = DeliverySession::new(Box::new(transport.clone()), base64_codec());

        let err = session.send("ls", |_| panic!("callback")).await.unwrap_err();
        assert!(matches!(err, DeliveryError::NotConfigured));
        assert!(transport.requests().is_empty());
        assert!(!session.is_setup());
    }

    #[tokio::test]
    async fn query_send_builds_get_url_with_encoded_payload() {
        let transport = RecordingTransport::ok("b2s=");
        let mut session = session_with(transport.clone());

        let mut received = None;
        session
            .send("ls", |body| received = Some(body.to_string()))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].verb.as_str(), "GET");
        assert_eq!(requests[0].url, "http://h?p=bHM=");
        assert_eq!(session.last_command(), "bHM=");
        assert_eq!(received.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn body_send_posts_form_and_request_exposes_form_values() {
        let transport = RecordingTransport::ok("b2s=");
        let mut session = session_with(transport.clone());
        session.set_config("http://h", DeliveryMethod::Body, "p", true);

        session.send("ls", |_| {}).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.body.as_deref(), Some(b"p=bHM=".as_slice()));
        assert_eq!(
            sent.headers.get("Content-Type").map(String::as_str),
            Some(FORM_CONTENT_TYPE)
        );

        let introspected = session.request().unwrap();
        assert_eq!(introspected.form, vec![("p".to_string(), "bHM=".to_string())]);
    }

    #[tokio::test]
    async fn error_status_skips_callback_and_keeps_response() {
        let transport = RecordingTransport::with_response(DeliveryResponse {
            status: 404,
            reason: "Not Found".to_string(),
            headers: BTreeMap::new(),
            body: b"nope".to_vec(),
        });
        let mut session = session_with(transport);

        let mut called = false;
        let err = session.send("ls", |_| called = true).await.unwrap_err();

        assert!(!called);
        assert!(matches!(err, DeliveryError::HttpStatus { code: 404, .. }));
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "error with the response: 404 Not Found");
        assert_eq!(session.response().map(|r| r.status), Some(404));
    }

    #[tokio::test]
    async fn transport_failure_is_fatal() {
        let transport = RecordingTransport::failing("connection refused");
        let mut session = session_with(transport);

        let err = session.send("ls", |_| {}).await.unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("connection refused"));
        assert!(session.response().is_none());
        assert!(session.request().is_some());
    }

    #[tokio::test]
    async fn encoding_disabled_sends_and_returns_plain_text() {
        let transport = RecordingTransport::ok("plain output");
        let mut session = session_with(transport.clone());
        session.set_config("http://h", DeliveryMethod::Header, "X-Cmd", false);

        let mut received = String::new();
        session
            .send("id", |body| received = body.to_string())
            .await
            .unwrap();

        assert_eq!(transport.requests()[0].headers.get("X-Cmd").map(String::as_str), Some("id"));
        assert_eq!(received, "plain output");
    }

    #[tokio::test]
    async fn undecodable_body_is_a_recoverable_error() {
        let transport = RecordingTransport::ok("%%% not base64 %%%");
        let mut session = session_with(transport);

        let err = session.send("ls", |_| panic!("callback")).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Decode(_)));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn introspection_is_empty_before_send_and_after_reconfigure() {
        let transport = RecordingTransport::ok("b2s=");
        let mut session = session_with(transport);
        assert!(session.request().is_none());
        assert!(session.response().is_none());

        session.send("ls", |_| {}).await.unwrap();
        assert!(session.response().is_some());

        session.set_config("http://other", DeliveryMethod::Query, "p", true);
        assert!(session.request().is_none());
        assert!(session.response().is_none());
        assert_eq!(session.last_command(), "");
    }

    #[tokio::test]
    async fn invalid_host_fails_before_any_request() {
        let transport = RecordingTransport::ok("b2s=");
        let mut session = session_with(transport.clone());
        session.set_config("", DeliveryMethod::Query, "p", true);

        let err = session.send("ls", |_| {}).await.unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidRequest(_)));
        assert!(transport.requests().is_empty());
    }
}
