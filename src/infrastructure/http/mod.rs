//! reqwest 기반 HTTP 전송 구현체.
//! 도메인 요청 모델을 그대로 실행하고, 상태 코드 해석은 세션 계층에 맡긴다.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use crate::application::ports::HttpTransport;
use crate::domain::delivery::{DeliveryRequest, DeliveryResponse, HttpVerb};

/// 타임아웃이 적용된 HTTP 클라이언트를 생성한다.
pub fn build_client(timeout: Duration) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// 요청 한 건을 reqwest로 실행하는 전송 어댑터.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &DeliveryRequest) -> Result<DeliveryResponse> {
        let method = match request.verb {
            HttpVerb::Get => Method::GET,
            HttpVerb::Post => Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(verb = %request.verb, url = %request.url, "sending request");
        let response = builder
            .send()
            .await
            .with_context(|| format!("failed to reach {}", request.url))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect::<BTreeMap<_, _>>();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read response body from {}", request.url))?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok(DeliveryResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: body.to_vec(),
        })
    }
}
