//! 전송 팩토리 포트 구현 어댑터.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{HttpTransport, TransportFactory};
use crate::infrastructure::http::ReqwestTransport;

/// 설정된 타임아웃으로 reqwest 전송 구현체를 만든다.
pub struct ReqwestTransportFactory;

impl TransportFactory for ReqwestTransportFactory {
    fn build(&self, timeout: Duration) -> Result<Box<dyn HttpTransport>> {
        Ok(Box::new(ReqwestTransport::new(timeout)))
    }
}
