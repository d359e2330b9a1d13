//! base64 페이로드 코덱.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::application::ports::Codec;

/// 표준 알파벳 + 패딩을 쓰는 base64 코덱.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Codec for Base64Codec {
    fn encode(&self, input: &str) -> String {
        STANDARD.encode(input.as_bytes())
    }

    fn decode(&self, input: &str) -> Result<String> {
        // 응답 끝의 개행 등은 무시한다.
        let bytes = STANDARD
            .decode(input.trim())
            .context("response is not valid base64")?;
        String::from_utf8(bytes).context("decoded response is not valid UTF-8")
    }
}
