//! 전달 세션 오류 분류.

/// `DeliverySession::send` 실패 유형.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// `set_config` 전에 전송을 시도함.
    #[error("delivery session is not configured (set a target url first)")]
    NotConfigured,

    /// 현재 설정으로 요청을 만들 수 없음.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// 서버가 4xx/5xx로 응답함.
    #[error("error with the response: {status}")]
    HttpStatus { status: String, code: u16 },

    /// 연결/DNS/TLS/타임아웃 실패. 세션을 더 쓰면 안 된다.
    #[error("transport failure: {0}")]
    Transport(String),

    /// 응답 본문을 디코딩하지 못함.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl DeliveryError {
    /// 대화형 세션을 끝내야 하는 오류인지 여부.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DeliveryError::Transport(_))
    }

    /// `anyhow` 체인 어디에든 치명적 전달 오류가 있는지 검사한다.
    pub fn is_fatal_error(err: &anyhow::Error) -> bool {
        err.chain()
            .filter_map(|cause| cause.downcast_ref::<DeliveryError>())
            .any(DeliveryError::is_fatal)
    }
}
