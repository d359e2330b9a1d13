//! 명령줄에서 넘어온 대상 엔드포인트 옵션.

use crate::domain::delivery::DeliveryMethod;

/// CLI 인자로 받은 설정 덮어쓰기 값. 지정하지 않은 항목은 설정 파일/기본값을 따른다.
#[derive(Debug, Clone, Default)]
pub struct TargetOptions {
    pub url: Option<String>,
    pub method: Option<DeliveryMethod>,
    pub parameter: Option<String>,
    pub encoding: Option<bool>,
    pub timeout_ms: Option<u64>,
}
