//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, HistoryOptions};
use crate::domain::delivery::{DeliveryRequest, DeliveryResponse};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 송신 페이로드/수신 본문에 적용하는 가역 변환.
/// `decode(encode(s)) == s`가 항상 성립해야 한다.
pub trait Codec: Send + Sync {
    fn encode(&self, input: &str) -> String;
    fn decode(&self, input: &str) -> Result<String>;
}

/// 요청 한 건을 실제 네트워크로 실행하는 포트.
/// 연결/DNS/TLS/타임아웃 실패만 `Err`로 반환하고 HTTP 상태는 응답에 담는다.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &DeliveryRequest) -> Result<DeliveryResponse>;
}

/// 타임아웃에 맞는 전송 구현체를 생성하는 팩토리 포트.
pub trait TransportFactory: Send + Sync {
    fn build(&self, timeout: Duration) -> Result<Box<dyn HttpTransport>>;
}

/// 원격 파일을 읽지 못했을 때 `read_file` 명령이 출력하는 표식. base64 알파벳에 없는 문자다.
pub const UNREADABLE_MARK: char = '!';

/// 원격 셸 명령 문자열 + scope로 실제 전달할 페이로드를 만든다.
pub trait PayloadBuilder: Send + Sync {
    fn build(&self, command: &str, scope: &str) -> String;

    /// base64 조각 하나를 원격 파일에 풀어 쓴다. `append`가 거짓이면 파일을 새로 만든다.
    fn write_chunk(&self, remote: &str, chunk: &str, append: bool, scope: &str) -> String;

    /// 원격 파일 내용을 base64로 출력한다. 읽을 수 없으면 base64 알파벳 밖의 표식을 출력한다.
    fn read_file(&self, remote: &str, scope: &str) -> String;
}

/// 입력 소스 한 번 읽기의 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D 또는 입력 끝
    EndOfInput,
}

/// 입력 중 탭 완성 후보를 제공하는 포트.
pub trait LineCompleter {
    /// 현재까지 입력된 줄 전체를 받아 마지막 토큰 자리에 올 후보를 돌려준다.
    fn complete(&self, line: &str) -> Vec<String>;
}

/// 한 줄씩 읽는 대화형 입력 소스.
pub trait LineSource: Send {
    fn read_line(&mut self, prompt: &str, completer: &dyn LineCompleter) -> Result<ReadOutcome>;
}

/// 히스토리 설정에 맞는 입력 소스를 생성하는 팩토리 포트.
pub trait LineSourceFactory: Send + Sync {
    fn build(&self, history: &HistoryOptions) -> Box<dyn LineSource>;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn raw(&self, line: &str);
    fn kv(&self, key: &str, value: &str);
    fn error(&self, message: &str);
}
