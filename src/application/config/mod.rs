//! 애플리케이션이 사용하는 설정 스키마(순수 데이터)와 실행 중 공유 설정.
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::delivery::DeliveryMethod;
use crate::domain::target::TargetOptions;

pub const DEFAULT_URL: &str = "http://localhost";
pub const DEFAULT_PARAMETER: &str = "relay";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_HISTORY_LIMIT: usize = 500;
const DEFAULT_HISTORY_FILE_NAME: &str = "shellrelay.history";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 원격 엔드포인트/전달 방식
    #[serde(default)]
    pub target: TargetConfig,
    /// 대화형 셸 동작
    #[serde(default)]
    pub shell: ShellSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TargetConfig {
    /// 페이로드를 받을 엔드포인트 URL
    pub url: Option<String>,
    /// query/body/header/cookie
    pub method: Option<DeliveryMethod>,
    /// 페이로드를 싣는 파라미터(헤더/쿠키) 이름
    pub parameter: Option<String>,
    /// 송신 페이로드 인코딩 + 응답 디코딩 여부(기본 true)
    pub encoding: Option<bool>,
    /// 요청 타임아웃(ms)
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ShellSection {
    /// 입력 히스토리 저장 경로
    pub history_file: Option<String>,
    /// 보관할 히스토리 최대 줄 수
    pub history_limit: Option<usize>,
}

impl Config {
    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.target.merge_from(other.target);
        self.shell.merge_from(other.shell);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.target.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn history(&self) -> HistoryOptions {
        HistoryOptions {
            path: self
                .shell
                .history_file
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_HISTORY_FILE_NAME)),
            limit: self.shell.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }

    /// CLI 덮어쓰기 값을 먼저 반영한 사본을 만든다.
    pub fn with_overrides(&self, options: &TargetOptions) -> Config {
        let mut merged = self.clone();
        merged.target.merge_from(TargetConfig {
            url: options.url.clone(),
            method: options.method,
            parameter: options.parameter.clone(),
            encoding: options.encoding,
            timeout_ms: options.timeout_ms,
        });
        merged
    }
}

impl TargetConfig {
    pub fn merge_from(&mut self, other: TargetConfig) {
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.method.is_some() {
            self.method = other.method;
        }
        if other.parameter.is_some() {
            self.parameter = other.parameter;
        }
        if other.encoding.is_some() {
            self.encoding = other.encoding;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
    }
}

impl ShellSection {
    pub fn merge_from(&mut self, other: ShellSection) {
        if other.history_file.is_some() {
            self.history_file = other.history_file;
        }
        if other.history_limit.is_some() {
            self.history_limit = other.history_limit;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    pub path: PathBuf,
    pub limit: usize,
}

/// 명령/완성기/프롬프트가 함께 읽고 쓰는 실행 중 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub url: String,
    pub method: DeliveryMethod,
    pub parameter: String,
    pub encoding: bool,
    /// 원격 작업 디렉터리. 비어 있으면 scope 없음.
    pub scope: String,
}

impl ShellConfig {
    /// 병합된 설정 파일 값에서 기본값을 채워 실행 설정을 만든다.
    pub fn from_config(config: &Config) -> Self {
        let target = &config.target;
        Self {
            url: target
                .url
                .clone()
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            method: target.method.unwrap_or_default(),
            parameter: target
                .parameter
                .clone()
                .unwrap_or_else(|| DEFAULT_PARAMETER.to_string()),
            encoding: target.encoding.unwrap_or(true),
            scope: String::new(),
        }
    }
}
