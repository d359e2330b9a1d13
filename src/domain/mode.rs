//! 커널 활성 모드와 명령 실행 후 상태 전이.

use std::fmt;

/// 커널이 다음 입력을 해석하는 방식.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// 레지스트리 조회 후 기본 핸들러로 폴백
    #[default]
    Default,
    /// 같은 이름의 명령이 모든 입력을 받는 하위 모드
    Named(String),
}

impl Mode {
    pub fn named(name: impl Into<String>) -> Self {
        Mode::Named(name.into())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Default => f.write_str("default"),
            Mode::Named(name) => f.write_str(name),
        }
    }
}

/// 명령 실행 결과로 커널에 요청하는 상태 전이.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 현재 모드 유지
    Stay,
    /// 이후 입력을 지정 모드로 해석
    SwitchTo(Mode),
    /// 처리할 내용이 없었음
    None,
    /// 입력 루프 종료
    Exit,
}
