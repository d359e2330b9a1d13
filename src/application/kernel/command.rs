//! 커널에 등록되는 명령 핸들러 계약.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::ShellConfig;
use crate::application::context::ShellContext;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

/// 명령이 탭 완성을 어느 깊이까지 제공하는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    #[default]
    Disabled,
    /// 첫 번째 인자만
    FirstArgument,
    /// 이후 모든 인자
    MultiLevel,
}

#[async_trait]
pub trait KernelCommand: Send + Sync {
    /// 디스패치 키. 등록 후 바뀌면 안 된다.
    fn name(&self) -> &str;

    /// `help`에 표시할 사용법.
    fn usage(&self) -> &str {
        self.name()
    }

    fn completion(&self) -> Completion {
        Completion::Disabled
    }

    /// 입력 중인 줄 전체와 현재 설정을 받아 후보를 반환한다.
    fn complete(&self, _line: &str, _config: &ShellConfig) -> Vec<String> {
        Vec::new()
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition>;

    /// 마지막 실행 결과 원본.
    fn result(&self) -> &[u8] {
        &[]
    }

    fn result_str(&self) -> String {
        String::from_utf8_lossy(self.result()).into_owned()
    }
}
