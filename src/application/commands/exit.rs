//! `exit`: 대화형 입력 루프를 끝낸다.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

pub struct ExitCommand;

#[async_trait]
impl KernelCommand for ExitCommand {
    fn name(&self) -> &str {
        "exit"
    }

    async fn exec(&mut self, _line: &KernelLine, _ctx: &mut ShellContext) -> Result<Transition> {
        Ok(Transition::Exit)
    }
}
