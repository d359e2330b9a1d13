//! `cd`: 원격 작업 디렉터리(scope)를 바꾼다.

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::raw::deliver;
use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

#[derive(Default)]
pub struct CdCommand {
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for CdCommand {
    fn name(&self) -> &str {
        "cd"
    }

    fn usage(&self) -> &str {
        "cd [dir]"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        let target = line.rest();
        if target.is_empty() {
            ctx.config.scope.clear();
            self.result.clear();
            return Ok(Transition::Stay);
        }

        // 원격에서 실제로 이동한 뒤의 절대 경로를 scope로 삼는다.
        let output = deliver(ctx, &format!("cd {target} && pwd")).await?;
        let Some(dir) = output
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty())
        else {
            bail!("cd: remote did not report a directory for `{target}`");
        };

        ctx.config.scope = dir.to_string();
        self.result = dir.as_bytes().to_vec();
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}
