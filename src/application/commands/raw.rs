//! 기본 핸들러: 입력 줄을 원격 셸 명령으로 전달한다.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

/// scope를 반영한 페이로드를 보내고 디코딩된 출력을 돌려준다.
pub(crate) async fn deliver(ctx: &mut ShellContext, command: &str) -> Result<String> {
    let payload = ctx.build_payload(command);
    send_payload(ctx, &payload).await
}

/// 이미 완성된 페이로드를 그대로 보낸다.
pub(crate) async fn send_payload(ctx: &mut ShellContext, payload: &str) -> Result<String> {
    let mut output = String::new();
    ctx.session
        .send(payload, |body| output = body.to_string())
        .await?;
    Ok(output)
}

pub(crate) fn print_output(ctx: &ShellContext, output: &str) {
    let trimmed = output.trim_end_matches(['\r', '\n']);
    if !trimmed.is_empty() {
        ctx.reporter.raw(trimmed);
    }
}

#[derive(Default)]
pub struct RawCommand {
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for RawCommand {
    fn name(&self) -> &str {
        "raw"
    }

    fn usage(&self) -> &str {
        "<command>"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        let output = deliver(ctx, line.raw()).await?;
        print_output(ctx, &output);
        self.result = output.into_bytes();
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}
