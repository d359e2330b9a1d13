//! `shell`: 모든 입력을 그대로 원격에 전달하는 하위 모드.

use anyhow::Result;
use async_trait::async_trait;

use super::raw::{deliver, print_output};
use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::domain::line::KernelLine;
use crate::domain::mode::{Mode, Transition};

pub const SHELL_MODE: &str = "shell";

#[derive(Default)]
pub struct ShellCommand {
    active: bool,
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for ShellCommand {
    fn name(&self) -> &str {
        SHELL_MODE
    }

    fn usage(&self) -> &str {
        "shell  (raw passthrough, `exit` to leave)"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        if !self.active {
            self.active = true;
            ctx.reporter
                .raw("raw shell mode: every line is sent as-is, type `exit` to leave");
            return Ok(Transition::SwitchTo(Mode::named(SHELL_MODE)));
        }

        if line.raw() == "exit" {
            self.active = false;
            return Ok(Transition::SwitchTo(Mode::Default));
        }

        let output = deliver(ctx, line.raw()).await?;
        print_output(ctx, &output);
        self.result = output.into_bytes();
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::kernel::Kernel;
    use crate::application::commands::{InfoCommand, RawCommand};
    use crate::testing::{RecordingTransport, context_with};

    #[tokio::test]
    async fn sub_mode_sends_builtin_names_verbatim_until_exit() {
        // "done"
        let transport = RecordingTransport::ok("ZG9uZQ==");
        let (mut ctx, output) = context_with(transport.clone());
        let mut kernel = Kernel::new();
        kernel.set_commands(vec![Box::new(ShellCommand::default()), Box::new(InfoCommand)]);
        kernel.set_default(Box::new(RawCommand::default()));

        kernel.exec("shell", &mut ctx).await.unwrap();
        assert_eq!(kernel.mode(), &Mode::named(SHELL_MODE));

        kernel.exec("info", &mut ctx).await.unwrap();
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(output.lines().last().map(String::as_str), Some("done"));

        let transition = kernel.exec("exit", &mut ctx).await.unwrap();
        assert_eq!(transition, Transition::SwitchTo(Mode::Default));
        assert_eq!(kernel.mode(), &Mode::Default);
        assert_eq!(transport.requests().len(), 1);
    }
}
