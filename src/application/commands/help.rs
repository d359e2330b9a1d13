//! `help`: 등록된 명령 목록.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

pub struct HelpCommand {
    entries: Vec<(String, String)>,
}

impl HelpCommand {
    /// 등록 예정인 명령들의 이름/사용법을 스냅샷으로 보관한다.
    pub fn from_commands(commands: &[Box<dyn KernelCommand>]) -> Self {
        let mut entries = vec![("help".to_string(), "help".to_string())];
        entries.extend(
            commands
                .iter()
                .map(|cmd| (cmd.name().to_string(), cmd.usage().to_string())),
        );
        Self { entries }
    }
}

#[async_trait]
impl KernelCommand for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    async fn exec(&mut self, _line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        for (name, usage) in &self.entries {
            ctx.reporter.raw(&format!("  {name:<8} {usage}"));
        }
        ctx.reporter
            .raw("  anything else is sent to the remote shell as-is");
        Ok(Transition::None)
    }
}
