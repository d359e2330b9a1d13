//! 명령 커널.
//! 입력 줄을 등록된 명령으로 라우팅하고, 모드 전이와 대화형 입력 루프를 관리한다.

mod command;
mod completion;
mod error;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::application::context::ShellContext;
use crate::application::ports::{LineSource, ReadOutcome};
use crate::application::session::DeliveryError;
use crate::domain::line::KernelLine;
use crate::domain::mode::{Mode, Transition};
use crate::domain::prompt::render_prompt;

pub use command::{Completion, KernelCommand};
pub use completion::{CompletionNode, CompletionTree, KernelCompleter};
pub use error::KernelError;

#[derive(Default)]
pub struct Kernel {
    default: Option<Box<dyn KernelCommand>>,
    commands: Vec<Box<dyn KernelCommand>>,
    mode: Mode,
    running: bool,
    prompt: Option<String>,
    completion: CompletionTree,
}

impl Kernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default(&mut self, command: Box<dyn KernelCommand>) {
        self.default = Some(command);
    }

    /// 등록 순서가 곧 매칭 우선순위다.
    pub fn set_commands(&mut self, commands: Vec<Box<dyn KernelCommand>>) {
        self.commands = commands;
    }

    pub fn commands(&self) -> &[Box<dyn KernelCommand>] {
        &self.commands
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_run(&mut self) {
        self.running = true;
    }

    pub fn stop_run(&mut self) {
        self.running = false;
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// 입력 한 줄을 해석해 명령을 실행하고, 반환된 전이를 적용한다.
    pub async fn exec(&mut self, raw: &str, ctx: &mut ShellContext) -> Result<Transition> {
        let line = KernelLine::parse(raw);
        // 빈 줄은 어떤 명령에도 넘기지 않는다.
        if line.is_empty() {
            return Ok(Transition::None);
        }
        let transition = self.dispatch(&line, ctx).await?;
        self.apply(&transition);
        Ok(transition)
    }

    async fn dispatch(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        if let Mode::Named(name) = &self.mode {
            if let Some(cmd) = self.commands.iter_mut().find(|cmd| cmd.name() == name) {
                debug!(mode = %name, line = line.raw(), "dispatching to sub-mode");
                return cmd.exec(line, ctx).await;
            }

            warn!(mode = %name, "sub-mode handler is not registered, returning to default mode");
            self.mode = Mode::Default;
        }

        if !line.is_chained()
            && let Some(cmd) = self.commands.iter_mut().find(|cmd| cmd.name() == line.name())
        {
            debug!(command = line.name(), "dispatching");
            return cmd.exec(line, ctx).await;
        }

        match self.default.as_mut() {
            Some(cmd) => {
                debug!(command = cmd.name(), line = line.raw(), "dispatching to default");
                cmd.exec(line, ctx).await
            }
            None => Err(KernelError::NoDefaultCommand.into()),
        }
    }

    fn apply(&mut self, transition: &Transition) {
        match transition {
            Transition::SwitchTo(mode) => {
                debug!(from = %self.mode, to = %mode, "mode transition");
                self.mode = mode.clone();
            }
            Transition::Exit => self.stop_run(),
            Transition::Stay | Transition::None => {}
        }
    }

    /// 완성 트리와 프롬프트를 준비한 뒤 입력 루프를 시작한다.
    pub async fn run(&mut self, source: &mut dyn LineSource, ctx: &mut ShellContext) -> Result<()> {
        self.completion = CompletionTree::build(&self.commands);
        self.prompt = Some(render_prompt(&ctx.config.url, &ctx.config.scope));
        self.start_run();

        self.run_loop(source, ctx).await
    }

    /// 한 줄 읽기 → 실행을 반복한다. 인터럽트/입력 끝이면 오류 없이 종료한다.
    pub async fn run_loop(
        &mut self,
        source: &mut dyn LineSource,
        ctx: &mut ShellContext,
    ) -> Result<()> {
        while self.running {
            let prompt = self
                .prompt
                .clone()
                .unwrap_or_else(|| render_prompt(&ctx.config.url, &ctx.config.scope));
            let outcome = {
                let completer = KernelCompleter {
                    tree: &self.completion,
                    commands: &self.commands,
                    config: &ctx.config,
                };
                source.read_line(&prompt, &completer)
            };

            let line = match outcome {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted | ReadOutcome::EndOfInput) => {
                    self.stop_run();
                    return Ok(());
                }
                Err(err) => {
                    self.stop_run();
                    return Err(err.context("input source failure"));
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Err(err) = self.exec(&line, ctx).await {
                if DeliveryError::is_fatal_error(&err) {
                    self.stop_run();
                    return Err(err).context("delivery session aborted");
                }
                ctx.reporter.error(&format!("{err:#}"));
            }

            let (url, scope) = (ctx.config.url.clone(), ctx.config.scope.clone());
            self.update_prompt(&url, &scope);
        }

        Ok(())
    }

    /// 프롬프트를 갱신한다. `run` 이전에는 아무 일도 하지 않는다.
    pub fn update_prompt(&mut self, url: &str, scope: &str) {
        if self.prompt.is_none() {
            return;
        }
        self.prompt = Some(render_prompt(url, scope));
    }
}
