//! 기본 제공 명령 핸들러.

mod cd;
mod codec;
mod exit;
mod help;
mod info;
mod raw;
mod set;
mod shell;
mod transfer;

pub use cd::CdCommand;
pub use codec::{DecodeCommand, EncodeCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use info::InfoCommand;
pub use raw::RawCommand;
pub use set::SetCommand;
pub use shell::{SHELL_MODE, ShellCommand};
pub use transfer::{DownloadCommand, UploadCommand};

use crate::application::kernel::KernelCommand;

/// 기본 레지스트리. `help`가 맨 앞에 온다.
pub fn builtin_commands() -> Vec<Box<dyn KernelCommand>> {
    let mut commands: Vec<Box<dyn KernelCommand>> = vec![
        Box::new(ExitCommand),
        Box::new(CdCommand::default()),
        Box::new(UploadCommand::default()),
        Box::new(DownloadCommand::default()),
        Box::new(EncodeCommand::default()),
        Box::new(DecodeCommand::default()),
        Box::new(InfoCommand),
        Box::new(SetCommand),
        Box::new(ShellCommand::default()),
    ];
    let help = HelpCommand::from_commands(&commands);
    commands.insert(0, Box::new(help));
    commands
}

/// 완성 대상 줄에서 명령 이름 뒤 확정된 인자들과 현재 입력 중인 인자 위치를 구한다.
pub(crate) fn typed_arguments(line: &str) -> (Vec<&str>, usize) {
    let fresh_token = line.is_empty() || line.ends_with(char::is_whitespace);
    let mut tokens: Vec<&str> = line.split_whitespace().skip(1).collect();
    if !fresh_token {
        tokens.pop();
    }
    let position = tokens.len();
    (tokens, position)
}
