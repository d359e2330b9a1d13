//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::delivery::DeliveryMethod;
use crate::domain::target::TargetOptions;

#[derive(Debug, Parser)]
#[command(name = "shellrelay")]
#[command(about = "Interactive console that relays shell commands to a remote HTTP endpoint")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Endpoint URL that receives the payload
    url: Option<String>,

    /// Delivery method: query, body, header or cookie
    #[arg(short, long)]
    method: Option<DeliveryMethod>,

    /// Parameter (or header/cookie name) that carries the payload
    #[arg(short, long)]
    parameter: Option<String>,

    /// Send payloads and read responses without base64
    #[arg(long)]
    no_encoding: bool,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig(TargetOptions),
    Shell(TargetOptions),
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        let options = TargetOptions {
            url: self.url,
            method: self.method,
            parameter: self.parameter,
            // 플래그가 없으면 설정 파일 값을 따른다.
            encoding: self.no_encoding.then_some(false),
            timeout_ms: self.timeout_ms,
        };

        match self.command {
            Some(Commands::Config) => CliAction::InspectConfig(options),
            None => CliAction::Shell(options),
        }
    }
}
