//! `shellrelay` 대화형 셸 인터페이스.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;

use crate::application::config::ShellConfig;
use crate::application::kernel::KernelCommand;
use crate::domain::target::TargetOptions;
use crate::interface::cli::composition::AppComposition;

/// 세션을 조립하고 배너 출력 후 입력 루프를 실행한다.
pub async fn run_shell(composition: &AppComposition, options: &TargetOptions) -> Result<()> {
    let prepared = composition.start_shell_usecase().prepare(options)?;
    print_welcome(&prepared.context.config, prepared.kernel.commands());
    io::stdout().flush()?;

    prepared.run().await
}

fn print_welcome(config: &ShellConfig, commands: &[Box<dyn KernelCommand>]) {
    let interactive = io::stdout().is_terminal();
    if interactive {
        // 대화형 터미널에서는 시작 화면을 지우고 배너를 출력한다.
        print!("\x1b[2J\x1b[H");
    }

    let title = paint("shellrelay interactive shell", "1;36", interactive);
    let subtitle = paint("remote command relay over http", "2;37", interactive);

    println!("+------------------------------------------------------------+");
    println!("| {:<58} |", title);
    println!("| {:<58} |", subtitle);
    println!("+------------------------------------------------------------+");
    println!("| Target                                                      |");
    for line in build_dashboard_lines(config) {
        println!("| {:<58} |", fit_box_line(&line, 58));
    }
    println!("+------------------------------------------------------------+");
    println!("| Commands                                                    |");
    for (idx, command) in commands.iter().enumerate() {
        let usage = fit_box_line(command.usage(), 54);
        println!("| {:>2}) {:<54} |", idx, usage);
    }
    println!("|  *) {:<54} |", "anything else runs on the remote host");
    println!("+------------------------------------------------------------+");
    println!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn build_dashboard_lines(config: &ShellConfig) -> Vec<String> {
    let encoding = if config.encoding { "base64" } else { "off" };
    vec![
        format!("URL: {}", config.url),
        format!("Method: {}", config.method),
        format!("Parameter: {}", config.parameter),
        format!("Encoding: {encoding}"),
    ]
}

fn fit_box_line(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let keep = width - 3;
    let head: String = chars.into_iter().take(keep).collect();
    format!("{head}...")
}
