//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
/// 원격 출력은 stdout, 오류는 stderr로 보낸다.
pub struct ConsoleReporter {
    colored: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 오류에 색을 입힌다.
    pub fn new() -> Self {
        Self {
            colored: io::stderr().is_terminal(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn raw(&self, line: &str) {
        println!("{}", line);
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{:<12}: {}", key, value);
    }

    fn error(&self, message: &str) {
        eprintln!("{}", format_error(message, self.colored));
    }
}

fn format_error(message: &str, colored: bool) -> String {
    if colored {
        format!("\x1b[31merror\x1b[0m: {message}")
    } else {
        format!("error: {message}")
    }
}
