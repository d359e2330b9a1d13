//! 대화형 셸 한 줄 입력기.
//! 탭 완성, 히스토리 탐색, Ctrl-C/Ctrl-D 처리를 담당한다.

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{self, ClearType};
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::application::config::HistoryOptions;
use crate::application::ports::{LineCompleter, LineSource, LineSourceFactory, ReadOutcome};

/// 설정된 히스토리 파일을 쓰는 터미널 입력 소스를 만든다.
pub struct TerminalLineSourceFactory;

impl LineSourceFactory for TerminalLineSourceFactory {
    fn build(&self, history: &HistoryOptions) -> Box<dyn LineSource> {
        Box::new(TerminalLineSource::new(History::load(history)))
    }
}

/// 한 줄 입력 소스.
/// - TTY + 지원 터미널: raw 모드 라인 편집
/// - non-TTY/미지원 터미널: 일반 라인 입력
pub struct TerminalLineSource {
    history: History,
}

impl TerminalLineSource {
    fn new(history: History) -> Self {
        Self { history }
    }
}

impl LineSource for TerminalLineSource {
    fn read_line(&mut self, prompt: &str, completer: &dyn LineCompleter) -> Result<ReadOutcome> {
        let outcome = match enter_interactive() {
            Some(_guard) => {
                // raw 모드 진입 이후의 실패는 입력 소스 오류로 그대로 올린다.
                let mut stdout = io::stdout();
                edit_line(
                    &mut stdout,
                    || Ok(event::read()?),
                    prompt,
                    completer,
                    &self.history,
                )?
            }
            None => read_line_fallback(prompt)?,
        };

        if let ReadOutcome::Line(line) = &outcome {
            self.history.push(line);
        }
        Ok(outcome)
    }
}

/// 편집 가능한 터미널이면 raw 모드에 들어간다. 진입 자체가 실패할 때만 일반 입력으로 내려간다.
fn enter_interactive() -> Option<InputGuard> {
    if !supports_interactive_input() {
        return None;
    }

    match InputGuard::enter(&mut io::stdout()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            warn!(error = %err, "raw mode unavailable, falling back to plain stdin");
            None
        }
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 편집을 비활성화한다.
    if let Ok(term) = env::var("TERM") && term.eq_ignore_ascii_case("dumb") {
        return false;
    }

    true
}

fn read_line_fallback(prompt: &str) -> Result<ReadOutcome> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(ReadOutcome::EndOfInput);
    }

    Ok(ReadOutcome::Line(trim_newline(line)))
}

fn edit_line<W, E>(
    out: &mut W,
    mut next_event: E,
    prompt: &str,
    completer: &dyn LineCompleter,
    history: &History,
) -> Result<ReadOutcome>
where
    W: Write,
    E: FnMut() -> Result<Event>,
{
    let mut input = String::new();
    let mut cursor_chars = 0usize;
    let mut browse = HistoryCursor::new(history.entries.len());

    loop {
        render_line(out, prompt, &input, cursor_chars)?;

        match next_event()? {
            Event::Paste(text) => {
                for ch in text.chars().filter(|ch| *ch != '\n' && *ch != '\r') {
                    insert_char_at(&mut input, cursor_chars, ch);
                    cursor_chars += 1;
                }
            }
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('c') => {
                            write!(out, "^C\r\n")?;
                            return Ok(ReadOutcome::Interrupted);
                        }
                        KeyCode::Char('d') if input.is_empty() => {
                            write!(out, "\r\n")?;
                            return Ok(ReadOutcome::EndOfInput);
                        }
                        KeyCode::Char('a') => cursor_chars = 0,
                        KeyCode::Char('e') => cursor_chars = input.chars().count(),
                        KeyCode::Char('u') => {
                            input.clear();
                            cursor_chars = 0;
                        }
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Enter => {
                        write!(out, "\r\n")?;
                        out.flush()?;
                        return Ok(ReadOutcome::Line(input));
                    }
                    KeyCode::Tab => {
                        // 커서 위치까지의 입력으로 후보를 계산한다.
                        let head: String = input.chars().take(cursor_chars).collect();
                        let candidates = completer.complete(&head);
                        match apply_completion(&head, &candidates) {
                            Some(completed) => {
                                let tail: String = input.chars().skip(cursor_chars).collect();
                                cursor_chars = completed.chars().count();
                                input = format!("{completed}{tail}");
                            }
                            None if candidates.len() > 1 => {
                                write!(out, "\r\n{}\r\n", candidates.join("  "))?;
                            }
                            None => {}
                        }
                    }
                    KeyCode::Backspace => {
                        if cursor_chars > 0 {
                            remove_char_at(&mut input, cursor_chars - 1);
                            cursor_chars -= 1;
                        }
                    }
                    KeyCode::Delete => {
                        if cursor_chars < input.chars().count() {
                            remove_char_at(&mut input, cursor_chars);
                        }
                    }
                    KeyCode::Left => {
                        cursor_chars = cursor_chars.saturating_sub(1);
                    }
                    KeyCode::Right => {
                        cursor_chars = (cursor_chars + 1).min(input.chars().count());
                    }
                    KeyCode::Home => {
                        cursor_chars = 0;
                    }
                    KeyCode::End => {
                        cursor_chars = input.chars().count();
                    }
                    KeyCode::Up => {
                        if let Some(entry) = browse.older(&history.entries, &input) {
                            input = entry;
                            cursor_chars = input.chars().count();
                        }
                    }
                    KeyCode::Down => {
                        if let Some(entry) = browse.newer(&history.entries) {
                            input = entry;
                            cursor_chars = input.chars().count();
                        }
                    }
                    KeyCode::Char(ch) => {
                        insert_char_at(&mut input, cursor_chars, ch);
                        cursor_chars += 1;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

/// 마지막 토큰을 후보로 치환한다.
/// 후보가 하나면 공백까지 붙이고, 여럿이면 공통 접두사만큼만 늘린다.
fn apply_completion(head: &str, candidates: &[String]) -> Option<String> {
    let token_start = head
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0);
    let (prefix, partial) = head.split_at(token_start);

    match candidates {
        [] => None,
        [only] => Some(format!("{prefix}{only} ")),
        many => {
            let common = common_prefix(many);
            (common.len() > partial.len()).then(|| format!("{prefix}{common}"))
        }
    }
}

fn common_prefix(candidates: &[String]) -> String {
    let Some(first) = candidates.first() else {
        return String::new();
    };

    let mut end = first.len();
    for other in &candidates[1..] {
        end = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((idx, ch), _)| idx + ch.len_utf8())
            .unwrap_or(0)
            .min(end);
    }
    first[..end].to_string()
}

fn render_line<W: Write>(
    out: &mut W,
    prompt: &str,
    input: &str,
    cursor_chars: usize,
) -> Result<()> {
    let head: String = input.chars().take(cursor_chars).collect();
    let col = display_width(prompt) + display_width(&head);
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
    )?;
    write!(out, "{prompt}{input}")?;
    execute!(out, cursor::MoveToColumn(col.min(u16::MAX as usize) as u16))?;
    out.flush()?;
    Ok(())
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

struct InputGuard;

impl InputGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

/// 파일에 보존되는 입력 히스토리. 가장 오래된 줄부터 버린다.
struct History {
    path: PathBuf,
    limit: usize,
    entries: Vec<String>,
}

impl History {
    fn load(options: &HistoryOptions) -> Self {
        let entries = match fs::read_to_string(&options.path) {
            Ok(raw) => raw
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(path = %options.path.display(), error = %err, "failed to read history");
                Vec::new()
            }
        };

        let mut history = Self {
            path: options.path.clone(),
            limit: options.limit,
            entries,
        };
        history.truncate();
        history
    }

    /// 빈 줄과 직전 항목과 같은 줄은 남기지 않는다.
    fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.entries.last().map(String::as_str) == Some(line) {
            return;
        }
        self.entries.push(line.to_string());
        self.truncate();
        self.persist();
    }

    fn truncate(&mut self) {
        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
        }
    }

    fn persist(&self) {
        let mut body = self.entries.join("\n");
        body.push('\n');
        if let Err(err) = fs::write(&self.path, body) {
            warn!(path = %self.path.display(), error = %err, "failed to save history");
        }
    }
}

/// Up/Down 탐색 위치. 탐색을 시작할 때 입력 중이던 줄을 보관한다.
struct HistoryCursor {
    index: usize,
    len: usize,
    draft: Option<String>,
}

impl HistoryCursor {
    fn new(len: usize) -> Self {
        Self {
            index: len,
            len,
            draft: None,
        }
    }

    fn older(&mut self, entries: &[String], current: &str) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        if self.index == self.len {
            self.draft = Some(current.to_string());
        }
        self.index -= 1;
        entries.get(self.index).cloned()
    }

    fn newer(&mut self, entries: &[String]) -> Option<String> {
        if self.index >= self.len {
            return None;
        }
        self.index += 1;
        if self.index == self.len {
            return Some(self.draft.take().unwrap_or_default());
        }
        entries.get(self.index).cloned()
    }
}
