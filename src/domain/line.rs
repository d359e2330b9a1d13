//! 입력 한 줄을 명령 이름/인자로 분해하는 파서.

/// 셸 체이닝 연산자. 포함된 줄은 내장 명령으로 해석하지 않는다.
const CHAIN_OPERATOR: &str = "&&";

/// 파싱된 입력 한 줄.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelLine {
    name: String,
    raw: String,
    args: Vec<String>,
}

impl KernelLine {
    /// 원본 입력을 파싱한다. 앞뒤 공백은 제거된다.
    pub fn parse(input: &str) -> Self {
        let raw = input.trim().to_string();
        let mut parts = raw.split_whitespace().map(ToString::to_string);
        let name = parts.next().unwrap_or_default();
        let args = parts.collect();

        Self { name, raw, args }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }

    /// 명령 이름 뒤의 나머지 텍스트를 내부 공백 그대로 반환한다.
    pub fn rest(&self) -> &str {
        self.raw[self.name.len()..].trim_start()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn is_chained(&self) -> bool {
        self.raw.contains(CHAIN_OPERATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_name_and_args() {
        let line = KernelLine::parse("  info -url   status ");
        assert_eq!(line.name(), "info");
        assert_eq!(line.raw(), "info -url   status");
        assert_eq!(line.args(), ["-url".to_string(), "status".to_string()]);
        assert_eq!(line.rest(), "-url   status");
        assert_eq!(line.arg(1), Some("status"));
        assert_eq!(line.arg(2), None);
    }

    #[test]
    fn empty_and_whitespace_lines_have_no_name() {
        for input in ["", "   ", "\t \t"] {
            let line = KernelLine::parse(input);
            assert!(line.is_empty());
            assert_eq!(line.name(), "");
            assert!(line.args().is_empty());
            assert_eq!(line.rest(), "");
        }
    }

    #[test]
    fn detects_chained_commands() {
        assert!(KernelLine::parse("cd /tmp && ls").is_chained());
        assert!(!KernelLine::parse("ls -la").is_chained());
    }

    #[test]
    fn single_word_has_empty_rest() {
        let line = KernelLine::parse("exit");
        assert_eq!(line.name(), "exit");
        assert_eq!(line.rest(), "");
    }
}
