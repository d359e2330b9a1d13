//! 원격 셸 명령 페이로드 구성.

use crate::application::ports::{PayloadBuilder, UNREADABLE_MARK};

/// scope(원격 작업 디렉터리)가 있으면 `cd`를 앞에 붙이는 POSIX 셸용 빌더.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellPayloadBuilder;

impl PayloadBuilder for ShellPayloadBuilder {
    fn build(&self, command: &str, scope: &str) -> String {
        if scope.is_empty() {
            return command.to_string();
        }
        format!("cd {} && {command}", single_quote(scope))
    }

    fn write_chunk(&self, remote: &str, chunk: &str, append: bool, scope: &str) -> String {
        let redirect = if append { ">>" } else { ">" };
        let command = format!(
            "printf '%s' {} | base64 -d {redirect} {}",
            single_quote(chunk),
            single_quote(remote)
        );
        self.build(&command, scope)
    }

    fn read_file(&self, remote: &str, scope: &str) -> String {
        let path = single_quote(remote);
        let command = format!("test -r {path} && base64 < {path} || printf '{UNREADABLE_MARK}'");
        self.build(&command, scope)
    }
}

/// 작은따옴표 안에서 `'`는 `'\''`로 닫고 다시 연다.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_scope_passes_command_through() {
        assert_eq!(ShellPayloadBuilder.build("id -u", ""), "id -u");
    }

    #[test]
    fn scope_is_quoted_and_prefixed() {
        assert_eq!(ShellPayloadBuilder.build("ls", "/var/www"), "cd '/var/www' && ls");
        assert_eq!(
            ShellPayloadBuilder.build("pwd", "/tmp/it's"),
            r"cd '/tmp/it'\''s' && pwd"
        );
    }

    #[test]
    fn chunk_writes_truncate_first_then_append() {
        assert_eq!(
            ShellPayloadBuilder.write_chunk("out.bin", "bHM=", false, ""),
            "printf '%s' 'bHM=' | base64 -d > 'out.bin'"
        );
        assert_eq!(
            ShellPayloadBuilder.write_chunk("my file", "b2s=", true, "/tmp"),
            "cd '/tmp' && printf '%s' 'b2s=' | base64 -d >> 'my file'"
        );
    }

    #[test]
    fn read_file_reports_unreadable_paths_with_mark() {
        assert_eq!(
            ShellPayloadBuilder.read_file("/etc/it's", ""),
            r"test -r '/etc/it'\''s' && base64 < '/etc/it'\''s' || printf '!'"
        );
        assert!(
            ShellPayloadBuilder
                .read_file("notes", "/home")
                .starts_with("cd '/home' && test -r 'notes'")
        );
    }
}
