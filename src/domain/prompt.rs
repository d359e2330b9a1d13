//! 프롬프트 문자열 규칙.

/// `(url)$ ` 또는 scope가 있으면 `(url):scope$ ` 형태로 만든다.
pub fn render_prompt(url: &str, scope: &str) -> String {
    if scope.is_empty() {
        format!("({url})$ ")
    } else {
        format!("({url}):{scope}$ ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_prompt() {
        assert_eq!(render_prompt("http://h/x.php", ""), "(http://h/x.php)$ ");
    }

    #[test]
    fn scoped_prompt() {
        assert_eq!(
            render_prompt("http://h/x.php", "/var/www"),
            "(http://h/x.php):/var/www$ "
        );
    }
}
