//! `set`: 실행 중 대상 설정을 바꾸고 전달 세션에 다시 적용한다.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use super::typed_arguments;
use crate::application::config::ShellConfig;
use crate::application::context::ShellContext;
use crate::application::kernel::{Completion, KernelCommand};
use crate::domain::delivery::DeliveryMethod;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

const KEYS: [&str; 4] = ["url", "method", "parameter", "encoding"];

pub struct SetCommand;

#[async_trait]
impl KernelCommand for SetCommand {
    fn name(&self) -> &str {
        "set"
    }

    fn usage(&self) -> &str {
        "set [url|method|parameter|encoding <value>]"
    }

    fn completion(&self) -> Completion {
        Completion::MultiLevel
    }

    // 값 후보는 호출 시점의 설정에서 만든다.
    fn complete(&self, line: &str, config: &ShellConfig) -> Vec<String> {
        let (typed, position) = typed_arguments(line);
        match position {
            0 => KEYS.iter().map(ToString::to_string).collect(),
            1 => match typed[0] {
                "url" => vec![config.url.clone()],
                "method" => DeliveryMethod::ALL
                    .iter()
                    .map(|method| method.as_str().to_string())
                    .collect(),
                "parameter" => vec![config.parameter.clone()],
                "encoding" => vec!["on".to_string(), "off".to_string()],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        let Some(key) = line.arg(0) else {
            print_target(ctx);
            return Ok(Transition::None);
        };
        let Some(value) = line.arg(1) else {
            bail!("usage: {}", self.usage());
        };

        match key {
            "url" => ctx.config.url = value.to_string(),
            "method" => {
                ctx.config.method = value
                    .parse::<DeliveryMethod>()
                    .map_err(anyhow::Error::msg)?;
            }
            "parameter" => ctx.config.parameter = value.to_string(),
            "encoding" => {
                ctx.config.encoding =
                    parse_switch(value).with_context(|| format!("invalid encoding value `{value}`"))?;
            }
            other => bail!("unknown setting `{other}` (expected one of: {})", KEYS.join(", ")),
        }

        ctx.apply_target();
        print_target(ctx);
        Ok(Transition::Stay)
    }
}

/// 세션에 실제로 적용된 대상 설정을 출력한다.
fn print_target(ctx: &ShellContext) {
    let session = &ctx.session;
    ctx.reporter.kv("url", session.host());
    ctx.reporter.kv("method", session.method().as_str());
    ctx.reporter.kv("parameter", session.parameter());
    ctx.reporter
        .kv("encoding", if session.encoding() { "on" } else { "off" });
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => bail!("expected on or off"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingTransport, context_with, memory_context, shell_config};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn updates_config_and_reconfigures_session() {
        let transport = RecordingTransport::ok("b2s=");
        let (mut ctx, _) = context_with(transport.clone());

        SetCommand
            .exec(&KernelLine::parse("set method header"), &mut ctx)
            .await
            .unwrap();
        SetCommand
            .exec(&KernelLine::parse("set parameter X-Run"), &mut ctx)
            .await
            .unwrap();
        ctx.session.send("ls", |_| {}).await.unwrap();

        assert_eq!(ctx.config.method, DeliveryMethod::Header);
        assert_eq!(ctx.session.method(), DeliveryMethod::Header);
        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://h");
        assert_eq!(sent.headers.get("X-Run").map(String::as_str), Some("bHM="));
    }

    #[tokio::test]
    async fn without_arguments_prints_current_target() {
        let (mut ctx, output) = memory_context();

        SetCommand
            .exec(&KernelLine::parse("set"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(
            output.lines(),
            vec![
                "url: http://h".to_string(),
                "method: query".to_string(),
                "parameter: p".to_string(),
                "encoding: on".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn reports_values_applied_to_session() {
        let (mut ctx, output) = memory_context();

        SetCommand
            .exec(&KernelLine::parse("set encoding off"), &mut ctx)
            .await
            .unwrap();

        assert!(!ctx.session.encoding());
        assert_eq!(ctx.session.host(), "http://h");
        assert_eq!(ctx.session.parameter(), "p");
        assert_eq!(output.lines().last().map(String::as_str), Some("encoding: off"));
    }

    #[tokio::test]
    async fn rejects_unknown_keys_and_values() {
        let (mut ctx, _) = memory_context();
        for input in ["set colour red", "set method pigeon", "set encoding maybe", "set url"] {
            assert!(
                SetCommand.exec(&KernelLine::parse(input), &mut ctx).await.is_err(),
                "{input}"
            );
        }
        assert_eq!(ctx.config, shell_config());
    }

    #[test]
    fn completion_reflects_live_config() {
        let mut config = shell_config();
        assert_eq!(SetCommand.complete("set ", &config), KEYS.to_vec());
        assert_eq!(SetCommand.complete("set url ", &config), vec!["http://h"]);

        config.url = "http://changed".to_string();
        assert_eq!(SetCommand.complete("set url ", &config), vec!["http://changed"]);
        assert_eq!(
            SetCommand.complete("set method ", &config),
            vec!["query", "body", "header", "cookie"]
        );
        assert!(SetCommand.complete("set method body ", &config).is_empty());
    }
}
