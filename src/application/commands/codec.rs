//! `encode` / `decode`: 전달 코덱을 로컬에서 직접 적용한다.

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

#[derive(Default)]
pub struct EncodeCommand {
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for EncodeCommand {
    fn name(&self) -> &str {
        "encode"
    }

    fn usage(&self) -> &str {
        "encode <text>"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        if line.rest().is_empty() {
            bail!("usage: {}", self.usage());
        }

        let encoded = ctx.codec.encode(line.rest());
        ctx.reporter.raw(&encoded);
        self.result = encoded.into_bytes();
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}

#[derive(Default)]
pub struct DecodeCommand {
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for DecodeCommand {
    fn name(&self) -> &str {
        "decode"
    }

    fn usage(&self) -> &str {
        "decode <text>"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        if line.rest().is_empty() {
            bail!("usage: {}", self.usage());
        }

        let decoded = ctx.codec.decode(line.rest())?;
        ctx.reporter.raw(&decoded);
        self.result = decoded.into_bytes();
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_context;

    #[tokio::test]
    async fn encode_then_decode_prints_both_forms() {
        let (mut ctx, output) = memory_context();

        EncodeCommand::default()
            .exec(&KernelLine::parse("encode ls -la"), &mut ctx)
            .await
            .unwrap();
        DecodeCommand::default()
            .exec(&KernelLine::parse("decode bHMgLWxh"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(output.lines(), vec!["bHMgLWxh".to_string(), "ls -la".to_string()]);
    }

    #[tokio::test]
    async fn missing_argument_is_a_usage_error() {
        let (mut ctx, _) = memory_context();
        let err = EncodeCommand::default()
            .exec(&KernelLine::parse("encode"), &mut ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "usage: encode <text>");
    }

    #[tokio::test]
    async fn invalid_input_surfaces_decode_error() {
        let (mut ctx, output) = memory_context();
        let result = DecodeCommand::default()
            .exec(&KernelLine::parse("decode ***"), &mut ctx)
            .await;
        assert!(result.is_err());
        assert!(output.lines().is_empty());
    }
}
