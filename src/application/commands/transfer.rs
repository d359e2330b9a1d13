//! `upload`/`download`: 로컬 파일과 원격 파일을 base64 조각으로 주고받는다.

use std::fs;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use super::raw::{print_output, send_payload};
use crate::application::context::ShellContext;
use crate::application::kernel::KernelCommand;
use crate::application::ports::UNREADABLE_MARK;
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;

/// 요청 하나에 싣는 base64 길이. 4의 배수라 조각마다 따로 풀린다.
const CHUNK_LEN: usize = 4096;

#[derive(Default)]
pub struct UploadCommand {
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for UploadCommand {
    fn name(&self) -> &str {
        "upload"
    }

    fn usage(&self) -> &str {
        "upload <local> <remote>"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        let (Some(local), Some(remote)) = (line.arg(0), line.arg(1)) else {
            bail!("usage: {}", self.usage());
        };

        let bytes =
            fs::read(local).with_context(|| format!("failed to read local file `{local}`"))?;
        let encoded = STANDARD.encode(&bytes);
        let chunks = split_chunks(&encoded);
        let total = chunks.len();

        // 첫 조각은 원격 파일을 새로 만들고, 이후 조각은 이어 붙인다.
        for (idx, chunk) in chunks.into_iter().enumerate() {
            debug!(remote, chunk = idx + 1, total, "uploading chunk");
            let payload =
                ctx.payload_builder
                    .write_chunk(remote, chunk, idx > 0, &ctx.config.scope);
            let output = send_payload(ctx, &payload)
                .await
                .with_context(|| format!("upload stopped at chunk {}/{total}", idx + 1))?;
            print_output(ctx, &output);
        }

        let summary = format!("uploaded {} bytes to {remote}", bytes.len());
        ctx.reporter.raw(&summary);
        self.result = summary.into_bytes();
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}

#[derive(Default)]
pub struct DownloadCommand {
    result: Vec<u8>,
}

#[async_trait]
impl KernelCommand for DownloadCommand {
    fn name(&self) -> &str {
        "download"
    }

    fn usage(&self) -> &str {
        "download <remote> <local>"
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        let (Some(remote), Some(local)) = (line.arg(0), line.arg(1)) else {
            bail!("usage: {}", self.usage());
        };

        let payload = ctx.payload_builder.read_file(remote, &ctx.config.scope);
        let output = send_payload(ctx, &payload).await?;
        if output.contains(UNREADABLE_MARK) {
            bail!("download: remote file `{remote}` is not readable");
        }

        // 원격 base64 출력은 줄바꿈으로 감겨 있다.
        let compact: String = output.split_whitespace().collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .with_context(|| format!("download: remote answer for `{remote}` is not base64"))?;
        fs::write(local, &bytes)
            .with_context(|| format!("failed to write local file `{local}`"))?;

        let summary = format!("downloaded {} bytes to {local}", bytes.len());
        ctx.reporter.raw(&summary);
        self.result = bytes;
        Ok(Transition::Stay)
    }

    fn result(&self) -> &[u8] {
        &self.result
    }
}

/// 빈 파일도 원격 파일을 만들도록 조각 하나는 항상 돌려준다.
fn split_chunks(encoded: &str) -> Vec<&str> {
    if encoded.is_empty() {
        return vec![""];
    }
    // base64 출력은 ASCII라 바이트 경계가 곧 문자 경계다.
    (0..encoded.len())
        .step_by(CHUNK_LEN)
        .map(|start| &encoded[start..(start + CHUNK_LEN).min(encoded.len())])
        .collect()
}
