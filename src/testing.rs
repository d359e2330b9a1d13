//! 단위 테스트 공용 가짜 구현체.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::application::config::ShellConfig;
use crate::application::context::ShellContext;
use crate::application::kernel::{Completion, KernelCommand};
use crate::application::ports::{
    Codec, HttpTransport, LineCompleter, LineSource, PayloadBuilder, ReadOutcome, Reporter,
};
use crate::application::session::DeliverySession;
use crate::domain::delivery::{DeliveryMethod, DeliveryRequest, DeliveryResponse};
use crate::domain::line::KernelLine;
use crate::domain::mode::Transition;
use crate::infrastructure::codec::Base64Codec;
use crate::infrastructure::payload::ShellPayloadBuilder;

/// 요청을 기록하고 고정 응답(또는 전송 실패)을 돌려주는 전송 구현체.
#[derive(Clone)]
pub(crate) struct RecordingTransport {
    reply: Result<DeliveryResponse, String>,
    requests: Arc<Mutex<Vec<DeliveryRequest>>>,
}

impl RecordingTransport {
    pub(crate) fn ok(body: &str) -> Self {
        Self::with_response(DeliveryResponse {
            status: 200,
            reason: "OK".to_string(),
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
        })
    }

    pub(crate) fn status(code: u16, reason: &str) -> Self {
        Self::with_response(DeliveryResponse {
            status: code,
            reason: reason.to_string(),
            headers: BTreeMap::new(),
            body: Vec::new(),
        })
    }

    pub(crate) fn with_response(response: DeliveryResponse) -> Self {
        Self {
            reply: Ok(response),
            requests: Arc::default(),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Arc::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<DeliveryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: &DeliveryRequest) -> Result<DeliveryResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(|msg| anyhow!(msg))
    }
}

/// 출력 내용을 메모리에 모으는 리포터.
#[derive(Clone, Default)]
pub(crate) struct MemoryReporter {
    lines: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Reporter for MemoryReporter {
    fn raw(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn kv(&self, key: &str, value: &str) {
        self.lines.lock().unwrap().push(format!("{key}: {value}"));
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// 미리 정한 결과를 차례로 돌려주는 입력 소스. 소진되면 입력 끝.
pub(crate) struct ScriptedLineSource {
    script: VecDeque<Result<ReadOutcome>>,
    prompts: Vec<String>,
}

impl ScriptedLineSource {
    pub(crate) fn new(script: Vec<Result<ReadOutcome>>) -> Self {
        Self {
            script: script.into(),
            prompts: Vec::new(),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.clone()
    }
}

impl LineSource for ScriptedLineSource {
    fn read_line(&mut self, prompt: &str, _completer: &dyn LineCompleter) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        self.script
            .pop_front()
            .unwrap_or(Ok(ReadOutcome::EndOfInput))
    }
}

/// 호출된 줄을 기록하고 정해진 전이를 돌려주는 명령.
#[derive(Clone)]
pub(crate) struct StubCommand {
    name: String,
    transition: Transition,
    completion: Completion,
    candidates: Vec<String>,
    scope: Option<String>,
    calls: Arc<Mutex<Vec<KernelLine>>>,
}

impl StubCommand {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transition: Transition::Stay,
            completion: Completion::Disabled,
            candidates: Vec::new(),
            scope: None,
            calls: Arc::default(),
        }
    }

    pub(crate) fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub(crate) fn with_completion(mut self, completion: Completion, candidates: &[&str]) -> Self {
        self.completion = completion;
        self.candidates = candidates.iter().map(|c| c.to_string()).collect();
        self
    }

    /// 실행할 때 scope를 바꾼다.
    pub(crate) fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<KernelLine> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl KernelCommand for StubCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn completion(&self) -> Completion {
        self.completion
    }

    fn complete(&self, _line: &str, _config: &ShellConfig) -> Vec<String> {
        self.candidates.clone()
    }

    async fn exec(&mut self, line: &KernelLine, ctx: &mut ShellContext) -> Result<Transition> {
        self.calls.lock().unwrap().push(line.clone());
        if let Some(scope) = &self.scope {
            ctx.config.scope = scope.clone();
        }
        Ok(self.transition.clone())
    }
}

pub(crate) fn shell_config() -> ShellConfig {
    ShellConfig {
        url: "http://h".to_string(),
        method: DeliveryMethod::Query,
        parameter: "p".to_string(),
        encoding: true,
        scope: String::new(),
    }
}

pub(crate) fn base64_codec() -> Arc<dyn Codec> {
    Arc::new(Base64Codec)
}

pub(crate) fn payload_builder() -> Arc<dyn PayloadBuilder> {
    Arc::new(ShellPayloadBuilder)
}

pub(crate) fn memory_context() -> (ShellContext, MemoryReporter) {
    context_with(RecordingTransport::ok(""))
}

pub(crate) fn context_with(transport: RecordingTransport) -> (ShellContext, MemoryReporter) {
    let reporter = MemoryReporter::default();
    let codec = base64_codec();
    let session = DeliverySession::new(Box::new(transport), codec.clone());
    let ctx = ShellContext::new(
        shell_config(),
        session,
        codec,
        payload_builder(),
        Arc::new(reporter.clone()),
    );
    (ctx, reporter)
}

