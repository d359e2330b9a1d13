//! 대화형 셸 세션을 조립하고 실행하는 유스케이스.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::commands::{RawCommand, builtin_commands};
use crate::application::config::ShellConfig;
use crate::application::context::ShellContext;
use crate::application::kernel::Kernel;
use crate::application::ports::{
    Codec, ConfigRepository, LineSource, LineSourceFactory, PayloadBuilder, Reporter,
    TransportFactory,
};
use crate::application::session::{DeliveryError, DeliverySession};
use crate::domain::target::TargetOptions;

/// 설정 로딩 → 세션/커널 조립 → 입력 루프 실행 흐름을 조율한다.
pub struct StartShellUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub transport_factory: &'a dyn TransportFactory,
    pub line_source_factory: &'a dyn LineSourceFactory,
    pub codec: Arc<dyn Codec>,
    pub payload_builder: Arc<dyn PayloadBuilder>,
    pub reporter: Arc<dyn Reporter>,
}

/// 실행 직전 상태. 배너 출력 등 인터페이스 계층이 설정을 읽을 수 있게 분리한다.
pub struct PreparedShell {
    pub kernel: Kernel,
    pub context: ShellContext,
    pub source: Box<dyn LineSource>,
}

impl<'a> StartShellUseCase<'a> {
    /// 설정을 해석하고 세션/커널/입력 소스를 만든다.
    pub fn prepare(&self, options: &TargetOptions) -> Result<PreparedShell> {
        let config = self
            .config_repo
            .load()
            .context("failed to load configuration")?
            .with_overrides(options);

        let transport = self
            .transport_factory
            .build(config.timeout())
            .context("failed to build http transport")?;
        let session = DeliverySession::new(transport, self.codec.clone());
        let context = ShellContext::new(
            ShellConfig::from_config(&config),
            session,
            self.codec.clone(),
            self.payload_builder.clone(),
            self.reporter.clone(),
        );

        if !context.session.is_setup() {
            return Err(DeliveryError::NotConfigured.into());
        }

        let mut kernel = Kernel::new();
        kernel.set_commands(builtin_commands());
        kernel.set_default(Box::new(RawCommand::default()));

        let source = self.line_source_factory.build(&config.history());

        Ok(PreparedShell {
            kernel,
            context,
            source,
        })
    }
}

impl PreparedShell {
    /// 입력이 끝나거나 치명적 전달 오류가 날 때까지 실행한다.
    pub async fn run(mut self) -> Result<()> {
        self.kernel
            .run(self.source.as_mut(), &mut self.context)
            .await
    }
}
