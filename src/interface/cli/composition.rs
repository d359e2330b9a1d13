//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use crate::application::ports::{Codec, PayloadBuilder, Reporter};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::start_shell::StartShellUseCase;
use crate::infrastructure::adapters::{ConsoleReporter, JsonConfigRepository, ReqwestTransportFactory};
use crate::infrastructure::codec::Base64Codec;
use crate::infrastructure::payload::ShellPayloadBuilder;
use crate::interface::cli::repl_input::TerminalLineSourceFactory;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    transport_factory: ReqwestTransportFactory,
    line_source_factory: TerminalLineSourceFactory,
    codec: Arc<dyn Codec>,
    payload_builder: Arc<dyn PayloadBuilder>,
    reporter: Arc<dyn Reporter>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new()
    }
}

impl AppComposition {
    pub fn new() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            transport_factory: ReqwestTransportFactory,
            line_source_factory: TerminalLineSourceFactory,
            codec: Arc::new(Base64Codec),
            payload_builder: Arc::new(ShellPayloadBuilder),
            reporter: Arc::new(ConsoleReporter::new()),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 대화형 셸 유스케이스를 생성한다.
    pub fn start_shell_usecase(&self) -> StartShellUseCase<'_> {
        StartShellUseCase {
            config_repo: &self.config_repo,
            transport_factory: &self.transport_factory,
            line_source_factory: &self.line_source_factory,
            codec: self.codec.clone(),
            payload_builder: self.payload_builder.clone(),
            reporter: self.reporter.clone(),
        }
    }
}
