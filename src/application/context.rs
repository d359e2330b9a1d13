//! 명령 실행 시 넘겨받는 공유 실행 컨텍스트.

use std::sync::Arc;

use crate::application::config::ShellConfig;
use crate::application::ports::{Codec, PayloadBuilder, Reporter};
use crate::application::session::DeliverySession;

/// 시작 시 한 번 조립해 커널 호출마다 `&mut`로 넘긴다.
pub struct ShellContext {
    pub config: ShellConfig,
    pub session: DeliverySession,
    pub codec: Arc<dyn Codec>,
    pub payload_builder: Arc<dyn PayloadBuilder>,
    pub reporter: Arc<dyn Reporter>,
}

impl ShellContext {
    /// 세션에 현재 대상 설정을 적용한 컨텍스트를 만든다.
    pub fn new(
        config: ShellConfig,
        session: DeliverySession,
        codec: Arc<dyn Codec>,
        payload_builder: Arc<dyn PayloadBuilder>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let mut ctx = Self {
            config,
            session,
            codec,
            payload_builder,
            reporter,
        };
        ctx.apply_target();
        ctx
    }

    /// `config`의 대상 설정을 전달 세션에 다시 반영한다.
    pub fn apply_target(&mut self) {
        self.session.set_config(
            &self.config.url,
            self.config.method,
            &self.config.parameter,
            self.config.encoding,
        );
    }

    /// 현재 scope 기준으로 원격 셸 명령 페이로드를 만든다.
    pub fn build_payload(&self, command: &str) -> String {
        self.payload_builder.build(command, &self.config.scope)
    }
}
