//! shellrelay library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

#[cfg(test)]
pub(crate) mod testing;

use domain::target::TargetOptions;
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 대화형 셸 실행 함수.
pub async fn run(options: TargetOptions) -> Result<()> {
    let composition = AppComposition::default();
    interface::cli::run_shell(&composition, &options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json(options: &TargetOptions) -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute(options)
}
