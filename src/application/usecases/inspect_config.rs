//! 설정 파일 탐색/병합 결과를 확인하는 유스케이스.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::config::ShellConfig;
use crate::application::ports::ConfigRepository;
use crate::domain::target::TargetOptions;

/// 현재 적용될 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 파일 병합 결과에 CLI 덮어쓰기까지 반영한 최종 대상 설정을 붙인다.
    pub fn execute(&self, options: &TargetOptions) -> Result<String> {
        let mut inspection: Value = serde_json::from_str(&self.config_repo.inspect_pretty_json()?)
            .context("failed to parse config inspection")?;

        let config = self.config_repo.load()?.with_overrides(options);
        let target = ShellConfig::from_config(&config);
        let history = config.history();
        inspection["effective"] = json!({
            "url": target.url,
            "method": target.method,
            "parameter": target.parameter,
            "encoding": target.encoding,
            "timeout_ms": config.timeout().as_millis() as u64,
            "history_file": history.path.display().to_string(),
            "history_limit": history.limit,
        });

        Ok(serde_json::to_string_pretty(&inspection)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::Config;

    struct StaticRepo;

    impl ConfigRepository for StaticRepo {
        fn load(&self) -> Result<Config> {
            Ok(serde_json::from_str(r#"{"target": {"url": "http://file", "method": "cookie"}}"#)?)
        }

        fn inspect_pretty_json(&self) -> Result<String> {
            Ok(r#"{"loaded_paths": ["/tmp/a.json"]}"#.to_string())
        }
    }

    #[test]
    fn effective_section_applies_cli_overrides() {
        let options = TargetOptions {
            parameter: Some("sid".to_string()),
            ..TargetOptions::default()
        };
        let raw = InspectConfigUseCase { config_repo: &StaticRepo }
            .execute(&options)
            .unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["loaded_paths"][0], "/tmp/a.json");
        assert_eq!(value["effective"]["url"], "http://file");
        assert_eq!(value["effective"]["method"], "cookie");
        assert_eq!(value["effective"]["parameter"], "sid");
        assert_eq!(value["effective"]["timeout_ms"], 30000);
    }
}
