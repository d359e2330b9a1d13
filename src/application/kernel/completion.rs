//! 등록된 명령으로 구성하는 탭 완성 트리.

use super::command::{Completion, KernelCommand};
use crate::application::config::ShellConfig;
use crate::application::ports::LineCompleter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionNode {
    pub name: String,
    /// 명령의 동적 후보를 사용하는 노드
    pub dynamic: bool,
    /// 첫 인자 이후 모든 깊이에 적용
    pub multi_level: bool,
}

/// 최상위 명령 이름을 키로 하는 완성 트리. 자식 순서는 레지스트리 순서를 따른다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTree {
    nodes: Vec<CompletionNode>,
}

impl CompletionTree {
    pub fn build(commands: &[Box<dyn KernelCommand>]) -> Self {
        let nodes = commands
            .iter()
            .map(|cmd| {
                let completion = cmd.completion();
                CompletionNode {
                    name: cmd.name().to_string(),
                    dynamic: completion != Completion::Disabled,
                    multi_level: completion == Completion::MultiLevel,
                }
            })
            .collect();
        Self { nodes }
    }

    pub fn nodes(&self) -> &[CompletionNode] {
        &self.nodes
    }

    /// 입력 중인 줄에서 마지막 토큰 자리에 올 후보를 계산한다.
    pub fn complete(
        &self,
        line: &str,
        commands: &[Box<dyn KernelCommand>],
        config: &ShellConfig,
    ) -> Vec<String> {
        let trimmed = line.trim_start();
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let fresh_token = trimmed.is_empty() || trimmed.ends_with(char::is_whitespace);

        // 명령 이름 자리
        if tokens.is_empty() || (tokens.len() == 1 && !fresh_token) {
            let partial = tokens.first().copied().unwrap_or("");
            return self
                .nodes
                .iter()
                .filter(|node| node.name.starts_with(partial))
                .map(|node| node.name.clone())
                .collect();
        }

        let Some(node) = self.nodes.iter().find(|node| node.name == tokens[0]) else {
            return Vec::new();
        };
        if !node.dynamic {
            return Vec::new();
        }

        // 0부터 시작하는 현재 인자 위치
        let arg_index = if fresh_token {
            tokens.len() - 1
        } else {
            tokens.len() - 2
        };
        if arg_index > 0 && !node.multi_level {
            return Vec::new();
        }

        let partial = if fresh_token {
            ""
        } else {
            tokens[tokens.len() - 1]
        };
        let Some(command) = commands.iter().find(|cmd| cmd.name() == node.name) else {
            return Vec::new();
        };

        command
            .complete(trimmed, config)
            .into_iter()
            .filter(|candidate| candidate.starts_with(partial))
            .collect()
    }
}

/// 입력 소스에 넘기는 완성기. 호출 시점의 설정을 명시적으로 들고 있다.
pub struct KernelCompleter<'a> {
    pub tree: &'a CompletionTree,
    pub commands: &'a [Box<dyn KernelCommand>],
    pub config: &'a ShellConfig,
}

impl LineCompleter for KernelCompleter<'_> {
    fn complete(&self, line: &str) -> Vec<String> {
        self.tree.complete(line, self.commands, self.config)
    }
}
