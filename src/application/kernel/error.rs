/// 커널이 직접 만들어내는 오류.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KernelError {
    /// 이름이 일치하는 명령도, 기본 핸들러도 없음.
    #[error("no default command defined")]
    NoDefaultCommand,
}
