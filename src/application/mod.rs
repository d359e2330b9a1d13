//! Application layer
//! 커널/전달 세션/명령 핸들러를 정의하고 포트(추상 인터페이스)를 통해 인프라를 사용한다.

pub mod commands;
pub mod config;
pub mod context;
pub mod kernel;
pub mod ports;
pub mod session;
pub mod usecases;
