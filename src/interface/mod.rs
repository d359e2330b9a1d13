//! Interface layer
//! 사용자 입력(CLI/대화형 셸)을 애플리케이션 유스케이스로 연결한다.

pub mod cli;
