//! Domain layer
//! 입력 줄, 전달 방식, 모드 전이 같은 규칙을 외부 의존성 없이 표현한다.

pub mod delivery;
pub mod line;
pub mod mode;
pub mod prompt;
pub mod target;
