//! 事件设置
//!
//! 构造期确定的事件属性：标志（`EventFlags`）、配置（`EventConfig`）、
//! 阶段（`Phase`）与优先级分档（`priority`）。

mod flags;
mod phase;
pub mod priority;

pub use flags::{EventConfig, EventFlags};
pub use phase::Phase;
pub use priority::Priority;
