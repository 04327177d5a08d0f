//! 进程内强类型事件分发库（herald）
//!
//! 发出方声明强类型事件槽（`Event<A>`），监听方以优先级与“忽略已取消”标志绑定回调；
//! 发出方触发事件时按优先级调用回调，可根据事件是否被取消决定是否执行后续动作，
//! 也可以把分发拆为 PRE/POST 两个阶段包围该动作（编年事件）。
//!
//! - 注册表（`registry`）：按阶段维护确定的优先级顺序；
//! - 执行帧（`frame`）：每次触发一帧，取消状态只作用于最内层的活动触发；
//! - 阶段调度（`event`）：三种触发形式与取消门控；
//! - 转发（`Event::redirect`）：把 N 元事件转发为带发出方身份的 N+1 元事件并回传取消状态；
//! - 批量解绑（`flush`）：清空容器拥有的全部事件槽；
//! - 值盒（`variable`）：经由事件回写结果。
//!
//! 典型用法：
//! 1. 发出方以 `Event::create` 声明事件字段；
//! 2. 监听方保存 `Listener` 句柄并调用 `bind`/`bind_phase`；
//! 3. 发出方调用 `trigger` 或 `trigger_with`，之后通过 `is_cancelled` 判断结果；
//! 4. 生命周期结束时 `unbind` 或 `flush`。
//!
//! 分发是单线程同步的，`Event` 不能跨线程使用。
//!
pub mod error;
pub mod event;
pub mod flush;
pub mod listener;
pub mod settings;
pub mod variable;

mod frame;
mod registry;

pub use error::{EventError, EventResult};
pub use event::{Event, EventId, Prepend};
pub use flush::{Emitter, EventSet, Unbind, flush};
pub use listener::{Listener, ListenerId};
pub use settings::{EventConfig, EventFlags, Phase, Priority, priority};
pub use variable::{Constant, Variable};

// 允许在本 crate 内部通过 ::herald 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::herald 路径。
extern crate self as herald;
