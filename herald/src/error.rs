//! 事件分发统一错误定义
//!
//! 所有失败都同步返回给调用方，不会被吞掉。
//!
use crate::settings::Phase;
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    // --- 阶段 ---
    #[error("invalid phase: phase={phase}, reason={reason}")]
    InvalidPhase { phase: Phase, reason: &'static str },

    // --- 取消 ---
    #[error("event is not active")]
    NotActive,
    #[error("event is not cancellable")]
    NotCancellable,
    #[error("post phase cannot be cancelled")]
    PostPhase,

    // --- 触发 ---
    #[error("event must be either cancellable or chronicled to trigger with an action")]
    UngatableEvent,
    #[error("listener failed: {0}")]
    Listener(#[source] anyhow::Error),
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// 还原监听器返回的错误：监听器内部经 `?` 传出的 `EventError` 原样返回
    pub(crate) fn from_listener(err: anyhow::Error) -> Self {
        match err.downcast::<EventError>() {
            Ok(inner) => inner,
            Err(other) => EventError::Listener(other),
        }
    }
}
