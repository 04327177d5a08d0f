//! 监听器优先级
//!
//! 数值越小越先执行。以下常量只是约定俗成的分档，调度器不会对其做任何特殊处理。

/// 优先级类型
pub type Priority = i32;

/// 最先执行，只观察不修改
pub const MONITOR: Priority = i32::MIN;
/// 事件发出方自身的实现逻辑
pub const IMPL: Priority = -1;
pub const HIGHEST: Priority = 0;
pub const HIGH: Priority = 1;
pub const NORMAL: Priority = 2;
pub const LOW: Priority = 3;
pub const LOWEST: Priority = 4;
/// 覆盖其他监听器的结果
pub const OVERRIDE: Priority = 100;
/// 最后执行；转发（redirect）监听器也使用该优先级
pub const DEBUG: Priority = i32::MAX;
