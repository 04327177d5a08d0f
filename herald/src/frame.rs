//! 执行帧栈（ExecutionFrameStack）
//!
//! 每次阶段级触发压入一帧，记录当前阶段与取消标志；嵌套/重入触发再压入新帧。
//! `cancel()` 只作用于最内层活动帧，出栈后的帧成为 `is_cancelled()` 的结果。
//!
use crate::settings::Phase;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) phase: Phase,
    pub(crate) cancelled: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    frames: RefCell<Vec<Frame>>,
    last: Cell<Option<Frame>>,
}

impl FrameStack {
    /// 压入新帧，离开作用域时自动出栈（监听器失败或 panic 时同样成立）
    pub(crate) fn enter(&self, phase: Phase) -> FrameGuard<'_> {
        self.frames.borrow_mut().push(Frame {
            phase,
            cancelled: false,
        });
        FrameGuard { stack: self }
    }

    fn pop(&self) {
        if let Some(frame) = self.frames.borrow_mut().pop() {
            self.last.set(Some(frame));
        }
    }

    pub(crate) fn current(&self) -> Option<Frame> {
        self.frames.borrow().last().copied()
    }

    /// 修改当前帧的取消标志；无活动帧时返回 false
    pub(crate) fn set_cancelled(&self, cancelled: bool) -> bool {
        match self.frames.borrow_mut().last_mut() {
            Some(frame) => {
                frame.cancelled = cancelled;
                true
            }
            None => false,
        }
    }

    /// 最近一次完成的帧的取消标志
    pub(crate) fn last_cancelled(&self) -> bool {
        self.last.get().is_some_and(|frame| frame.cancelled)
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.borrow().len()
    }
}

pub(crate) struct FrameGuard<'a> {
    stack: &'a FrameStack,
}

impl FrameGuard<'_> {
    pub(crate) fn cancelled(&self) -> bool {
        self.stack.current().is_some_and(|frame| frame.cancelled)
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}
