//! 阶段调度（PhaseScheduler）
//!
//! 一次触发的编排：选择阶段（DEFAULT，或编年事件的 PRE → POST），
//! 依据取消状态决定是否执行后续动作，并按优先级遍历监听器。
//!
//! 单阶段遍历规则：
//! 1. 压入新帧（`cancelled = false`）；
//! 2. 按优先级依次调用监听器；若监听器设置了 `ignore_cancelled` 且当前帧已取消则跳过，
//!    取消本身不会中断遍历；
//! 3. 出栈，该帧的取消标志成为 `is_cancelled()` 的结果，直到下一次遍历结束。
//!
//! 遍历的是阶段开始时的快照，监听器在遍历期间的绑定/解绑从下一次遍历起生效。
//!
use super::Event;
use crate::error::{EventError, EventResult};
use crate::settings::Phase;

impl<A: 'static> Event<A> {
    /// 普通触发
    ///
    /// 非编年事件执行 DEFAULT 阶段；编年事件依次执行 PRE 与 POST（没有后续动作）。
    pub fn trigger(&self, args: &A) -> EventResult<()> {
        self.trigger_phase(Phase::Default, args)
    }

    /// 携带后续动作触发，返回动作是否被执行
    ///
    /// - 编年事件：执行 PRE；PRE 未被取消则执行 `action`，再执行 POST；
    /// - 仅可取消事件：执行 DEFAULT；未被取消才执行 `action`；
    /// - 其他事件：`UngatableEvent`。
    pub fn trigger_with<F>(&self, args: &A, action: F) -> EventResult<bool>
    where
        F: FnOnce(),
    {
        let flags = self.flags();

        if flags.is_chronicled() {
            if self.walk(Phase::Pre, args)? {
                return Ok(false);
            }
            action();
            self.walk(Phase::Post, args)?;
            Ok(true)
        } else if flags.is_cancellable() {
            if self.walk(Phase::Default, args)? {
                return Ok(false);
            }
            action();
            Ok(true)
        } else {
            Err(EventError::UngatableEvent)
        }
    }

    /// 指定阶段触发
    ///
    /// 非编年事件只接受 DEFAULT；编年事件上的 DEFAULT 展开为 PRE → POST。
    pub fn trigger_phase(&self, phase: Phase, args: &A) -> EventResult<()> {
        self.flags().check_trigger_phase(phase)?;

        if phase == Phase::Default && self.flags().is_chronicled() {
            self.walk(Phase::Pre, args)?;
            self.walk(Phase::Post, args)?;
            return Ok(());
        }

        self.walk(phase, args).map(|_| ())
    }

    /// 执行单个阶段，返回该阶段结束时的取消标志
    fn walk(&self, phase: Phase, args: &A) -> EventResult<bool> {
        let scheduled = self.inner.registry.borrow().snapshot(phase);
        let frame = self.inner.frames.enter(phase);
        let depth = self.depth();

        tracing::debug!(
            event = self.label(),
            %phase,
            depth,
            listeners = scheduled.len(),
            "phase started"
        );

        for entry in &scheduled {
            if entry.ignore_cancelled && frame.cancelled() {
                tracing::trace!(
                    event = self.label(),
                    listener = %entry.listener.id(),
                    %phase,
                    "listener skipped, event cancelled"
                );
                continue;
            }

            tracing::trace!(
                event = self.label(),
                listener = %entry.listener.id(),
                %phase,
                "invoking listener"
            );
            if let Err(err) = entry.listener.call(args) {
                tracing::warn!(
                    event = self.label(),
                    listener = %entry.listener.id(),
                    %phase,
                    error = %err,
                    "listener failed"
                );
                return Err(EventError::from_listener(err));
            }
        }

        drop(frame);
        let cancelled = self.inner.frames.last_cancelled();

        tracing::debug!(
            event = self.label(),
            %phase,
            depth,
            cancelled,
            "phase finished"
        );
        Ok(cancelled)
    }
}
