//! 事件（Event）
//!
//! 发出方声明的强类型事件槽，参数以元组 `A` 表示（零参数为 `()`）：
//! - 绑定/解绑监听器（`bind`、`bind_phase`、`unbind`）；
//! - 三种触发形式（`trigger`、`trigger_with`、`trigger_phase`，见 `trigger` 模块）；
//! - 取消状态（`cancel`、`cancelled`、`is_cancelled`）；
//! - 向更高元数事件的转发（`redirect`，见 `redirect` 模块）。
//!
//! `Event<A>` 是廉价可克隆的句柄，克隆指向同一个事件实例。
//!
//! # 线程模型
//!
//! 分发是单线程、同步、可重入的：监听器在调用线程上内联执行，可以再次触发同一事件
//! 或其他事件。事件基于 `Rc`/`RefCell` 实现，既不是 `Send` 也不是 `Sync`，
//! 由编译器保证不会被跨线程使用：
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<herald::Event<()>>();
//! ```
//!
//! # 内存
//!
//! 监听器若捕获了事件句柄的克隆，会与事件形成引用环；在发出方或监听方生命周期结束时
//! 调用 `unbind`/`unbind_all`（或 `flush`）断开。
//!
mod redirect;
mod trigger;

pub use redirect::Prepend;

use crate::error::{EventError, EventResult};
use crate::frame::FrameStack;
use crate::listener::{Listener, ListenerId};
use crate::registry::ListenerRegistry;
use crate::settings::{EventConfig, EventFlags, Phase, Priority, priority};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// 事件实例身份（转发链接以目标事件的身份为键）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

impl EventId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

struct EventInner<A> {
    id: EventId,
    config: EventConfig,
    flags: EventFlags,
    registry: RefCell<ListenerRegistry<A>>,
    frames: FrameStack,
    redirects: RefCell<HashMap<EventId, Vec<ListenerId>>>,
}

/// 强类型事件槽
///
/// ```
/// use herald::{Event, EventFlags, Listener};
///
/// let on_damage: Event<(u32,)> = Event::create(EventFlags::CANCELLABLE);
///
/// let shield = {
///     let on_damage = on_damage.clone();
///     Listener::new(move |(amount,): &(u32,)| {
///         if *amount < 10 {
///             on_damage.cancel()?;
///         }
///         Ok(())
///     })
/// };
/// on_damage.bind(&shield, 0, false).unwrap();
///
/// let mut health = 100;
/// on_damage.trigger_with(&(5,), || health -= 5).unwrap();
/// assert_eq!(health, 100);
/// assert!(on_damage.is_cancelled());
///
/// on_damage.trigger_with(&(20,), || health -= 20).unwrap();
/// assert_eq!(health, 80);
///
/// on_damage.unbind_all();
/// ```
pub struct Event<A> {
    inner: Rc<EventInner<A>>,
}

impl<A: 'static> Event<A> {
    /// 无标志事件
    pub fn new() -> Self {
        Self::with_config(EventConfig::default())
    }

    pub fn create(flags: EventFlags) -> Self {
        Self::with_config(EventConfig::from(flags))
    }

    pub fn with_config(config: EventConfig) -> Self {
        let flags = config.flags();
        Self {
            inner: Rc::new(EventInner {
                id: EventId::next(),
                config,
                flags,
                registry: RefCell::new(ListenerRegistry::new(flags)),
                frames: FrameStack::default(),
                redirects: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn id(&self) -> EventId {
        self.inner.id
    }

    pub fn flags(&self) -> EventFlags {
        self.inner.flags
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.config.name()
    }

    pub(crate) fn label(&self) -> &str {
        self.name().unwrap_or("anonymous")
    }

    // --- binding ---

    /// 绑定到 DEFAULT 阶段；编年事件请使用 `bind_phase`
    pub fn bind(
        &self,
        listener: &Listener<A>,
        priority: Priority,
        ignore_cancelled: bool,
    ) -> EventResult<()> {
        self.bind_phase(Phase::Default, listener, priority, ignore_cancelled)
    }

    /// 以优先级 0 绑定到 DEFAULT 阶段，不忽略已取消事件
    pub fn bind_default(&self, listener: &Listener<A>) -> EventResult<()> {
        self.bind(listener, priority::HIGHEST, false)
    }

    /// 以指定优先级绑定到 DEFAULT 阶段，不忽略已取消事件
    pub fn bind_priority(&self, listener: &Listener<A>, priority: Priority) -> EventResult<()> {
        self.bind(listener, priority, false)
    }

    /// 绑定到指定阶段
    ///
    /// 已绑定的监听器会被覆盖（最后一次绑定生效），不返回错误；
    /// 需要“已绑定”保护的调用方应先调用 `bound`。
    pub fn bind_phase(
        &self,
        phase: Phase,
        listener: &Listener<A>,
        priority: Priority,
        ignore_cancelled: bool,
    ) -> EventResult<()> {
        self.inner
            .registry
            .borrow_mut()
            .bind(phase, listener, priority, ignore_cancelled)?;
        tracing::debug!(
            event = self.label(),
            listener = %listener.id(),
            %phase,
            priority,
            ignore_cancelled,
            "listener bound"
        );
        Ok(())
    }

    /// 解绑；未绑定时什么也不做
    pub fn unbind(&self, listener: &Listener<A>) {
        if self.inner.registry.borrow_mut().unbind(listener.id()) {
            tracing::debug!(event = self.label(), listener = %listener.id(), "listener unbound");
        }
    }

    /// 清空全部绑定与转发链接
    pub fn unbind_all(&self) {
        let count = self.len();
        self.inner.registry.borrow_mut().clear();
        self.inner.redirects.borrow_mut().clear();
        tracing::debug!(event = self.label(), count, "all listeners unbound");
    }

    pub fn bound(&self, listener: &Listener<A>) -> bool {
        self.inner.registry.borrow().contains(listener.id())
    }

    /// 已绑定监听器数量（含转发监听器）
    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- cancellation ---

    pub fn cancel(&self) -> EventResult<()> {
        self.set_cancelled(true)
    }

    /// 修改当前活动帧的取消标志
    ///
    /// 依次校验：存在活动帧（`NotActive`）、事件可取消（`NotCancellable`）、
    /// 当前不处于编年事件的 POST 阶段（`PostPhase`）。
    pub fn set_cancelled(&self, cancelled: bool) -> EventResult<()> {
        let frame = self.inner.frames.current().ok_or(EventError::NotActive)?;
        if !self.inner.flags.is_cancellable() {
            return Err(EventError::NotCancellable);
        }
        if frame.phase == Phase::Post {
            return Err(EventError::PostPhase);
        }
        self.inner.frames.set_cancelled(cancelled);
        Ok(())
    }

    /// 在监听器外部（触发返回之后）判断事件是否被取消
    pub fn is_cancelled(&self) -> bool {
        self.inner.frames.last_cancelled()
    }

    /// 在监听器内部读取当前帧的取消标志
    pub fn cancelled(&self) -> EventResult<bool> {
        self.inner
            .frames
            .current()
            .map(|frame| frame.cancelled)
            .ok_or(EventError::NotActive)
    }

    /// 当前嵌套触发深度
    pub fn depth(&self) -> usize {
        self.inner.frames.depth()
    }

    pub fn active(&self) -> bool {
        self.depth() > 0
    }

    fn downgrade(&self) -> Weak<EventInner<A>> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<EventInner<A>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }
}

impl<A: 'static> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Event<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.inner.id)
            .field("name", &self.inner.config.name())
            .field("flags", &self.inner.flags)
            .field("depth", &self.inner.frames.depth())
            .finish()
    }
}
