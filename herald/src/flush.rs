//! 批量解绑（flush）
//!
//! 监听器常常捕获其所属对象，绑定会让这些对象一直存活。容器对象生命周期结束时，
//! 可以一次性清空其拥有的全部事件槽（绑定与转发链接）。
//!
//! 两种方式枚举事件槽：
//! - 为容器派生 `Emitter`（`herald_macros::Emitter`），编译期收集类型为 `Event<..>` 的字段；
//! - 使用显式注册表 `EventSet`。
//!
//! 这是尽力而为的便捷工具，并不替代显式解绑。
//!
use crate::event::Event;
use std::rc::Rc;

/// 可被整体清空的事件槽
pub trait Unbind {
    fn unbind_all(&self);
}

impl<A: 'static> Unbind for Event<A> {
    fn unbind_all(&self) {
        Event::unbind_all(self);
    }
}

impl<T: Unbind + ?Sized> Unbind for Rc<T> {
    fn unbind_all(&self) {
        (**self).unbind_all();
    }
}

impl<T: Unbind + ?Sized> Unbind for Box<T> {
    fn unbind_all(&self) {
        (**self).unbind_all();
    }
}

/// 拥有事件槽的对象
pub trait Emitter {
    fn events(&self) -> Vec<&dyn Unbind>;
}

/// 清空容器的全部事件槽，返回处理的槽数量
///
/// ```
/// use herald::{Emitter, Event, Listener, Unbind, flush};
///
/// struct Door {
///     on_open: Event<()>,
///     on_close: Event<()>,
/// }
///
/// impl Emitter for Door {
///     fn events(&self) -> Vec<&dyn Unbind> {
///         vec![&self.on_open as &dyn Unbind, &self.on_close as &dyn Unbind]
///     }
/// }
///
/// let door = Door { on_open: Event::new(), on_close: Event::new() };
/// door.on_open.bind(&Listener::infallible(|_| {}), 0, false).unwrap();
///
/// assert_eq!(flush(&door), 2);
/// assert!(door.on_open.is_empty());
/// ```
pub fn flush<T: Emitter + ?Sized>(container: &T) -> usize {
    let events = container.events();
    for event in &events {
        event.unbind_all();
    }
    tracing::debug!(slots = events.len(), "emitter flushed");
    events.len()
}

/// 事件槽显式注册表
#[derive(Default)]
pub struct EventSet {
    events: Vec<Box<dyn Unbind>>,
}

impl EventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记事件槽（保存句柄的克隆）
    pub fn insert<A: 'static>(&mut self, event: &Event<A>) {
        self.events.push(Box::new(event.clone()));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn flush(&self) -> usize {
        flush(self)
    }
}

impl Emitter for EventSet {
    fn events(&self) -> Vec<&dyn Unbind> {
        self.events.iter().map(|event| &**event).collect()
    }
}
