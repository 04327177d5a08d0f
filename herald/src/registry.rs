//! 监听器注册表（ListenerRegistry）
//!
//! 每个事件实例一份：记录监听器与其优先级/忽略取消属性，并按阶段维护有序视图。
//! 顺序键为 `(priority, sequence)`，同优先级按绑定先后执行，遍历结果确定。
//!
use crate::error::EventResult;
use crate::listener::{Listener, ListenerId};
use crate::settings::{EventFlags, Phase, Priority};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey {
    priority: Priority,
    sequence: u64,
}

struct Binding<A> {
    listener: Listener<A>,
    phase: Phase,
    key: OrderKey,
    ignore_cancelled: bool,
}

/// 一次阶段遍历的快照项
pub(crate) struct Scheduled<A> {
    pub(crate) listener: Listener<A>,
    pub(crate) ignore_cancelled: bool,
}

pub(crate) struct ListenerRegistry<A> {
    flags: EventFlags,
    bindings: HashMap<ListenerId, Binding<A>>,
    queues: [BTreeMap<OrderKey, ListenerId>; 3],
    sequence: u64,
}

impl<A> ListenerRegistry<A> {
    pub(crate) fn new(flags: EventFlags) -> Self {
        Self {
            flags,
            bindings: HashMap::new(),
            queues: Default::default(),
            sequence: 0,
        }
    }

    /// 绑定或替换监听器
    ///
    /// 同一身份重复绑定时覆盖阶段/优先级/忽略取消属性，并视为一次新的绑定参与排序。
    pub(crate) fn bind(
        &mut self,
        phase: Phase,
        listener: &Listener<A>,
        priority: Priority,
        ignore_cancelled: bool,
    ) -> EventResult<()> {
        self.flags.check_bind_phase(phase)?;
        self.unbind(listener.id());

        let key = OrderKey {
            priority,
            sequence: self.sequence,
        };
        self.sequence += 1;

        self.queues[phase.index()].insert(key, listener.id());
        self.bindings.insert(
            listener.id(),
            Binding {
                listener: listener.clone(),
                phase,
                key,
                ignore_cancelled,
            },
        );
        Ok(())
    }

    pub(crate) fn unbind(&mut self, id: ListenerId) -> bool {
        match self.bindings.remove(&id) {
            Some(binding) => {
                self.queues[binding.phase.index()].remove(&binding.key);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.bindings.clear();
        for queue in self.queues.iter_mut() {
            queue.clear();
        }
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.bindings.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 按执行顺序复制某一阶段的监听器
    pub(crate) fn snapshot(&self, phase: Phase) -> Vec<Scheduled<A>> {
        self.queues[phase.index()]
            .values()
            .filter_map(|id| self.bindings.get(id))
            .map(|binding| Scheduled {
                listener: binding.listener.clone(),
                ignore_cancelled: binding.ignore_cancelled,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventError;
    use crate::settings::priority;

    fn noop() -> Listener<()> {
        Listener::infallible(|_| {})
    }

    fn order(registry: &ListenerRegistry<()>, phase: Phase) -> Vec<ListenerId> {
        registry
            .snapshot(phase)
            .iter()
            .map(|s| s.listener.id())
            .collect()
    }

    #[test]
    fn test_priority_order_independent_of_bind_order() {
        let mut registry = ListenerRegistry::new(EventFlags::NONE);
        let (late, early, middle) = (noop(), noop(), noop());

        registry
            .bind(Phase::Default, &late, priority::LOWEST, false)
            .unwrap();
        registry
            .bind(Phase::Default, &early, priority::MONITOR, false)
            .unwrap();
        registry
            .bind(Phase::Default, &middle, priority::NORMAL, false)
            .unwrap();

        assert_eq!(
            order(&registry, Phase::Default),
            vec![early.id(), middle.id(), late.id()]
        );
    }

    #[test]
    fn test_equal_priority_keeps_bind_order() {
        let mut registry = ListenerRegistry::new(EventFlags::NONE);
        let listeners: Vec<_> = (0..5).map(|_| noop()).collect();
        for l in &listeners {
            registry.bind(Phase::Default, l, 0, false).unwrap();
        }

        let expected: Vec<_> = listeners.iter().map(|l| l.id()).collect();
        assert_eq!(order(&registry, Phase::Default), expected);
    }

    #[test]
    fn test_rebind_replaces_binding() {
        let mut registry = ListenerRegistry::new(EventFlags::NONE);
        let (a, b) = (noop(), noop());
        registry.bind(Phase::Default, &a, 0, false).unwrap();
        registry.bind(Phase::Default, &b, 0, false).unwrap();

        // 重新绑定：只保留一份，同优先级下排到最后
        registry.bind(Phase::Default, &a, 0, true).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(order(&registry, Phase::Default), vec![b.id(), a.id()]);

        let snapshot = registry.snapshot(Phase::Default);
        assert!(snapshot[1].ignore_cancelled);
    }

    #[test]
    fn test_rebind_moves_between_phases() {
        let mut registry = ListenerRegistry::new(EventFlags::CHRONICLED);
        let a = noop();
        registry.bind(Phase::Pre, &a, 0, false).unwrap();
        registry.bind(Phase::Post, &a, 0, false).unwrap();

        assert!(order(&registry, Phase::Pre).is_empty());
        assert_eq!(order(&registry, Phase::Post), vec![a.id()]);
    }

    #[test]
    fn test_unbind_is_idempotent() {
        let mut registry = ListenerRegistry::new(EventFlags::NONE);
        let a = noop();
        registry.bind(Phase::Default, &a, 0, false).unwrap();

        assert!(registry.unbind(a.id()));
        assert!(!registry.unbind(a.id()));
        assert!(!registry.contains(a.id()));
        assert!(order(&registry, Phase::Default).is_empty());
    }

    #[test]
    fn test_bind_rejects_incompatible_phase() {
        let mut plain = ListenerRegistry::new(EventFlags::CANCELLABLE);
        assert!(matches!(
            plain.bind(Phase::Post, &noop(), 0, false),
            Err(EventError::InvalidPhase { .. })
        ));

        let mut chronicled = ListenerRegistry::new(EventFlags::CHRONICLED);
        assert!(matches!(
            chronicled.bind(Phase::Default, &noop(), 0, false),
            Err(EventError::InvalidPhase { .. })
        ));
        assert_eq!(chronicled.len(), 0);
    }

    #[test]
    fn test_clear() {
        let mut registry = ListenerRegistry::new(EventFlags::CHRONICLED);
        registry.bind(Phase::Pre, &noop(), 0, false).unwrap();
        registry.bind(Phase::Post, &noop(), 0, false).unwrap();
        registry.clear();

        assert_eq!(registry.len(), 0);
        assert!(registry.snapshot(Phase::Pre).is_empty());
        assert!(registry.snapshot(Phase::Post).is_empty());
    }
}
