//! 事件转发（RedirectBridge）
//!
//! 把一个 N 元事件的每次触发转发到一个 N+1 元事件：目标事件的第一个参数是发出方身份，
//! 其余参数原样跟随。目标触发结束后，若源事件可取消且两者取消状态不同，
//! 则把源事件当前帧的取消状态改写为目标的状态，从而让局部事件“冒泡”到更大范围的事件，
//! 同时保持两侧取消状态一致。
//!
//! 每个目标事件至多一条链接；转发监听器以 `priority::DEBUG` 绑定，排在最后执行，
//! 且只弱引用源事件，不会让链接自身延长源事件的生命周期。
//!
use super::Event;
use crate::error::{EventError, EventResult};
use crate::listener::Listener;
use crate::settings::{Phase, priority};

/// 在参数元组前追加一个元素：`(a, b)` → `(head, a, b)`
pub trait Prepend<Head> {
    type Output;

    fn prepend(self, head: Head) -> Self::Output;
}

macro_rules! impl_prepend {
    ($($name:ident),*) => {
        impl<Head, $($name),*> Prepend<Head> for ($($name,)*) {
            type Output = (Head, $($name,)*);

            #[allow(non_snake_case)]
            fn prepend(self, head: Head) -> Self::Output {
                let ($($name,)*) = self;
                (head, $($name,)*)
            }
        }
    };
}

impl_prepend!();
impl_prepend!(A);
impl_prepend!(A, B);
impl_prepend!(A, B, C);
impl_prepend!(A, B, C, D);
impl_prepend!(A, B, C, D, E);
impl_prepend!(A, B, C, D, E, F);
impl_prepend!(A, B, C, D, E, F, G);
impl_prepend!(A, B, C, D, E, F, G, H);
impl_prepend!(A, B, C, D, E, F, G, H, I);
impl_prepend!(A, B, C, D, E, F, G, H, I, J);
impl_prepend!(A, B, C, D, E, F, G, H, I, J, K);

impl<A: 'static> Event<A> {
    /// 把本事件转发到 `target`，并以 `emitter` 作为目标事件的首个参数
    ///
    /// 编年事件会在 PRE 与 POST 各创建一个转发监听器，否则在 DEFAULT 创建一个；
    /// 源与目标必须同为编年事件或同为非编年事件（`InvalidPhase`）。
    /// 对同一目标重复调用会替换原有链接。
    ///
    /// ```
    /// use herald::{Event, EventFlags, Listener};
    ///
    /// let on_hit: Event<(u32,)> = Event::create(EventFlags::CANCELLABLE);
    /// let on_any_hit: Event<(&'static str, u32)> = Event::create(EventFlags::CANCELLABLE);
    ///
    /// let guard = {
    ///     let on_any_hit = on_any_hit.clone();
    ///     Listener::new(move |(who, _): &(&'static str, u32)| {
    ///         if *who == "ghost" {
    ///             on_any_hit.cancel()?;
    ///         }
    ///         Ok(())
    ///     })
    /// };
    /// on_any_hit.bind(&guard, 0, false).unwrap();
    ///
    /// on_hit.redirect(&on_any_hit, "ghost").unwrap();
    /// on_hit.trigger(&(3,)).unwrap();
    /// assert!(on_hit.is_cancelled());
    ///
    /// assert!(on_hit.unredirect(&on_any_hit));
    /// on_hit.trigger(&(3,)).unwrap();
    /// assert!(!on_hit.is_cancelled());
    /// # on_any_hit.unbind_all();
    /// ```
    pub fn redirect<E>(&self, target: &Event<A::Output>, emitter: E) -> EventResult<()>
    where
        A: Prepend<E> + Clone,
        A::Output: 'static,
        E: Clone + 'static,
    {
        let chronicled = self.flags().is_chronicled();
        match (chronicled, target.flags().is_chronicled()) {
            (true, false) => {
                return Err(EventError::InvalidPhase {
                    phase: Phase::Pre,
                    reason: "chronicled event can only redirect into a chronicled event",
                });
            }
            // DEFAULT 转发会让目标跑完 PRE 与 POST，PRE 的取消无法回传
            (false, true) => {
                return Err(EventError::InvalidPhase {
                    phase: Phase::Default,
                    reason: "plain event cannot redirect into a chronicled event",
                });
            }
            _ => {}
        }

        self.unredirect(target);

        let phases: &[Phase] = if chronicled {
            &[Phase::Pre, Phase::Post]
        } else {
            &[Phase::Default]
        };

        let mut created = Vec::with_capacity(phases.len());
        for &phase in phases {
            let listener = self.forwarder(phase, target, emitter.clone());
            self.bind_phase(phase, &listener, priority::DEBUG, false)?;
            created.push(listener.id());
        }
        self.inner
            .redirects
            .borrow_mut()
            .insert(target.id(), created);

        tracing::debug!(
            event = self.label(),
            target = target.label(),
            "redirect linked"
        );
        Ok(())
    }

    /// 移除到 `target` 的链接，只解绑该链接创建的监听器；返回链接是否存在
    pub fn unredirect<B: 'static>(&self, target: &Event<B>) -> bool {
        let Some(created) = self.inner.redirects.borrow_mut().remove(&target.id()) else {
            return false;
        };

        {
            let mut registry = self.inner.registry.borrow_mut();
            for id in created {
                registry.unbind(id);
            }
        }

        tracing::debug!(
            event = self.label(),
            target = target.label(),
            "redirect unlinked"
        );
        true
    }

    pub fn redirected<B: 'static>(&self, target: &Event<B>) -> bool {
        self.inner.redirects.borrow().contains_key(&target.id())
    }

    fn forwarder<E>(&self, phase: Phase, target: &Event<A::Output>, emitter: E) -> Listener<A>
    where
        A: Prepend<E> + Clone,
        A::Output: 'static,
        E: Clone + 'static,
    {
        let source = self.downgrade();
        let target = target.clone();

        Listener::new(move |args: &A| {
            target.trigger_phase(phase, &args.clone().prepend(emitter.clone()))?;

            let Some(source) = Self::upgrade(&source) else {
                return Ok(());
            };
            if source.flags().is_cancellable() {
                let cancelled = target.is_cancelled();
                if source.cancelled()? != cancelled {
                    source.set_cancelled(cancelled)?;
                }
            }
            Ok(())
        })
    }
}
