//! 监听器（Listener）
//!
//! 监听器是带身份的可调用句柄：构造时分配进程内唯一的 `ListenerId`，
//! 克隆共享同一身份。解绑必须使用绑定时的同一个句柄（或其克隆），
//! 两次分别构造的监听器即使包装同一个函数也互不相等。
//!
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

type Callback<A> = dyn Fn(&A) -> anyhow::Result<()>;

/// 监听器身份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// 监听器句柄
///
/// ```
/// use herald::{Event, Listener};
///
/// let event: Event<(i32,)> = Event::new();
/// let listener = Listener::new(|(n,): &(i32,)| {
///     assert_eq!(*n, 7);
///     Ok(())
/// });
///
/// event.bind(&listener, 0, false).unwrap();
/// event.trigger(&(7,)).unwrap();
///
/// // 同一函数的另一个句柄拥有不同身份
/// let other = Listener::new(|_: &(i32,)| Ok(()));
/// assert!(event.bound(&listener));
/// assert!(!event.bound(&other));
/// ```
pub struct Listener<A> {
    id: ListenerId,
    callback: Rc<Callback<A>>,
}

impl<A> Listener<A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) -> anyhow::Result<()> + 'static,
    {
        Self {
            id: ListenerId::next(),
            callback: Rc::new(f),
        }
    }

    /// 不会失败的监听器
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self::new(move |args| {
            f(args);
            Ok(())
        })
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub(crate) fn call(&self, args: &A) -> anyhow::Result<()> {
        (self.callback)(args)
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: self.callback.clone(),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}
