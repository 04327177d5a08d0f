//! 值盒（Value Box）
//!
//! 监听器只拿到参数的共享引用 `&A`，需要经由事件传回结果时使用值盒：
//! - `Constant<T>`：只读，可为空；
//! - `Variable<T>`：可在监听器内修改，克隆共享同一存储。
//!
//! 值盒可为空（`is_null`），对应“没有结果”。
//!
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 只读值盒
///
/// ```
/// use herald::variable::Constant;
///
/// let c = Constant::of(3);
/// assert_eq!(c.get(), Some(3));
/// assert!(Constant::<i32>::empty().is_null());
/// ```
pub struct Constant<T> {
    value: Rc<Option<T>>,
}

impl<T> Constant<T> {
    pub fn of(value: T) -> Self {
        Self {
            value: Rc::new(Some(value)),
        }
    }

    pub fn empty() -> Self {
        Self {
            value: Rc::new(None),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// 以引用访问当前值
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f((*self.value).as_ref())
    }
}

impl<T: Clone> Constant<T> {
    pub fn get(&self) -> Option<T> {
        (*self.value).clone()
    }
}

impl<T> Clone for Constant<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Constant<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constant").field(&self.value).finish()
    }
}

/// 可变值盒
///
/// 通过共享引用即可修改，适合作为事件参数让监听器回写结果。
/// 同时保留初始值，用于判断是否被修改过。
///
/// ```
/// use herald::variable::Variable;
///
/// let points = Variable::of(100);
/// let shared = points.clone();
///
/// shared.apply(|p| p * 2);
/// assert_eq!(points.get(), Some(200));
/// assert_eq!(points.get_default(), Some(100));
/// assert!(points.mutated());
/// ```
pub struct Variable<T> {
    value: Rc<RefCell<Option<T>>>,
    default: Rc<Option<T>>,
}

impl<T: Clone> Variable<T> {
    pub fn of(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(value.clone()))),
            default: Rc::new(Some(value)),
        }
    }

    pub fn get(&self) -> Option<T> {
        self.value.borrow().as_ref().cloned()
    }

    pub fn get_default(&self) -> Option<T> {
        (*self.default).clone()
    }

    /// 以引用访问当前值的副本，`f` 内可以修改同一个值盒
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let current = self.get();
        f(current.as_ref())
    }
}

impl<T> Variable<T> {
    pub fn empty() -> Self {
        Self {
            value: Rc::new(RefCell::new(None)),
            default: Rc::new(None),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.borrow().is_none()
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }

    pub fn clear(&self) {
        *self.value.borrow_mut() = None;
    }

    pub fn take(&self) -> Option<T> {
        self.value.borrow_mut().take()
    }

    /// 变换当前值；为空时不调用 `f`
    ///
    /// `f` 执行期间盒内为空，`f` 可以访问同一个值盒，返回值最终写回。
    pub fn apply(&self, f: impl FnOnce(T) -> T) {
        let Some(value) = self.take() else {
            return;
        };
        let next = f(value);
        self.set(next);
    }
}

impl<T: PartialEq> Variable<T> {
    /// 当前值是否不同于初始值
    pub fn mutated(&self) -> bool {
        *self.value.borrow() != *self.default
    }
}

impl<T> Clone for Variable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            default: self.default.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("value", &self.value.borrow())
            .field("default", &self.default)
            .finish()
    }
}
