//! Tracked units: proxies that count each invocation before delegating

use crate::invoke::{Construct, Invoke};
use crate::tracker::Ledger;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// Category a tracked unit is registered under
///
/// Each category is dumped to its own artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Plain function or closure
    Callable,
    /// Constructor-style unit producing new instances
    Constructor,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Callable => write!(f, "callable"),
            UnitKind::Constructor => write!(f, "constructor"),
        }
    }
}

/// Proxy around a registered unit
///
/// Calling the proxy adds one to the unit's count in the current
/// generation, then forwards the arguments to the wrapped unit and returns
/// its result unchanged. For constructor-style units the result is the
/// original type, not a wrapper.
///
/// `Tracked` implements [`Invoke`] itself, so a proxy can be composed into
/// further units. A specialized constructor built on top of a tracked base
/// constructor counts both:
///
/// ```
/// use gentrack::Tracker;
///
/// struct Node { weight: u32 }
/// struct Leaf { node: Node }
///
/// let tracker = Tracker::new();
/// let node = tracker.track_constructor("Node", |weight: u32| Node { weight });
/// let leaf = tracker.track_constructor("Leaf", move |weight: u32| Leaf {
///     node: node.call((weight,)),
/// });
///
/// let l = leaf.call((3,));
/// assert_eq!(l.node.weight, 3);
/// assert_eq!(tracker.current_count("Node"), 1);
/// assert_eq!(tracker.current_count("Leaf"), 1);
/// ```
pub struct Tracked<F> {
    name: Rc<str>,
    kind: UnitKind,
    inner: F,
    ledger: Rc<RefCell<Ledger>>,
}

impl<F> Tracked<F> {
    pub(crate) fn new(
        name: Rc<str>,
        kind: UnitKind,
        inner: F,
        ledger: Rc<RefCell<Ledger>>,
    ) -> Self {
        Self {
            name,
            kind,
            inner,
            ledger,
        }
    }

    /// Identifier this unit is counted under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category this unit was registered under
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// The wrapped unit; calling it directly is not counted
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwrap the proxy, returning the original unit
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Count one invocation, then call the wrapped unit
    pub fn call<Args>(&self, args: Args) -> F::Output
    where
        F: Invoke<Args>,
    {
        // Release the ledger before delegating; the wrapped unit may call other proxies.
        self.ledger.borrow_mut().bump(&self.name);
        tracing::trace!(unit = %self.name, kind = %self.kind, "invocation counted");
        self.inner.invoke(args)
    }
}

impl<F, Args> Invoke<Args> for Tracked<F>
where
    F: Invoke<Args>,
{
    type Output = F::Output;

    fn invoke(&self, args: Args) -> Self::Output {
        self.call(args)
    }
}

impl<F: Clone> Clone for Tracked<F> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            kind: self.kind,
            inner: self.inner.clone(),
            ledger: Rc::clone(&self.ledger),
        }
    }
}

impl<F> fmt::Debug for Tracked<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Constructor that builds `T` through its [`Construct`] impl
pub struct TypeConstructor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypeConstructor<T> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for TypeConstructor<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypeConstructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeConstructor<{}>", std::any::type_name::<T>())
    }
}

impl<T, Args> Invoke<Args> for TypeConstructor<T>
where
    T: Construct<Args>,
{
    type Output = T;

    fn invoke(&self, args: Args) -> T {
        T::construct(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::tracker::Tracker;
    use crate::UnitKind;

    #[test]
    fn test_call_forwards_arguments_and_result() {
        let tracker = Tracker::new();
        let add = tracker.track_fn("add", |a: i32, b: i32| a + b);
        assert_eq!(add.call((2, 5)), 7);
        assert_eq!(tracker.current_count("add"), 1);
    }

    #[test]
    fn test_inner_call_is_not_counted() {
        let tracker = Tracker::new();
        let f = tracker.track_fn("f", || 1);
        assert_eq!((f.inner())(), 1);
        assert_eq!(tracker.current_count("f"), 0);
    }

    #[test]
    fn test_into_inner_returns_uncounted_unit() {
        let tracker = Tracker::new();
        let f = tracker.track_fn("f", |x: u32| x + 1);
        f.call((1,));
        let raw = f.into_inner();
        assert_eq!(raw(41), 42);
        assert_eq!(tracker.current_count("f"), 1);
    }

    #[test]
    fn test_clone_shares_counter() {
        let tracker = Tracker::new();
        let f = tracker.track_fn("f", || ());
        let g = f.clone();
        f.call(());
        g.call(());
        assert_eq!(tracker.current_count("f"), 2);
    }

    #[test]
    fn test_reentrant_proxies() {
        let tracker = Tracker::new();
        let leaf = tracker.track_fn("leaf", |x: u32| x + 1);
        let root = tracker.track_fn("root", move |x: u32| leaf.call((x,)) * 2);
        assert_eq!(root.call((1,)), 4);
        assert_eq!(tracker.current_count("root"), 1);
        assert_eq!(tracker.current_count("leaf"), 1);
    }

    #[test]
    fn test_kind_and_name() {
        let tracker = Tracker::new();
        let c = tracker.track_constructor("Vec", Vec::<u8>::new);
        assert_eq!(c.name(), "Vec");
        assert_eq!(c.kind(), UnitKind::Constructor);
        assert_eq!(c.kind().to_string(), "constructor");
        assert!(format!("{:?}", c).contains("Vec"));
    }

    #[test]
    fn test_nested_proxy_counts_both_names() {
        let tracker = Tracker::new();
        let base = tracker.track_fn("base", || 5);
        let outer = tracker.track("outer", base, UnitKind::Callable);
        assert_eq!(outer.call(()), 5);
        assert_eq!(tracker.current_count("outer"), 1);
        assert_eq!(tracker.current_count("base"), 1);
    }
}
