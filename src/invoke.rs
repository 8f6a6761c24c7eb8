//! Uniform call capability for tracked units
//!
//! Closures and fn items of arity 0..=8 implement [`Invoke`] with their
//! arguments packed into a tuple, so a single proxy type can wrap any of
//! them without knowing the arity up front.

/// Something that can be called with an argument tuple `Args`
pub trait Invoke<Args> {
    /// Value produced by the call
    type Output;

    /// Call with the given argument tuple
    fn invoke(&self, args: Args) -> Self::Output;
}

/// A type that knows how to build itself from an argument tuple
///
/// Used by [`crate::Tracker::track_type`] to register a constructor-style
/// unit named after the type itself.
pub trait Construct<Args>: Sized {
    /// Build a new instance
    fn construct(args: Args) -> Self;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg,)*> Invoke<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[allow(non_snake_case)]
            #[inline]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Ret {
                (self)($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A1);
impl_invoke!(A1, A2);
impl_invoke!(A1, A2, A3);
impl_invoke!(A1, A2, A3, A4);
impl_invoke!(A1, A2, A3, A4, A5);
impl_invoke!(A1, A2, A3, A4, A5, A6);
impl_invoke!(A1, A2, A3, A4, A5, A6, A7);
impl_invoke!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Short, stable name for a type: the last path segment of
/// [`std::any::type_name`], generic arguments stripped
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
