//! Deferred, re-evaluable values.
//!
//! A [`Point<A>`](Point) is any [`Func<(), A>`](Func): a value that still has
//! to be computed and may fail. Evaluating a point does not consume it, so the
//! same point can be evaluated again, under the same or another effect.
//!
//! # Laws
//!
//! ```text
//! pure(a).flat_map(f)                 == f(a)
//! p.flat_map(pure)                    == p
//! p.flat_map(f).flat_map(g)           == p.flat_map(|a| f(a).flat_map(g))
//! raise_error(e).handle_error_with(h) == h(e)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use bijector::CodecError;
//! use bijector::effect::{Deferred, Immediate};
//! use bijector::func::Point;
//! use bijector::func::point::{pure, raise_error};
//!
//! let answer = pure(20).map(|n: i32| n + 1).flat_map(|n: i32| pure(n * 2));
//! assert_eq!(answer.evaluate::<Immediate>(), Ok(42));
//!
//! let recovered = raise_error::<i32, _>(CodecError::new("missing"))
//!     .handle_error_with(|_: CodecError| pure(0));
//! assert_eq!(recovered.evaluate::<Deferred>().run(), Ok(0));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Func;
use crate::effect::{Data, Effect};
use crate::error::CodecError;

/// A deferred value of type `A`.
///
/// Implemented for every `Func<(), A>`.
pub trait Point<A: Data>: Func<(), A> {
    /// Computes the value under the effect `M`.
    fn evaluate<M: Effect>(&self) -> M::Of<Result<A, Self::Error>> {
        self.apply::<M>(())
    }

    /// Transforms the value once it is computed.
    fn map<B, F>(self, function: F) -> PointMap<Self, F, A>
    where
        B: Data,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        PointMap {
            inner: self,
            function: Arc::new(function),
            _value: PhantomData,
        }
    }

    /// Chooses the next point from the computed value.
    ///
    /// `function` is not called when `self` fails.
    fn flat_map<B, Next, F>(self, function: F) -> PointFlatMap<Self, F, A>
    where
        B: Data,
        Next: Func<(), B, Error = Self::Error>,
        F: Fn(A) -> Next + Send + Sync + 'static,
    {
        PointFlatMap {
            inner: self,
            function: Arc::new(function),
            _value: PhantomData,
        }
    }

    /// Recovers from a failure by evaluating the point `handler` returns.
    ///
    /// Successful values pass through untouched.
    fn handle_error_with<Fallback, H>(self, handler: H) -> HandleErrorWith<Self, H>
    where
        Fallback: Func<(), A>,
        H: Fn(Self::Error) -> Fallback + Send + Sync + 'static,
    {
        HandleErrorWith {
            inner: self,
            handler: Arc::new(handler),
        }
    }
}

impl<A: Data, P: Func<(), A>> Point<A> for P {}

/// A point that always yields a clone of the same value.
pub struct Pure<A, E = CodecError> {
    value: A,
    _error: PhantomData<fn() -> E>,
}

impl<A, E> Pure<A, E> {
    /// Wraps `value`, choosing the error type `E`.
    #[must_use]
    pub const fn new(value: A) -> Self {
        Self {
            value,
            _error: PhantomData,
        }
    }
}

impl<A: Clone, E> Clone for Pure<A, E> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<A: fmt::Debug, E> fmt::Debug for Pure<A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Pure").field(&self.value).finish()
    }
}

impl<A, E> Func<(), A> for Pure<A, E>
where
    A: Data + Clone + Sync,
    E: Data,
{
    type Error = E;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<A, E>> {
        M::pure(Ok(self.value.clone()))
    }
}

/// A point yielding `value` that never fails.
#[must_use]
pub const fn pure<A>(value: A) -> Pure<A, CodecError>
where
    A: Data + Clone + Sync,
{
    Pure::new(value)
}

/// A point that always fails with a clone of the same error.
pub struct RaiseError<A, E> {
    error: E,
    _value: PhantomData<fn() -> A>,
}

impl<A, E: Clone> Clone for RaiseError<A, E> {
    fn clone(&self) -> Self {
        raise_error(self.error.clone())
    }
}

impl<A, E: fmt::Debug> fmt::Debug for RaiseError<A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("RaiseError").field(&self.error).finish()
    }
}

impl<A, E> Func<(), A> for RaiseError<A, E>
where
    A: Data,
    E: Data + Clone + Sync,
{
    type Error = E;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<A, E>> {
        M::pure(Err(self.error.clone()))
    }
}

/// A point failing with `error`.
#[must_use]
pub const fn raise_error<A, E>(error: E) -> RaiseError<A, E> {
    RaiseError {
        error,
        _value: PhantomData,
    }
}

/// A point computed by calling a thunk on every evaluation.
pub struct Defer<F> {
    thunk: Arc<F>,
}

impl<F> Clone for Defer<F> {
    fn clone(&self) -> Self {
        Self {
            thunk: Arc::clone(&self.thunk),
        }
    }
}

impl<F> fmt::Debug for Defer<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Defer").finish_non_exhaustive()
    }
}

impl<A, E, F> Func<(), A> for Defer<F>
where
    A: Data,
    E: Data,
    F: Fn() -> Result<A, E> + Send + Sync + 'static,
{
    type Error = E;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<A, E>> {
        let thunk = Arc::clone(&self.thunk);
        M::suspend(move || thunk())
    }
}

/// A point whose value comes from `thunk`, called each time it is evaluated.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use bijector::CodecError;
/// use bijector::effect::Immediate;
/// use bijector::func::Point;
/// use bijector::func::point::defer;
///
/// let ticks = Arc::new(AtomicU32::new(0));
/// let counter = Arc::clone(&ticks);
/// let tick = defer(move || Ok::<_, CodecError>(counter.fetch_add(1, Ordering::SeqCst)));
///
/// assert_eq!(tick.evaluate::<Immediate>(), Ok(0));
/// assert_eq!(tick.evaluate::<Immediate>(), Ok(1));
/// ```
pub fn defer<A, E, F>(thunk: F) -> Defer<F>
where
    A: Data,
    E: Data,
    F: Fn() -> Result<A, E> + Send + Sync + 'static,
{
    Defer {
        thunk: Arc::new(thunk),
    }
}

/// See [`Point::map`].
pub struct PointMap<P, F, A> {
    inner: P,
    function: Arc<F>,
    _value: PhantomData<fn() -> A>,
}

impl<P: Clone, F, A> Clone for PointMap<P, F, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            function: Arc::clone(&self.function),
            _value: PhantomData,
        }
    }
}

impl<P: fmt::Debug, F, A> fmt::Debug for PointMap<P, F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PointMap")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<A, B, P, F> Func<(), B> for PointMap<P, F, A>
where
    A: Data,
    B: Data,
    P: Func<(), A>,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    type Error = P::Error;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<B, P::Error>> {
        let function = Arc::clone(&self.function);
        M::map(self.inner.apply::<M>(()), move |outcome| {
            outcome.map(|value| function(value))
        })
    }
}

/// See [`Point::flat_map`].
pub struct PointFlatMap<P, F, A> {
    inner: P,
    function: Arc<F>,
    _value: PhantomData<fn() -> A>,
}

impl<P: Clone, F, A> Clone for PointFlatMap<P, F, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            function: Arc::clone(&self.function),
            _value: PhantomData,
        }
    }
}

impl<P: fmt::Debug, F, A> fmt::Debug for PointFlatMap<P, F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PointFlatMap")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<A, B, P, Next, F> Func<(), B> for PointFlatMap<P, F, A>
where
    A: Data,
    B: Data,
    P: Func<(), A>,
    Next: Func<(), B, Error = P::Error>,
    F: Fn(A) -> Next + Send + Sync + 'static,
{
    type Error = P::Error;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<B, P::Error>> {
        let function = Arc::clone(&self.function);
        M::flat_map(self.inner.apply::<M>(()), move |outcome| match outcome {
            Ok(value) => function(value).apply::<M>(()),
            Err(error) => M::pure(Err(error)),
        })
    }
}

/// See [`Point::handle_error_with`].
pub struct HandleErrorWith<P, H> {
    inner: P,
    handler: Arc<H>,
}

impl<P: Clone, H> Clone for HandleErrorWith<P, H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<P: fmt::Debug, H> fmt::Debug for HandleErrorWith<P, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HandleErrorWith")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<A, P, Fallback, H> Func<(), A> for HandleErrorWith<P, H>
where
    A: Data,
    P: Func<(), A>,
    Fallback: Func<(), A>,
    H: Fn(P::Error) -> Fallback + Send + Sync + 'static,
{
    type Error = Fallback::Error;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<A, Fallback::Error>> {
        let handler = Arc::clone(&self.handler);
        M::flat_map(self.inner.apply::<M>(()), move |outcome| match outcome {
            Ok(value) => M::pure(Ok(value)),
            Err(error) => handler(error).apply::<M>(()),
        })
    }
}
