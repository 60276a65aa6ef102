//! Construction primitives: lifting plain functions into [`Func`]s.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Func;
use crate::effect::{Data, Effect};
use crate::error::CodecError;

/// A total function lifted into a [`Func`] that never fails.
///
/// The error type is free so the lifted function composes with transforms
/// of any error taxonomy; [`lift`] fixes it to [`CodecError`].
pub struct Lift<F, E = CodecError> {
    function: Arc<F>,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> Lift<F, E> {
    /// Lifts `function`, choosing the error type `E`.
    #[must_use]
    pub fn new(function: F) -> Self {
        Self {
            function: Arc::new(function),
            _error: PhantomData,
        }
    }
}

impl<F, E> Clone for Lift<F, E> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
            _error: PhantomData,
        }
    }
}

impl<F, E> fmt::Debug for Lift<F, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Lift").finish_non_exhaustive()
    }
}

impl<A, B, F, E> Func<A, B> for Lift<F, E>
where
    A: Data,
    B: Data,
    E: Data,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    type Error = E;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, E>> {
        let function = Arc::clone(&self.function);
        M::suspend(move || Ok(function(input)))
    }
}

/// Lifts a total function.
///
/// # Examples
///
/// ```rust
/// use bijector::effect::Immediate;
/// use bijector::func::{Func, lift};
///
/// let length = lift(|text: String| text.len());
/// assert_eq!(length.apply::<Immediate>("four".to_string()), Ok(4));
/// ```
pub fn lift<A, B, F>(function: F) -> Lift<F, CodecError>
where
    A: Data,
    B: Data,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    Lift::new(function)
}

/// A partial function made total by returning an explicit error.
pub struct TryLift<F> {
    function: Arc<F>,
}

impl<F> Clone for TryLift<F> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<F> fmt::Debug for TryLift<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("TryLift").finish_non_exhaustive()
    }
}

impl<A, B, E, F> Func<A, B> for TryLift<F>
where
    A: Data,
    B: Data,
    E: Data,
    F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
{
    type Error = E;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, E>> {
        let function = Arc::clone(&self.function);
        M::suspend(move || function(input))
    }
}

/// Lifts a function returning a `Result`.
///
/// # Examples
///
/// ```rust
/// use bijector::CodecError;
/// use bijector::effect::Immediate;
/// use bijector::func::{Func, try_lift};
///
/// let parse = try_lift(|text: String| text.parse::<i64>().map_err(CodecError::wrap));
///
/// assert_eq!(parse.apply::<Immediate>("1024".to_string()), Ok(1024));
/// assert!(parse.apply::<Immediate>("bar".to_string()).is_err());
/// ```
pub fn try_lift<A, B, E, F>(function: F) -> TryLift<F>
where
    A: Data,
    B: Data,
    E: Data,
    F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
{
    TryLift {
        function: Arc::new(function),
    }
}

/// Passes its input through when a predicate holds, fails otherwise.
pub struct Guard<P, E> {
    predicate: Arc<P>,
    error: E,
}

impl<P, E: Clone> Clone for Guard<P, E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            error: self.error.clone(),
        }
    }
}

impl<P, E: fmt::Debug> fmt::Debug for Guard<P, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Guard")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<A, P, E> Func<A, A> for Guard<P, E>
where
    A: Data,
    E: Data + Clone + Sync,
    P: Fn(&A) -> bool + Send + Sync + 'static,
{
    type Error = E;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<A, E>> {
        let predicate = Arc::clone(&self.predicate);
        let error = self.error.clone();
        M::suspend(move || if predicate(&input) { Ok(input) } else { Err(error) })
    }
}

/// Lifts a predicate into a transform failing with `error` when it is false.
///
/// # Examples
///
/// ```rust
/// use bijector::CodecError;
/// use bijector::effect::Immediate;
/// use bijector::func::{Func, guard};
///
/// let non_empty = guard(|text: &String| !text.is_empty(), CodecError::new("empty"));
///
/// assert_eq!(non_empty.apply::<Immediate>("a".to_string()), Ok("a".to_string()));
/// assert_eq!(non_empty.apply::<Immediate>(String::new()), Err(CodecError::new("empty")));
/// ```
pub fn guard<A, P, E>(predicate: P, error: E) -> Guard<P, E>
where
    A: Data,
    E: Data + Clone + Sync,
    P: Fn(&A) -> bool + Send + Sync + 'static,
{
    Guard {
        predicate: Arc::new(predicate),
        error,
    }
}

/// The identity transform for any type.
pub struct Identity<E = CodecError> {
    _error: PhantomData<fn() -> E>,
}

impl<E> Identity<E> {
    /// Creates the identity transform with error type `E`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Default for Identity<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Identity<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> Copy for Identity<E> {}

impl<E> fmt::Debug for Identity<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Identity")
    }
}

impl<A: Data, E: Data> Func<A, A> for Identity<E> {
    type Error = E;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<A, E>> {
        M::pure(Ok(input))
    }
}

/// The identity transform with [`CodecError`] as its error type.
#[must_use]
pub const fn identity() -> Identity<CodecError> {
    Identity::new()
}

/// A transform that picks, at run time, the [`Point`](super::Point) to
/// evaluate for each input.
pub struct Bind<F> {
    function: Arc<F>,
}

impl<F> Clone for Bind<F> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<F> fmt::Debug for Bind<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Bind").finish_non_exhaustive()
    }
}

impl<A, B, P, F> Func<A, B> for Bind<F>
where
    A: Data,
    B: Data,
    P: Func<(), B>,
    F: Fn(A) -> P + Send + Sync + 'static,
{
    type Error = P::Error;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, P::Error>> {
        let function = Arc::clone(&self.function);
        M::flat_map(M::suspend(move || function(input)), |point: P| {
            point.apply::<M>(())
        })
    }
}

/// Lifts a function producing a deferred value.
///
/// Useful when the computation to run depends on the input itself, or needs
/// context that only exists once the input is known.
///
/// # Examples
///
/// ```rust
/// use bijector::CodecError;
/// use bijector::effect::Immediate;
/// use bijector::func::{Func, bind, point};
///
/// let checked_half = bind(|n: i32| {
///     point::defer(move || {
///         if n % 2 == 0 { Ok(n / 2) } else { Err(CodecError::new("odd")) }
///     })
/// });
///
/// assert_eq!(checked_half.apply::<Immediate>(8), Ok(4));
/// assert!(checked_half.apply::<Immediate>(7).is_err());
/// ```
pub fn bind<A, B, P, F>(function: F) -> Bind<F>
where
    A: Data,
    B: Data,
    P: Func<(), B>,
    F: Fn(A) -> P + Send + Sync + 'static,
{
    Bind {
        function: Arc::new(function),
    }
}
