//! Sequential composition, error conversion and partial application.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Func;
use crate::effect::{Data, Effect};

/// `first` followed by `second`, short-circuiting on the first failure.
///
/// `B` is the intermediate type flowing between the two steps.
pub struct AndThen<First, Second, B> {
    first: First,
    second: Second,
    _intermediate: PhantomData<fn() -> B>,
}

impl<First, Second, B> AndThen<First, Second, B> {
    pub(crate) const fn new(first: First, second: Second) -> Self {
        Self {
            first,
            second,
            _intermediate: PhantomData,
        }
    }
}

impl<First: Clone, Second: Clone, B> Clone for AndThen<First, Second, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<First: fmt::Debug, Second: fmt::Debug, B> fmt::Debug for AndThen<First, Second, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AndThen")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<A, B, C, First, Second> Func<A, C> for AndThen<First, Second, B>
where
    A: Data,
    B: Data,
    C: Data,
    First: Func<A, B>,
    Second: Func<B, C, Error = First::Error>,
{
    type Error = First::Error;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<C, Self::Error>> {
        let second = self.second.clone();
        M::flat_map(self.first.apply::<M>(input), move |outcome| match outcome {
            Ok(intermediate) => second.apply::<M>(intermediate),
            Err(error) => M::pure(Err(error)),
        })
    }
}

/// A transform whose failures are remapped into `E2`.
pub struct ConvertError<T, C, E2> {
    inner: T,
    convert: Arc<C>,
    _target: PhantomData<fn() -> E2>,
}

impl<T, C, E2> ConvertError<T, C, E2> {
    pub(crate) fn new(inner: T, convert: C) -> Self {
        Self {
            inner,
            convert: Arc::new(convert),
            _target: PhantomData,
        }
    }
}

impl<T: Clone, C, E2> Clone for ConvertError<T, C, E2> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            convert: Arc::clone(&self.convert),
            _target: PhantomData,
        }
    }
}

impl<T: fmt::Debug, C, E2> fmt::Debug for ConvertError<T, C, E2> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConvertError")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<A, B, T, C, E2> Func<A, B> for ConvertError<T, C, E2>
where
    A: Data,
    B: Data,
    E2: Data,
    T: Func<A, B>,
    C: Fn(T::Error) -> E2 + Send + Sync + 'static,
{
    type Error = E2;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, E2>> {
        let convert = Arc::clone(&self.convert);
        M::map(self.inner.apply::<M>(input), move |outcome| {
            outcome.map_err(|error| convert(error))
        })
    }
}

/// A transform with its input fixed, usable as a [`Point`](super::Point).
///
/// The input is cloned on every evaluation.
pub struct PointAt<T, A> {
    inner: T,
    input: A,
}

impl<T, A> PointAt<T, A> {
    pub(crate) const fn new(inner: T, input: A) -> Self {
        Self { inner, input }
    }
}

impl<T: Clone, A: Clone> Clone for PointAt<T, A> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone(), self.input.clone())
    }
}

impl<T: fmt::Debug, A: fmt::Debug> fmt::Debug for PointAt<T, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PointAt")
            .field("inner", &self.inner)
            .field("input", &self.input)
            .finish()
    }
}

impl<A, B, T> Func<(), B> for PointAt<T, A>
where
    A: Data + Clone + Sync,
    B: Data,
    T: Func<A, B>,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, (): ()) -> M::Of<Result<B, T::Error>> {
        self.inner.apply::<M>(self.input.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;
    use crate::effect::{Deferred, Immediate};
    use crate::func::{Point, lift, try_lift};
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    enum DomainError {
        Codec(String),
    }

    #[rstest]
    fn and_then_skips_second_step_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let failing = try_lift(|_: i32| Err::<i32, _>(CodecError::new("first")));
        let counted = lift(move |n: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            n
        });
        let pipeline = failing.compose_before(counted);

        assert_eq!(pipeline.apply::<Immediate>(1), Err(CodecError::new("first")));
        assert_eq!(pipeline.apply::<Deferred>(1).run(), Err(CodecError::new("first")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn convert_error_remaps_only_failures() {
        let parse = try_lift(|text: String| text.parse::<i32>().map_err(CodecError::wrap))
            .convert_error(|error: CodecError| DomainError::Codec(error.message().to_string()));

        assert_eq!(parse.apply::<Immediate>("7".to_string()), Ok(7));
        assert!(matches!(
            parse.apply::<Immediate>("x".to_string()),
            Err(DomainError::Codec(_))
        ));
    }

    #[rstest]
    fn point_at_is_reevaluable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let point = lift(move |n: i32| n + counter.fetch_add(1, Ordering::SeqCst) as i32).point_at(10);

        assert_eq!(point.evaluate::<Immediate>(), Ok(10));
        assert_eq!(point.evaluate::<Immediate>(), Ok(11));
    }
}
