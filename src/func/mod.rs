//! Fallible, effect-polymorphic transforms.
//!
//! A [`Func<A, B>`](Func) turns an `A` into a `B` or fails with a typed
//! error. It is written once and run under whichever [`Effect`] the caller
//! chooses: the same value can be applied eagerly, deferred, or as a future.
//!
//! # Laws
//!
//! ## Category
//!
//! ```text
//! identity().compose_before(f) == f == f.compose_before(identity())
//! f.compose_before(g).compose_before(h) == f.compose_before(g.compose_before(h))
//! ```
//!
//! ## Choice
//!
//! ```text
//! f.choose(g).apply(Left(a))  == f.apply(a).map(Left)
//! f.choose(g).apply(Right(c)) == g.apply(c).map(Right)
//! f.compose_before(g).first() == f.first().compose_before(g.first())
//! ```
//!
//! Composition is fail-fast: once a step fails, no later step runs.
//!
//! # Examples
//!
//! ```rust
//! use bijector::CodecError;
//! use bijector::effect::{Deferred, Immediate};
//! use bijector::func::{Func, lift, try_lift};
//!
//! let parse = try_lift(|text: String| text.parse::<i64>().map_err(CodecError::wrap));
//! let double = lift(|n: i64| n * 2);
//! let pipeline = parse.compose_before(double);
//!
//! assert_eq!(pipeline.apply::<Immediate>("21".to_string()), Ok(42));
//! assert!(pipeline.apply::<Deferred>("bar".to_string()).run().is_err());
//! ```

mod choice;
mod compose;
pub mod point;
mod primitives;
mod traverse;

use std::fmt;
use std::sync::Arc;

pub use choice::{Choose, Fanout, First, Merge, OnLeft, OnRight, Second, Split};
pub use compose::{AndThen, ConvertError, PointAt};
pub use point::Point;
pub use primitives::{Bind, Guard, Identity, Lift, TryLift, bind, guard, identity, lift, try_lift};
pub use traverse::Traverse;

use crate::control::Either;
use crate::effect::{Data, Effect, Immediate};

/// A fallible transform from `A` to `B`, polymorphic in its effect.
///
/// Implementations are immutable, cheap to clone, and safe to share between
/// threads; anything they capture lives behind an `Arc`. Running a `Func`
/// never borrows it: the computation returned by [`apply`](Func::apply) owns
/// what it needs.
pub trait Func<A: Data, B: Data>: Clone + Send + Sync + 'static {
    /// The failure this transform produces.
    type Error: Data;

    /// Runs the transform on `input` under the effect `M`.
    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, Self::Error>>;

    /// Runs the transform and reports the outcome as an [`Either`], with the
    /// failure on the left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::control::Either;
    /// use bijector::effect::Immediate;
    /// use bijector::func::{Func, lift};
    ///
    /// let length = lift(|text: String| text.len());
    /// assert_eq!(length.run_either::<Immediate>("four".to_string()), Either::Right(4));
    /// ```
    fn run_either<M: Effect>(&self, input: A) -> M::Of<Either<Self::Error, B>> {
        M::map(self.apply::<M>(input), Either::from)
    }

    /// Runs the transform eagerly and panics if it fails.
    ///
    /// This is an escape hatch for tests and debugging. It must never be used
    /// on a path where failures are expected during normal operation; use
    /// [`apply`](Func::apply) and handle the `Result` instead.
    ///
    /// # Panics
    ///
    /// Panics with the rendered error when the transform fails.
    #[track_caller]
    fn run_or_throw(&self, input: A) -> B
    where
        Self::Error: fmt::Display,
    {
        match self.apply::<Immediate>(input) {
            Ok(value) => value,
            Err(error) => {
                tracing::error!(%error, "run_or_throw surfaced a failure");
                panic!("run_or_throw: {error}");
            }
        }
    }

    /// Runs `self`, then `next` on its output.
    ///
    /// `next` is never invoked when `self` fails.
    fn compose_before<C, Next>(self, next: Next) -> AndThen<Self, Next, B>
    where
        C: Data,
        Next: Func<B, C, Error = Self::Error>,
    {
        AndThen::new(self, next)
    }

    /// Runs `previous`, then `self` on its output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::effect::Immediate;
    /// use bijector::func::{Func, lift};
    ///
    /// let increment = lift(|n: i32| n + 1);
    /// let render = lift(|n: i32| n.to_string());
    ///
    /// assert_eq!(render.compose_after(increment).apply::<Immediate>(41), Ok("42".to_string()));
    /// ```
    fn compose_after<C, Previous>(self, previous: Previous) -> AndThen<Previous, Self, A>
    where
        C: Data,
        Previous: Func<C, A, Error = Self::Error>,
    {
        AndThen::new(previous, self)
    }

    /// Remaps failures into another error type.
    ///
    /// This is how transforms built against different error taxonomies are
    /// brought to a common one before composing them.
    fn convert_error<E2, Convert>(self, convert: Convert) -> ConvertError<Self, Convert, E2>
    where
        E2: Data,
        Convert: Fn(Self::Error) -> E2 + Send + Sync + 'static,
    {
        ConvertError::new(self, convert)
    }

    /// Fixes the input, producing a [`Point`] that can be evaluated any
    /// number of times.
    fn point_at(self, input: A) -> PointAt<Self, A>
    where
        A: Clone + Sync,
    {
        PointAt::new(self, input)
    }

    /// Applies `self` to the left side of an `Either`, passing a right value
    /// through.
    fn left(self) -> OnLeft<Self> {
        OnLeft::new(self)
    }

    /// Applies `self` to the right side of an `Either`, passing a left value
    /// through.
    fn right(self) -> OnRight<Self> {
        OnRight::new(self)
    }

    /// Dispatches on the tag of an `Either`: `self` for `Left`, `other` for
    /// `Right`. Only one side runs.
    fn choose<C, D, Other>(self, other: Other) -> Choose<Self, Other>
    where
        C: Data,
        D: Data,
        Other: Func<C, D, Error = Self::Error>,
    {
        Choose::new(self, other)
    }

    /// Like [`choose`](Func::choose) but both sides produce the same type,
    /// so the tag is dropped.
    fn merge<C, Other>(self, other: Other) -> Merge<Self, Other>
    where
        C: Data,
        Other: Func<C, B, Error = Self::Error>,
    {
        Merge::new(self, other)
    }

    /// Applies `self` to the first element of a pair.
    fn first(self) -> First<Self> {
        First::new(self)
    }

    /// Applies `self` to the second element of a pair.
    fn second(self) -> Second<Self> {
        Second::new(self)
    }

    /// Applies `self` and `other` to the two elements of a pair, left first.
    fn split<C, D, Other>(self, other: Other) -> Split<Self, Other>
    where
        C: Data,
        D: Data,
        Other: Func<C, D, Error = Self::Error>,
    {
        Split::new(self, other)
    }

    /// Feeds the same input to `self` and `other`.
    fn fanout<C, Other>(self, other: Other) -> Fanout<Self, Other>
    where
        A: Clone,
        C: Data,
        Other: Func<A, C, Error = Self::Error>,
    {
        Fanout::new(self, other)
    }

    /// Lifts the transform over any ordered container.
    ///
    /// Elements are transformed in order; the first failing element stops the
    /// traversal and its error is the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::CodecError;
    /// use bijector::effect::Immediate;
    /// use bijector::func::{Func, try_lift};
    ///
    /// let parse = try_lift(|text: String| text.parse::<u8>().map_err(CodecError::wrap));
    /// let parse_all = parse.traverse();
    ///
    /// let parsed: Result<Vec<u8>, CodecError> =
    ///     parse_all.apply::<Immediate>(vec!["1".to_string(), "2".to_string()]);
    /// assert_eq!(parsed, Ok(vec![1, 2]));
    /// ```
    fn traverse(self) -> Traverse<Self, A, B> {
        Traverse::new(self)
    }
}

impl<A, B, T> Func<A, B> for Arc<T>
where
    A: Data,
    B: Data,
    T: Func<A, B>,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, Self::Error>> {
        (**self).apply::<M>(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;
    use crate::effect::Deferred;
    use rstest::rstest;

    #[rstest]
    fn run_either_puts_failure_on_the_left() {
        let always_fails = try_lift(|_: i32| Err::<i32, _>(CodecError::new("nope")));
        assert_eq!(
            always_fails.run_either::<Deferred>(1).run(),
            Either::Left(CodecError::new("nope"))
        );
    }

    #[rstest]
    fn run_or_throw_returns_the_value() {
        assert_eq!(lift(|n: i32| n + 1).run_or_throw(1), 2);
    }

    #[rstest]
    #[should_panic(expected = "run_or_throw: nope")]
    fn run_or_throw_panics_on_failure() {
        let always_fails = try_lift(|_: i32| Err::<i32, _>(CodecError::new("nope")));
        always_fails.run_or_throw(1);
    }

    #[rstest]
    fn shared_func_runs_through_arc() {
        let shared = Arc::new(lift(|n: i32| n * 3));
        assert_eq!(shared.apply::<Immediate>(3), Ok(9));
    }
}
