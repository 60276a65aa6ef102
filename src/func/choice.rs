//! Arrow and choice combinators over pairs and [`Either`].
//!
//! Choice combinators dispatch on the tag of an `Either` and evaluate only the
//! matching side. Pair combinators evaluate the left component first and stop
//! at the first failure.

use std::fmt;

use super::Func;
use crate::control::Either;
use crate::effect::{Data, Effect};

macro_rules! unary_combinator {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<T> {
            inner: T,
        }

        impl<T> $name<T> {
            pub(crate) const fn new(inner: T) -> Self {
                Self { inner }
            }
        }

        impl<T: fmt::Debug> fmt::Debug for $name<T> {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    .field("inner", &self.inner)
                    .finish()
            }
        }
    };
}

macro_rules! binary_combinator {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<L, R> {
            left: L,
            right: R,
        }

        impl<L, R> $name<L, R> {
            pub(crate) const fn new(left: L, right: R) -> Self {
                Self { left, right }
            }
        }

        impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for $name<L, R> {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    .field("left", &self.left)
                    .field("right", &self.right)
                    .finish()
            }
        }
    };
}

unary_combinator!(
    /// Runs the inner transform on `Left` values; `Right` values pass through.
    OnLeft
);
unary_combinator!(
    /// Runs the inner transform on `Right` values; `Left` values pass through.
    OnRight
);
unary_combinator!(
    /// Runs the inner transform on the first element of a pair.
    First
);
unary_combinator!(
    /// Runs the inner transform on the second element of a pair.
    Second
);
binary_combinator!(
    /// `Either<A, C> -> Either<B, D>`: left transform for `Left`, right
    /// transform for `Right`.
    Choose
);
binary_combinator!(
    /// `Either<A, C> -> B`: both branches converge on one output type.
    Merge
);
binary_combinator!(
    /// `(A, C) -> (B, D)`: each transform on its own component.
    Split
);
binary_combinator!(
    /// `A -> (B, C)`: both transforms on a copy of the same input.
    Fanout
);

impl<A, B, C, T> Func<Either<A, C>, Either<B, C>> for OnLeft<T>
where
    A: Data,
    B: Data,
    C: Data,
    T: Func<A, B>,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, input: Either<A, C>) -> M::Of<Result<Either<B, C>, T::Error>> {
        match input {
            Either::Left(value) => M::map(self.inner.apply::<M>(value), |outcome| {
                outcome.map(Either::Left)
            }),
            Either::Right(value) => M::pure(Ok(Either::Right(value))),
        }
    }
}

impl<A, B, C, T> Func<Either<C, A>, Either<C, B>> for OnRight<T>
where
    A: Data,
    B: Data,
    C: Data,
    T: Func<A, B>,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, input: Either<C, A>) -> M::Of<Result<Either<C, B>, T::Error>> {
        match input {
            Either::Left(value) => M::pure(Ok(Either::Left(value))),
            Either::Right(value) => M::map(self.inner.apply::<M>(value), |outcome| {
                outcome.map(Either::Right)
            }),
        }
    }
}

impl<A, B, C, D, L, R> Func<Either<A, C>, Either<B, D>> for Choose<L, R>
where
    A: Data,
    B: Data,
    C: Data,
    D: Data,
    L: Func<A, B>,
    R: Func<C, D, Error = L::Error>,
{
    type Error = L::Error;

    fn apply<M: Effect>(&self, input: Either<A, C>) -> M::Of<Result<Either<B, D>, L::Error>> {
        match input {
            Either::Left(value) => M::map(self.left.apply::<M>(value), |outcome| {
                outcome.map(Either::Left)
            }),
            Either::Right(value) => M::map(self.right.apply::<M>(value), |outcome| {
                outcome.map(Either::Right)
            }),
        }
    }
}

impl<A, B, C, L, R> Func<Either<A, C>, B> for Merge<L, R>
where
    A: Data,
    B: Data,
    C: Data,
    L: Func<A, B>,
    R: Func<C, B, Error = L::Error>,
{
    type Error = L::Error;

    fn apply<M: Effect>(&self, input: Either<A, C>) -> M::Of<Result<B, L::Error>> {
        match input {
            Either::Left(value) => self.left.apply::<M>(value),
            Either::Right(value) => self.right.apply::<M>(value),
        }
    }
}

impl<A, B, C, T> Func<(A, C), (B, C)> for First<T>
where
    A: Data,
    B: Data,
    C: Data,
    T: Func<A, B>,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, (value, passed): (A, C)) -> M::Of<Result<(B, C), T::Error>> {
        M::map(self.inner.apply::<M>(value), move |outcome| {
            outcome.map(|transformed| (transformed, passed))
        })
    }
}

impl<A, B, C, T> Func<(C, A), (C, B)> for Second<T>
where
    A: Data,
    B: Data,
    C: Data,
    T: Func<A, B>,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, (passed, value): (C, A)) -> M::Of<Result<(C, B), T::Error>> {
        M::map(self.inner.apply::<M>(value), move |outcome| {
            outcome.map(|transformed| (passed, transformed))
        })
    }
}

impl<A, B, C, D, L, R> Func<(A, C), (B, D)> for Split<L, R>
where
    A: Data,
    B: Data,
    C: Data,
    D: Data,
    L: Func<A, B>,
    R: Func<C, D, Error = L::Error>,
{
    type Error = L::Error;

    fn apply<M: Effect>(&self, (left_input, right_input): (A, C)) -> M::Of<Result<(B, D), L::Error>> {
        let right = self.right.clone();
        M::flat_map(self.left.apply::<M>(left_input), move |outcome| match outcome {
            Ok(left_value) => M::map(right.apply::<M>(right_input), move |outcome| {
                outcome.map(|right_value| (left_value, right_value))
            }),
            Err(error) => M::pure(Err(error)),
        })
    }
}

impl<A, B, C, L, R> Func<A, (B, C)> for Fanout<L, R>
where
    A: Data + Clone,
    B: Data,
    C: Data,
    L: Func<A, B>,
    R: Func<A, C, Error = L::Error>,
{
    type Error = L::Error;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<(B, C), L::Error>> {
        let right = self.right.clone();
        let copy = input.clone();
        M::flat_map(self.left.apply::<M>(input), move |outcome| match outcome {
            Ok(left_value) => M::map(right.apply::<M>(copy), move |outcome| {
                outcome.map(|right_value| (left_value, right_value))
            }),
            Err(error) => M::pure(Err(error)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;
    use crate::effect::{Deferred, Immediate};
    use crate::func::{lift, try_lift};
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn parse() -> impl Func<String, i32, Error = CodecError> {
        try_lift(|text: String| text.parse::<i32>().map_err(CodecError::wrap))
    }

    #[rstest]
    fn choose_evaluates_only_the_tagged_side() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = lift(move |flag: bool| {
            counter.fetch_add(1, Ordering::SeqCst);
            !flag
        });
        let chosen = parse().choose(counted);

        assert_eq!(
            chosen.apply::<Immediate>(Either::Left("4".to_string())),
            Ok(Either::Left(4))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            chosen.apply::<Immediate>(Either::Right(true)),
            Ok(Either::Right(false))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn merge_drops_the_tag() {
        let merged = parse().merge(lift(|n: u8| i32::from(n)));
        assert_eq!(merged.apply::<Immediate>(Either::Right(9)), Ok(9));
        assert_eq!(merged.apply::<Immediate>(Either::Left("8".to_string())), Ok(8));
    }

    #[rstest]
    fn left_and_right_pass_the_other_side_through() {
        let on_left = parse().left();
        let on_right = parse().right();

        assert_eq!(
            on_left.apply::<Immediate>(Either::<String, char>::Right('x')),
            Ok(Either::Right('x'))
        );
        assert_eq!(
            on_right.apply::<Immediate>(Either::<char, String>::Right("5".to_string())),
            Ok(Either::Right(5))
        );
    }

    #[rstest]
    fn first_and_second_leave_the_other_component_alone() {
        assert_eq!(
            parse().first().apply::<Immediate>(("1".to_string(), 'a')),
            Ok((1, 'a'))
        );
        assert_eq!(
            parse().second().apply::<Deferred>(('b', "2".to_string())).run(),
            Ok(('b', 2))
        );
    }

    #[rstest]
    fn split_fails_fast_on_the_left_component() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = lift(move |n: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            n
        });
        let pair = parse().split(counted);

        assert!(pair.apply::<Immediate>(("x".to_string(), 1)).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(pair.apply::<Immediate>(("3".to_string(), 4)), Ok((3, 4)));
    }

    #[rstest]
    fn fanout_feeds_both_sides() {
        let both = lift(|text: String| text.len()).fanout(parse());
        assert_eq!(both.apply::<Immediate>("42".to_string()), Ok((2, 42)));
    }
}
