//! The eager effect.

use super::{Data, Effect};
use crate::control::Either;

/// Evaluates every computation on the spot.
///
/// `Immediate::Of<T>` is `T` itself: there is no wrapper to run. This is the
/// simplest effect and the one [`run_or_throw`](crate::func::Func::run_or_throw)
/// uses.
///
/// # Examples
///
/// ```rust
/// use bijector::effect::{Effect, Immediate};
///
/// let value: i32 = Immediate::flat_map(Immediate::pure(20), |n| n + 22);
/// assert_eq!(value, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Immediate;

impl Effect for Immediate {
    type Of<T: Data> = T;

    const NAME: &'static str = "Immediate";

    #[inline]
    fn pure<T: Data>(value: T) -> Self::Of<T> {
        value
    }

    #[inline]
    fn suspend<T, Thunk>(thunk: Thunk) -> Self::Of<T>
    where
        T: Data,
        Thunk: FnOnce() -> T + Send + 'static,
    {
        thunk()
    }

    #[inline]
    fn flat_map<T, U, Function>(computation: Self::Of<T>, function: Function) -> Self::Of<U>
    where
        T: Data,
        U: Data,
        Function: FnOnce(T) -> Self::Of<U> + Send + 'static,
    {
        function(computation)
    }

    fn tail_rec_m<S, T, Step>(initial: S, mut step: Step) -> Self::Of<T>
    where
        S: Data,
        T: Data,
        Step: FnMut(S) -> Self::Of<Either<S, T>> + Send + 'static,
    {
        let mut state = initial;
        loop {
            match step(state) {
                Either::Left(next) => state = next,
                Either::Right(done) => return done,
            }
        }
    }
}
