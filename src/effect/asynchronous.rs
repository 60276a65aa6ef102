//! The asynchronous effect.

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{Data, Effect};
use crate::control::Either;

/// Builds `'static` boxed futures.
///
/// The futures are executor-agnostic: they can be awaited directly, handed to
/// `tokio::spawn`, or driven with `futures::executor::block_on`. Sequencing
/// happens through `.await`, so the second step of a composition starts only
/// once the first step's future has completed.
///
/// Every `flat_map` wraps the previous future in a new one, so a chain built
/// by nesting `flat_map` calls is polled through one frame per link. Loops
/// whose length depends on the input belong in [`Effect::tail_rec_m`], which
/// awaits each step inside a single future.
///
/// # Examples
///
/// ```rust
/// use bijector::effect::{Asynchronous, Effect};
///
/// let future = Asynchronous::map(Asynchronous::pure(21), |n| n * 2);
/// assert_eq!(futures::executor::block_on(future), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Asynchronous;

impl Effect for Asynchronous {
    type Of<T: Data> = BoxFuture<'static, T>;

    const NAME: &'static str = "Asynchronous";

    fn pure<T: Data>(value: T) -> Self::Of<T> {
        future::ready(value).boxed()
    }

    fn suspend<T, Thunk>(thunk: Thunk) -> Self::Of<T>
    where
        T: Data,
        Thunk: FnOnce() -> T + Send + 'static,
    {
        future::lazy(move |_| thunk()).boxed()
    }

    fn flat_map<T, U, Function>(computation: Self::Of<T>, function: Function) -> Self::Of<U>
    where
        T: Data,
        U: Data,
        Function: FnOnce(T) -> Self::Of<U> + Send + 'static,
    {
        async move {
            let value = computation.await;
            function(value).await
        }
        .boxed()
    }

    fn tail_rec_m<S, T, Step>(initial: S, mut step: Step) -> Self::Of<T>
    where
        S: Data,
        T: Data,
        Step: FnMut(S) -> Self::Of<Either<S, T>> + Send + 'static,
    {
        async move {
            let mut state = initial;
            loop {
                match step(state).await {
                    Either::Left(next) => state = next,
                    Either::Right(done) => return done,
                }
            }
        }
        .boxed()
    }
}
