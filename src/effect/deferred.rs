//! The deferred effect.
//!
//! [`Suspended`] describes a computation without running it. Nothing happens
//! until [`Suspended::run`] is called, which should be done at the edge of the
//! program.

use std::fmt;

use super::{Data, Effect};
use crate::control::Either;

/// A one-shot computation that has not run yet.
///
/// # Examples
///
/// ```rust
/// use bijector::effect::Suspended;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// let executed = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&executed);
///
/// let suspended = Suspended::new(move || {
///     flag.store(true, Ordering::SeqCst);
///     42
/// });
///
/// assert!(!executed.load(Ordering::SeqCst));
/// assert_eq!(suspended.run(), 42);
/// assert!(executed.load(Ordering::SeqCst));
/// ```
pub struct Suspended<T> {
    thunk: Box<dyn FnOnce() -> T + Send>,
}

impl<T: Data> Suspended<T> {
    /// Suspends a closure.
    pub fn new<Thunk>(thunk: Thunk) -> Self
    where
        Thunk: FnOnce() -> T + Send + 'static,
    {
        Self {
            thunk: Box::new(thunk),
        }
    }

    /// Runs the computation, consuming it.
    pub fn run(self) -> T {
        (self.thunk)()
    }
}

impl<T> fmt::Debug for Suspended<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Suspended").finish_non_exhaustive()
    }
}

/// Builds [`Suspended`] computations.
///
/// Nested `flat_map`s run recursively when the outer computation runs, so
/// very long sequential chains use stack proportional to their length.
/// [`Effect::tail_rec_m`] runs its steps one after another in a loop and is
/// the way to express those chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Deferred;

impl Effect for Deferred {
    type Of<T: Data> = Suspended<T>;

    const NAME: &'static str = "Deferred";

    fn pure<T: Data>(value: T) -> Self::Of<T> {
        Suspended::new(move || value)
    }

    fn suspend<T, Thunk>(thunk: Thunk) -> Self::Of<T>
    where
        T: Data,
        Thunk: FnOnce() -> T + Send + 'static,
    {
        Suspended::new(thunk)
    }

    fn flat_map<T, U, Function>(computation: Self::Of<T>, function: Function) -> Self::Of<U>
    where
        T: Data,
        U: Data,
        Function: FnOnce(T) -> Self::Of<U> + Send + 'static,
    {
        Suspended::new(move || function(computation.run()).run())
    }

    fn tail_rec_m<S, T, Step>(initial: S, mut step: Step) -> Self::Of<T>
    where
        S: Data,
        T: Data,
        Step: FnMut(S) -> Self::Of<Either<S, T>> + Send + 'static,
    {
        Suspended::new(move || {
            let mut state = initial;
            loop {
                match step(state).run() {
                    Either::Left(next) => state = next,
                    Either::Right(done) => return done,
                }
            }
        })
    }
}
