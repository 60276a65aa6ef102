//! Execution strategies for transforms.
//!
//! A transform in this crate never decides *how* it runs. It is written once
//! against the [`Effect`] abstraction and the caller picks the strategy when
//! invoking it:
//!
//! - [`Immediate`]: evaluate eagerly, the result is the plain value
//! - [`Deferred`]: build a [`Suspended`] thunk that runs when asked to
//! - [`Asynchronous`]: build a `'static` boxed future (feature `async`)
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust has no higher-kinded types, so an effect is a zero-sized marker type
//! whose generic associated type [`Effect::Of`] plays the role of the type
//! constructor: `Immediate::Of<T>` is `T`, `Deferred::Of<T>` is
//! `Suspended<T>`, and so on.
//!
//! # Laws
//!
//! Every effect must satisfy the monad laws for `pure` and `flat_map`:
//!
//! ```text
//! flat_map(pure(a), f) == f(a)
//! flat_map(m, pure) == m
//! flat_map(flat_map(m, f), g) == flat_map(m, |x| flat_map(f(x), g))
//! ```
//!
//! and `suspend(|| a)` must produce the same value as `pure(a)`.
//!
//! # Stack Safety
//!
//! Nesting `flat_map` inside the function passed to `flat_map` builds one
//! frame per step once the computation runs. Loops of unbounded length go
//! through [`Effect::tail_rec_m`] instead, which every effect drives in
//! constant stack.
//!
//! # Examples
//!
//! ```rust
//! use bijector::effect::{Deferred, Effect, Immediate};
//!
//! fn double<M: Effect>(computation: M::Of<i32>) -> M::Of<i32> {
//!     M::map(computation, |value| value * 2)
//! }
//!
//! assert_eq!(double::<Immediate>(21), 42);
//!
//! let suspended = double::<Deferred>(Deferred::pure(21));
//! assert_eq!(suspended.run(), 42);
//! ```

#[cfg(feature = "async")]
mod asynchronous;
mod deferred;
mod immediate;

#[cfg(feature = "async")]
pub use asynchronous::Asynchronous;
pub use deferred::{Deferred, Suspended};
pub use immediate::Immediate;

use crate::control::Either;

/// Values that can flow through an effect.
///
/// Computations may be moved to another thread or held by a `'static`
/// future, so everything they carry must be `Send + 'static`. This trait is
/// implemented for every such type.
pub trait Data: Send + 'static {}

impl<T: Send + 'static> Data for T {}

/// A caller-chosen execution strategy.
///
/// `Effect` exposes the minimal capability set transforms need: lift a
/// value, lift a suspended computation, and sequence a computation that
/// depends on a previous result.
pub trait Effect: 'static {
    /// A computation in this effect producing a `T`.
    type Of<T: Data>: Data;

    /// The name of the effect, used in diagnostics.
    const NAME: &'static str;

    /// Lifts an already computed value.
    fn pure<T: Data>(value: T) -> Self::Of<T>;

    /// Lifts a computation that has not run yet.
    ///
    /// Eager effects may run `thunk` right away; deferred ones must not run
    /// it before the computation itself is run.
    fn suspend<T, Thunk>(thunk: Thunk) -> Self::Of<T>
    where
        T: Data,
        Thunk: FnOnce() -> T + Send + 'static;

    /// Sequences `function` after `computation`.
    ///
    /// `function` runs only once `computation` has produced its value.
    fn flat_map<T, U, Function>(computation: Self::Of<T>, function: Function) -> Self::Of<U>
    where
        T: Data,
        U: Data,
        Function: FnOnce(T) -> Self::Of<U> + Send + 'static;

    /// Repeats `step` from `initial` until it yields [`Either::Right`].
    ///
    /// `Either::Left` carries the state for the next iteration. The loop runs
    /// in constant stack however many iterations it takes.
    fn tail_rec_m<S, T, Step>(initial: S, step: Step) -> Self::Of<T>
    where
        S: Data,
        T: Data,
        Step: FnMut(S) -> Self::Of<Either<S, T>> + Send + 'static;

    /// Transforms the value a computation produces.
    fn map<T, U, Function>(computation: Self::Of<T>, function: Function) -> Self::Of<U>
    where
        T: Data,
        U: Data,
        Function: FnOnce(T) -> U + Send + 'static,
    {
        Self::flat_map(computation, move |value| Self::pure(function(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn add_one_then_double<M: Effect>(value: i32) -> M::Of<i32> {
        M::flat_map(M::pure(value), |n| M::map(M::suspend(move || n + 1), |n| n * 2))
    }

    #[rstest]
    #[case(0, 2)]
    #[case(20, 42)]
    fn immediate_and_deferred_agree(#[case] input: i32, #[case] expected: i32) {
        assert_eq!(add_one_then_double::<Immediate>(input), expected);
        assert_eq!(add_one_then_double::<Deferred>(input).run(), expected);
    }

    fn count_down<M: Effect>(from: u64) -> M::Of<u64> {
        M::tail_rec_m((from, 0_u64), |(remaining, steps)| {
            M::suspend(move || {
                if remaining == 0 {
                    Either::Right(steps)
                } else {
                    Either::Left((remaining - 1, steps + 1))
                }
            })
        })
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(100_000)]
    fn tail_rec_m_loops_in_constant_stack(#[case] from: u64) {
        assert_eq!(count_down::<Immediate>(from), from);
        assert_eq!(count_down::<Deferred>(from).run(), from);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn asynchronous_tail_rec_m_loops_in_constant_stack() {
        let steps = futures::executor::block_on(count_down::<Asynchronous>(100_000));
        assert_eq!(steps, 100_000);
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn asynchronous_agrees_with_immediate() {
        let result = futures::executor::block_on(add_one_then_double::<Asynchronous>(20));
        assert_eq!(result, add_one_then_double::<Immediate>(20));
    }
}
