//! Bidirectional transforms built from a pair of inverse [`Func`]s.
//!
//! A [`Bijection<A, B>`](Bijection) holds a direct transform `A -> B` and an
//! inverse `B -> A` sharing one error type. Both halves can fail, and both
//! run under whichever effect the caller picks.
//!
//! # Laws
//!
//! A well-behaved bijection round-trips:
//!
//! ```text
//! unapply(apply(a)) == Ok(a)    whenever apply(a) succeeds
//! apply(unapply(b)) == Ok(b)    whenever unapply(b) succeeds
//! ```
//!
//! Nothing enforces this. Pairing two functions that are not inverses of
//! each other produces a value that compiles and runs but does not
//! round-trip; exactness is the responsibility of whoever supplies the pair.
//! [`standard::parsed`] is an example of a useful bijection that only
//! round-trips on canonical text.
//!
//! # Examples
//!
//! ```rust
//! use std::num::ParseIntError;
//! use bijector::bijection::standard::parsed;
//! use bijector::effect::Immediate;
//!
//! let number = parsed::<i64>();
//!
//! assert_eq!(number.apply::<Immediate>("1024".to_string()), Ok(1024));
//! assert_eq!(number.unapply::<Immediate>(1024), Ok("1024".to_string()));
//!
//! let error = number.apply::<Immediate>("bar".to_string()).unwrap_err();
//! assert!(error.is_caused_by::<ParseIntError>());
//! ```

pub mod standard;

use std::fmt;
use std::marker::PhantomData;

use crate::effect::{Data, Effect};
use crate::func::{
    AndThen, Bind, Func, Identity, Lift, Split, TryLift, bind, identity as identity_func, lift,
    try_lift,
};

/// A pair of transforms intended to be inverses of each other.
///
/// # Type Parameters
///
/// - `A`: the source type
/// - `B`: the target type
/// - `D`: the direct half, `Func<A, B>`
/// - `I`: the inverse half, `Func<B, A>`
///
/// A `Bijection` is itself a `Func<A, B>` that runs its direct half, so it
/// composes with any other transform.
pub struct Bijection<A, B, D, I> {
    direct: D,
    inverse: I,
    _types: PhantomData<fn(A) -> B>,
}

impl<A, B, D, I> Bijection<A, B, D, I>
where
    A: Data,
    B: Data,
    D: Func<A, B>,
    I: Func<B, A, Error = D::Error>,
{
    /// Pairs a direct transform with its inverse.
    #[must_use]
    pub const fn new(direct: D, inverse: I) -> Self {
        Self {
            direct,
            inverse,
            _types: PhantomData,
        }
    }

    /// Returns the `A -> B` half.
    #[must_use]
    pub const fn direct(&self) -> &D {
        &self.direct
    }

    /// Returns the `B -> A` half.
    #[must_use]
    pub const fn inverse(&self) -> &I {
        &self.inverse
    }

    /// Runs the direct half.
    pub fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, D::Error>> {
        self.direct.apply::<M>(input)
    }

    /// Runs the inverse half.
    pub fn unapply<M: Effect>(&self, input: B) -> M::Of<Result<A, D::Error>> {
        self.inverse.apply::<M>(input)
    }

    /// Exchanges the two halves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::bijection::standard::parsed;
    /// use bijector::effect::Immediate;
    ///
    /// let render = parsed::<u16>().swap();
    /// assert_eq!(render.apply::<Immediate>(8080), Ok("8080".to_string()));
    /// ```
    #[must_use]
    pub fn swap(self) -> Bijection<B, A, I, D> {
        Bijection::new(self.inverse, self.direct)
    }

    /// Chains `self` with `other`.
    ///
    /// The direct half runs `self` then `other`; the inverse half runs
    /// `other`'s inverse then `self`'s.
    ///
    /// # Arguments
    ///
    /// * `other` - a bijection from `B` to `C`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::bijection::standard::{parsed, utf8};
    /// use bijector::effect::Immediate;
    ///
    /// let wire = utf8().swap().and_then(parsed::<u32>());
    ///
    /// assert_eq!(wire.apply::<Immediate>(b"42".to_vec()), Ok(42));
    /// assert_eq!(wire.unapply::<Immediate>(7), Ok(b"7".to_vec()));
    /// ```
    #[must_use]
    pub fn and_then<C, D2, I2>(
        self,
        other: Bijection<B, C, D2, I2>,
    ) -> Bijection<A, C, AndThen<D, D2, B>, AndThen<I2, I, B>>
    where
        C: Data,
        D2: Func<B, C, Error = D::Error>,
        I2: Func<C, B, Error = D::Error>,
    {
        Bijection::new(
            AndThen::new(self.direct, other.direct),
            AndThen::new(other.inverse, self.inverse),
        )
    }

    /// Runs `self` and `other` on the components of a pair.
    ///
    /// The left component is converted first, in both directions, and the
    /// first failure wins.
    #[must_use]
    pub fn split<A2, B2, D2, I2>(
        self,
        other: Bijection<A2, B2, D2, I2>,
    ) -> Bijection<(A, A2), (B, B2), Split<D, D2>, Split<I, I2>>
    where
        A2: Data,
        B2: Data,
        D2: Func<A2, B2, Error = D::Error>,
        I2: Func<B2, A2, Error = D::Error>,
    {
        Bijection::new(
            Split::new(self.direct, other.direct),
            Split::new(self.inverse, other.inverse),
        )
    }
}

impl<A, B, D: Clone, I: Clone> Clone for Bijection<A, B, D, I> {
    fn clone(&self) -> Self {
        Self {
            direct: self.direct.clone(),
            inverse: self.inverse.clone(),
            _types: PhantomData,
        }
    }
}

impl<A, B, D: fmt::Debug, I: fmt::Debug> fmt::Debug for Bijection<A, B, D, I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Bijection")
            .field("direct", &self.direct)
            .field("inverse", &self.inverse)
            .finish()
    }
}

impl<A, B, D, I> Func<A, B> for Bijection<A, B, D, I>
where
    A: Data,
    B: Data,
    D: Func<A, B>,
    I: Func<B, A, Error = D::Error>,
{
    type Error = D::Error;

    fn apply<M: Effect>(&self, input: A) -> M::Of<Result<B, D::Error>> {
        self.direct.apply::<M>(input)
    }
}

/// The bijection mapping every value to itself.
#[must_use]
pub const fn identity<A: Data>() -> Bijection<A, A, Identity, Identity> {
    Bijection::new(identity_func(), identity_func())
}

/// Builds a bijection from two total functions.
///
/// # Examples
///
/// ```rust
/// use bijector::bijection::from_functions;
/// use bijector::effect::Immediate;
///
/// let celsius = from_functions(|kelvin: i64| kelvin - 273, |celsius: i64| celsius + 273);
///
/// assert_eq!(celsius.apply::<Immediate>(300), Ok(27));
/// assert_eq!(celsius.unapply::<Immediate>(27), Ok(300));
/// ```
pub fn from_functions<A, B, F, G>(direct: F, inverse: G) -> Bijection<A, B, Lift<F>, Lift<G>>
where
    A: Data,
    B: Data,
    F: Fn(A) -> B + Send + Sync + 'static,
    G: Fn(B) -> A + Send + Sync + 'static,
{
    Bijection::new(lift(direct), lift(inverse))
}

/// Builds a bijection from two functions returning `Result`.
pub fn from_partial<A, B, E, F, G>(direct: F, inverse: G) -> Bijection<A, B, TryLift<F>, TryLift<G>>
where
    A: Data,
    B: Data,
    E: Data,
    F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
    G: Fn(B) -> Result<A, E> + Send + Sync + 'static,
{
    Bijection::new(try_lift(direct), try_lift(inverse))
}

/// Builds a bijection from two functions producing deferred values.
///
/// # Examples
///
/// ```rust
/// use bijector::CodecError;
/// use bijector::bijection::from_points;
/// use bijector::effect::Deferred;
/// use bijector::func::point::{defer, pure};
///
/// let percent = from_points(
///     |ratio: u32| pure(ratio * 100),
///     |percent: u32| {
///         defer(move || {
///             if percent % 100 == 0 {
///                 Ok(percent / 100)
///             } else {
///                 Err(CodecError::new("not a whole ratio"))
///             }
///         })
///     },
/// );
///
/// assert_eq!(percent.apply::<Deferred>(3).run(), Ok(300));
/// assert!(percent.unapply::<Deferred>(250).run().is_err());
/// ```
pub fn from_points<A, B, P, Q, F, G>(direct: F, inverse: G) -> Bijection<A, B, Bind<F>, Bind<G>>
where
    A: Data,
    B: Data,
    P: Func<(), B>,
    Q: Func<(), A, Error = P::Error>,
    F: Fn(A) -> P + Send + Sync + 'static,
    G: Fn(B) -> Q + Send + Sync + 'static,
{
    Bijection::new(bind(direct), bind(inverse))
}
