//! Either type - a value that can be one of two types.
//!
//! `Either<L, R>` is the input and output shape of the choice combinators
//! ([`Func::left`](crate::func::Func::left), [`Func::choose`](crate::func::Func::choose),
//! ...), and the result shape of [`Func::run_either`](crate::func::Func::run_either),
//! where `Left` holds the failure and `Right` the success.
//!
//! # Examples
//!
//! ```rust
//! use bijector::control::Either;
//!
//! let right: Either<i32, String> = Either::Right("hello".to_string());
//!
//! let result = right.fold(
//!     |n| format!("Number: {}", n),
//!     |s| format!("String: {}", s),
//! );
//! assert_eq!(result, "String: hello");
//! ```

use std::fmt;

/// A value that is either `Left(L)` or `Right(R)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// The left variant, conventionally the failure or first alternative.
    Left(L),
    /// The right variant, conventionally the success or second alternative.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Converts into `Some(l)` for `Left(l)`, `None` otherwise.
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Converts into `Some(r)` for `Right(r)`, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(42);
    /// assert_eq!(left.right(), None);
    /// ```
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Applies `function` to a left value, leaving a right value untouched.
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies `function` to a right value, leaving a left value untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::control::Either;
    ///
    /// let success: Either<String, i32> = Either::Right(42);
    /// assert_eq!(success.map_right(|x| x * 2), Either::Right(84));
    /// ```
    pub fn map_right<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Collapses both cases into a single value.
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Exchanges the two sides.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::control::Either;
    ///
    /// let left: Either<i32, &str> = Either::Left(1);
    /// assert_eq!(left.swap(), Either::Right(1));
    /// ```
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }

    /// Converts into a `Result`, treating `Right` as success.
    ///
    /// # Errors
    ///
    /// Returns `Err(l)` for `Left(l)`.
    pub fn into_result(self) -> Result<R, L> {
        self.into()
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(error) => Err(error),
            Either::Right(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn result_conversion_maps_ok_to_right() {
        let ok: Result<i32, String> = Ok(1);
        let err: Result<i32, String> = Err("boom".to_string());

        assert_eq!(Either::from(ok), Either::Right(1));
        assert_eq!(Either::from(err), Either::Left("boom".to_string()));
    }

    #[rstest]
    #[case(Either::Left(3), Err(3))]
    #[case(Either::Right("ok"), Ok("ok"))]
    fn into_result_round_trips(#[case] either: Either<i32, &str>, #[case] expected: Result<&str, i32>) {
        assert_eq!(either.into_result(), expected);
    }

    #[rstest]
    fn debug_renders_the_variant() {
        let left: Either<i32, i32> = Either::Left(1);
        assert_eq!(format!("{left:?}"), "Left(1)");
    }

    #[rstest]
    fn swap_twice_is_identity() {
        let value: Either<i32, char> = Either::Right('x');
        assert_eq!(value.swap().swap(), value);
    }
}
