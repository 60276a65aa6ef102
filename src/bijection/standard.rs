//! Ready-made bijections for common conversions.

use std::any::type_name;
use std::error::Error as StdError;
use std::fmt::Display;
use std::str::FromStr;

use super::{Bijection, from_functions, from_partial};
use crate::effect::Data;
use crate::error::CodecError;
use crate::func::Func;

/// `String <-> T` through [`FromStr`] and [`Display`].
///
/// This is best-effort: `"007"` parses to `7`, which renders back as `"7"`.
/// Round-tripping is exact only on the canonical rendering of each value.
///
/// Parse failures keep the parser's error as their cause.
///
/// # Examples
///
/// ```rust
/// use bijector::bijection::standard::parsed;
/// use bijector::effect::Immediate;
///
/// let port = parsed::<u16>();
///
/// assert_eq!(port.apply::<Immediate>("8080".to_string()), Ok(8080));
/// assert!(port.apply::<Immediate>("99999".to_string()).is_err());
/// ```
#[must_use]
pub fn parsed<T>() -> Bijection<
    String,
    T,
    impl Func<String, T, Error = CodecError>,
    impl Func<T, String, Error = CodecError>,
>
where
    T: FromStr + Display + Data,
    T::Err: StdError + Send + Sync + 'static,
{
    from_partial(
        |text: String| {
            text.parse::<T>().map_err(|error| {
                CodecError::with_cause(
                    format!("cannot parse {text:?} as {}: {error}", type_name::<T>()),
                    error,
                )
            })
        },
        |value: T| Ok(value.to_string()),
    )
}

/// `String <-> Vec<u8>` as UTF-8. The inverse fails on invalid UTF-8.
#[must_use]
pub fn utf8() -> Bijection<
    String,
    Vec<u8>,
    impl Func<String, Vec<u8>, Error = CodecError>,
    impl Func<Vec<u8>, String, Error = CodecError>,
> {
    from_partial(
        |text: String| Ok(text.into_bytes()),
        |bytes: Vec<u8>| String::from_utf8(bytes).map_err(CodecError::from),
    )
}

/// `(A, B) <-> (B, A)`.
#[must_use]
pub fn pair_swap<A: Data, B: Data>() -> Bijection<
    (A, B),
    (B, A),
    impl Func<(A, B), (B, A), Error = CodecError>,
    impl Func<(B, A), (A, B), Error = CodecError>,
> {
    from_functions(|(left, right): (A, B)| (right, left), |(right, left): (B, A)| (left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Deferred, Immediate};
    use rstest::rstest;
    use std::cell::Cell;
    use std::fmt;
    use std::num::ParseIntError;

    // `Cell` makes this `Send` but not `Sync`.
    #[derive(Debug, PartialEq)]
    struct Gate(Cell<u8>);

    impl FromStr for Gate {
        type Err = ParseIntError;

        fn from_str(text: &str) -> Result<Self, Self::Err> {
            text.parse().map(|number| Self(Cell::new(number)))
        }
    }

    impl Display for Gate {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "{}", self.0.get())
        }
    }

    #[rstest]
    #[case("1024", 1024)]
    #[case("-3", -3)]
    fn parsed_reads_canonical_integers(#[case] text: &str, #[case] expected: i64) {
        let number = parsed::<i64>();
        assert_eq!(number.apply::<Immediate>(text.to_string()), Ok(expected));
        assert_eq!(number.unapply::<Immediate>(expected), Ok(text.to_string()));
    }

    #[rstest]
    fn parsed_accepts_values_that_are_not_sync() {
        let gate = parsed::<Gate>();
        assert_eq!(gate.apply::<Deferred>("61".to_string()).run(), Ok(Gate(Cell::new(61))));
        assert_eq!(gate.unapply::<Immediate>(Gate(Cell::new(148))), Ok("148".to_string()));
    }

    #[rstest]
    fn parsed_wraps_the_parse_error() {
        let error = parsed::<i64>()
            .apply::<Immediate>("bar".to_string())
            .unwrap_err();
        assert!(error.is_caused_by::<ParseIntError>());
        assert!(error.message().contains("\"bar\""));
    }

    #[rstest]
    fn parsed_is_not_injective_over_non_canonical_text() {
        let number = parsed::<i64>();
        let value = number.apply::<Immediate>("007".to_string()).unwrap();
        assert_eq!(number.unapply::<Immediate>(value), Ok("7".to_string()));
    }

    #[rstest]
    fn utf8_rejects_invalid_bytes() {
        let text = utf8();
        assert_eq!(text.apply::<Immediate>("é".to_string()), Ok(vec![0xc3, 0xa9]));
        let error = text.unapply::<Deferred>(vec![0xff, 0xfe]).run().unwrap_err();
        assert_eq!(error.message(), "invalid UTF-8");
    }

    #[rstest]
    fn pair_swap_is_its_own_inverse() {
        let swap = pair_swap::<u8, char>();
        assert_eq!(swap.apply::<Immediate>((1, 'a')), Ok(('a', 1)));
        assert_eq!(swap.unapply::<Immediate>(('a', 1)), Ok((1, 'a')));
    }
}
