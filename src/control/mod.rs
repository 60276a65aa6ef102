//! Control structures.
//!
//! - [`Either`]: a value that can be one of two types, used by the choice
//!   combinators and by [`Func::run_either`](crate::func::Func::run_either)

mod either;

pub use either::Either;
