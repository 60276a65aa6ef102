//! Lifting a scalar transform over ordered containers.

use std::fmt;
use std::marker::PhantomData;

use super::Func;
use crate::control::Either;
use crate::effect::{Data, Effect};

/// Applies a scalar transform to every element of a container, in order.
///
/// Implements `Func<CA, CB>` for any `CA: IntoIterator<Item = A>` and
/// `CB: FromIterator<B>`, so `Vec`, `VecDeque`, `BTreeSet`, arrays and
/// options all work. The first failing element ends the traversal: later
/// elements are not transformed and the element's error is returned as is.
///
/// Elements are visited by [`Effect::tail_rec_m`], so stack use does not grow
/// with the container length under any effect.
pub struct Traverse<T, A, B> {
    inner: T,
    _elements: PhantomData<fn(A) -> B>,
}

impl<T, A, B> Traverse<T, A, B> {
    pub(crate) const fn new(inner: T) -> Self {
        Self {
            inner,
            _elements: PhantomData,
        }
    }
}

impl<T: Clone, A, B> Clone for Traverse<T, A, B> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<T: fmt::Debug, A, B> fmt::Debug for Traverse<T, A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Traverse")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<A, B, T, CA, CB> Func<CA, CB> for Traverse<T, A, B>
where
    A: Data,
    B: Data,
    T: Func<A, B>,
    CA: IntoIterator<Item = A> + Data,
    CA::IntoIter: Send + 'static,
    CB: FromIterator<B> + Data,
{
    type Error = T::Error;

    fn apply<M: Effect>(&self, input: CA) -> M::Of<Result<CB, T::Error>> {
        let function = self.inner.clone();
        let remaining = input.into_iter();
        let collected = Vec::with_capacity(remaining.size_hint().0);
        let traversal = M::tail_rec_m(
            (remaining, collected),
            move |(mut remaining, mut collected): (CA::IntoIter, Vec<B>)| match remaining.next() {
                None => M::pure(Either::Right(Ok(collected))),
                Some(element) => M::map(function.apply::<M>(element), move |outcome| match outcome {
                    Ok(value) => {
                        collected.push(value);
                        Either::Left((remaining, collected))
                    }
                    Err(error) => Either::Right(Err(error)),
                }),
            },
        );
        M::map(traversal, |outcome| outcome.map(|values| values.into_iter().collect()))
    }
}
