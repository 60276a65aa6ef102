//! The type-level list backing a registry.
//!
//! A registry's type records every registered type as a nested [`Cons`]
//! ending in [`Nil`]. Membership is proven with [`Contains`], whose `Index`
//! parameter spells out the position of the type:
//!
//! - [`Here`]: the type is the head of the list
//! - [`There<I>`]: the type is at index `I` in the tail
//!
//! The index is always inferred. A type that is not in the list has no
//! index, and a lookup for it does not compile.
//!
//! # Examples
//!
//! ```rust
//! use bijector::registry::{Cons, Contains, Entry, Here, Nil, There};
//!
//! // Registering `u8` then `String` yields this list.
//! type Types = Cons<Entry<String>, Cons<Entry<u8>, Nil>>;
//!
//! fn holds<L: Contains<T, I>, T, I>() {}
//! holds::<Types, String, Here>();
//! holds::<Types, u8, There<Here>>();
//! ```

use std::any::{TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::hint::SerializationHint;

/// The empty list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Nil;

/// A list with `head` in front of `tail`.
#[derive(Clone, Debug)]
pub struct Cons<H, T> {
    pub(crate) head: H,
    pub(crate) tail: T,
}

/// A registered type together with the hint that encodes it.
pub struct Entry<T> {
    hint: Arc<dyn SerializationHint<T>>,
}

impl<T> Entry<T> {
    pub(crate) fn new<H: SerializationHint<T>>(hint: H) -> Self {
        Self {
            hint: Arc::new(hint),
        }
    }

    pub(crate) fn hint(&self) -> Arc<dyn SerializationHint<T>> {
        Arc::clone(&self.hint)
    }
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            hint: Arc::clone(&self.hint),
        }
    }
}

impl<T> fmt::Debug for Entry<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Entry")
            .field("type", &type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// Index of a type found at the head of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Here;

/// Index of a type found at index `I` in the tail of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct There<I>(PhantomData<I>);

/// Proof that the list holds an entry for `T`, at position `Index`.
pub trait Contains<T, Index> {
    /// Returns the entry for `T`.
    fn entry(&self) -> &Entry<T>;
}

impl<T, Tail> Contains<T, Here> for Cons<Entry<T>, Tail> {
    fn entry(&self) -> &Entry<T> {
        &self.head
    }
}

impl<T, H, Tail, I> Contains<T, There<I>> for Cons<H, Tail>
where
    Tail: Contains<T, I>,
{
    fn entry(&self) -> &Entry<T> {
        self.tail.entry()
    }
}

/// Runtime view of the types in a list.
pub trait TypeList: Send + Sync + 'static {
    /// Number of entries.
    const LEN: usize;

    /// Appends `(TypeId, type name)` for every entry, in registration order.
    fn describe(types: &mut Vec<(TypeId, &'static str)>);
}

impl TypeList for Nil {
    const LEN: usize = 0;

    fn describe(_types: &mut Vec<(TypeId, &'static str)>) {}
}

impl<T: 'static, Tail: TypeList> TypeList for Cons<Entry<T>, Tail> {
    const LEN: usize = Tail::LEN + 1;

    fn describe(types: &mut Vec<(TypeId, &'static str)>) {
        Tail::describe(types);
        types.push((TypeId::of::<T>(), type_name::<T>()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Structural;
    use rstest::rstest;

    type Types = Cons<Entry<String>, Cons<Entry<u8>, Nil>>;

    fn types() -> Types {
        Cons {
            head: Entry::new(Structural),
            tail: Cons {
                head: Entry::new(Structural),
                tail: Nil,
            },
        }
    }

    #[rstest]
    fn describe_lists_types_in_registration_order() {
        let mut described = Vec::new();
        Types::describe(&mut described);

        assert_eq!(Types::LEN, 2);
        assert_eq!(
            described,
            vec![
                (TypeId::of::<u8>(), type_name::<u8>()),
                (TypeId::of::<String>(), type_name::<String>()),
            ]
        );
    }

    #[rstest]
    fn contains_reaches_into_the_tail() {
        let list = types();
        let entry: &Entry<u8> = <Types as Contains<u8, There<Here>>>::entry(&list);
        assert!(format!("{entry:?}").contains("u8"));
    }
}
