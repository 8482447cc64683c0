pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::Triangle;

/// The fuzzy sets of one variable, keyed by a fieldless enum.
pub struct Terms<K: Key>(FixedMap<K, Triangle>);

impl<K: Key> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    /// Registers `shape` under `key`, replacing any earlier shape.
    pub fn insert(&mut self, key: K, shape: Triangle) -> Option<Triangle> {
        self.0.insert(key, shape)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Key> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> IntoIterator for Terms<K> {
    type Item = (K, Triangle);
    type IntoIter = std::vec::IntoIter<(K, Triangle)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>().into_iter()
    }
}

/// Declares the enum that unifies the per-variable term enums of a system,
/// along with a `From` conversion for each of them.
///
/// ```
/// use fuzzy_cooling::{term_union, Key};
///
/// #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
/// enum Speed { Slow, Fast }
///
/// #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
/// enum Brake { Soft, Hard }
///
/// term_union! {
///     #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
///     enum CarTerm {
///         Speed(Speed),
///         Brake(Brake),
///     }
/// }
///
/// assert_eq!(CarTerm::from(Brake::Hard), CarTerm::Brake(Brake::Hard));
/// ```
#[macro_export]
macro_rules! term_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($term:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant($term)),+
        }

        $(
            impl From<$term> for $name {
                fn from(term: $term) -> Self {
                    Self::$variant(term)
                }
            }
        )+
    };
}
