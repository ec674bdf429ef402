//! Dependency Pairs
//!
//! This module defines the value form of a single edge in the dependency
//! index.

use serde::{Deserialize, Serialize};

/// An ordered pair `(dependee, dependent)`.
///
/// The `dependent` depends on the `dependee`: the dependee must be evaluated
/// before the dependent. Two pairs are equal only if both sides are equal, so
/// `("a", "b")` and `("b", "a")` are distinct. A self-pair is an ordinary pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyPair<K = String> {
    /// The key that must be evaluated first.
    pub dependee: K,

    /// The key that depends on `dependee`.
    pub dependent: K,
}

impl<K> DependencyPair<K> {
    /// Create a pair meaning `dependent` depends on `dependee`.
    pub fn new(dependee: K, dependent: K) -> Self {
        Self {
            dependee,
            dependent,
        }
    }

    /// Check if both sides refer to the same key.
    pub fn is_self_loop(&self) -> bool
    where
        K: PartialEq,
    {
        self.dependee == self.dependent
    }

    /// Split the pair back into a `(dependee, dependent)` tuple.
    pub fn into_tuple(self) -> (K, K) {
        (self.dependee, self.dependent)
    }
}

impl<K> From<(K, K)> for DependencyPair<K> {
    fn from((dependee, dependent): (K, K)) -> Self {
        Self::new(dependee, dependent)
    }
}

impl<K> From<DependencyPair<K>> for (K, K) {
    fn from(pair: DependencyPair<K>) -> Self {
        pair.into_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_order_matters() {
        let ab = DependencyPair::new("a", "b");
        let ba = DependencyPair::new("b", "a");
        assert_ne!(ab, ba);
        assert_eq!(ab, DependencyPair::from(("a", "b")));
    }

    #[test]
    fn self_loop_detection() {
        assert!(DependencyPair::new("d", "d").is_self_loop());
        assert!(!DependencyPair::new("a", "d").is_self_loop());
    }

    #[test]
    fn tuple_conversion() {
        let pair = DependencyPair::new(String::from("x"), String::from("y"));
        let (dependee, dependent): (String, String) = pair.into();
        assert_eq!(dependee, "x");
        assert_eq!(dependent, "y");
    }
}
