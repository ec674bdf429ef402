//! Dependency Index
//!
//! The index stores a set of ordered pairs `(s, t)` ("t depends on s") and
//! answers lookups in both directions.
//!
//! # Layout
//!
//! Two adjacency maps mirror the same pair set:
//!
//! - `dependents`: s -> every t such that (s, t) is stored
//! - `dependees`: t -> every s such that (s, t) is stored
//!
//! Every mutation updates both maps before returning. A key never maps to an
//! empty set; the entry is removed as soon as its last member goes.
//!
//! # Ordering
//!
//! The maps are `indexmap` collections. Members of a key's set come back in
//! insertion order (removal shifts, it never reorders), so repeated queries
//! between mutations always yield the same sequence.

use std::hash::Hash;
use std::iter::FusedIterator;

use indexmap::{set, Equivalent, IndexMap, IndexSet};
use tracing::{debug, trace};

use super::pair::DependencyPair;

type Adjacency<K> = IndexMap<K, IndexSet<K>>;

/// A bidirectional index over dependency pairs.
///
/// Lookups accept any borrowed form of the key, so a `DependencyIndex<String>`
/// can be queried with `&str`.
///
/// The index does no locking. Mutation goes through `&mut self`, so sharing
/// one across threads needs an external lock.
#[derive(Debug, Clone)]
pub struct DependencyIndex<K = String> {
    /// Key -> keys that depend on it.
    dependents: Adjacency<K>,

    /// Key -> keys it depends on.
    dependees: Adjacency<K>,

    /// Number of distinct pairs.
    size: usize,
}

impl<K> DependencyIndex<K> {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            dependents: IndexMap::new(),
            dependees: IndexMap::new(),
            size: 0,
        }
    }

    /// Create an empty index with room for `keys` distinct keys on each side
    /// before reallocating.
    pub fn with_capacity(keys: usize) -> Self {
        Self {
            dependents: IndexMap::with_capacity(keys),
            dependees: IndexMap::with_capacity(keys),
            size: 0,
        }
    }

    /// The number of ordered pairs in the index.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if the index holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<K> Default for DependencyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DependencyIndex<K>
where
    K: Hash + Eq + Clone,
{
    /// The number of keys `s` depends on.
    pub fn dependee_count<Q>(&self, s: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.dependees.get(s).map_or(0, |set| set.len())
    }

    /// The number of keys that depend on `s`.
    pub fn dependent_count<Q>(&self, s: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.dependents.get(s).map_or(0, |set| set.len())
    }

    /// Check if anything depends on `s`.
    pub fn has_dependents<Q>(&self, s: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.dependents.contains_key(s)
    }

    /// Check if `s` depends on anything.
    pub fn has_dependees<Q>(&self, s: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.dependees.contains_key(s)
    }

    /// Iterate over every `t` such that `(s, t)` is stored.
    ///
    /// Unknown keys yield an empty iterator.
    pub fn dependents<Q>(&self, s: &Q) -> Keys<'_, K>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        Keys::new(self.dependents.get(s))
    }

    /// Iterate over every `r` such that `(r, s)` is stored.
    ///
    /// Unknown keys yield an empty iterator.
    pub fn dependees<Q>(&self, s: &Q) -> Keys<'_, K>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        Keys::new(self.dependees.get(s))
    }

    /// Check if the pair `(s, t)` is stored.
    pub fn contains<Q>(&self, s: &Q, t: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.dependents.get(s).is_some_and(|set| set.contains(t))
    }

    /// Iterate over every stored pair as `(dependee, dependent)`.
    pub fn pairs(&self) -> impl Iterator<Item = (&K, &K)> + '_ {
        self.dependents
            .iter()
            .flat_map(|(s, set)| set.iter().map(move |t| (s, t)))
    }

    /// Collect every stored pair into owned values.
    pub fn to_pairs(&self) -> Vec<DependencyPair<K>> {
        self.pairs()
            .map(|(s, t)| DependencyPair::new(s.clone(), t.clone()))
            .collect()
    }

    /// Add the pair `(s, t)`: `t` depends on `s`.
    ///
    /// Returns `false` if the pair was already present.
    pub fn add_dependency(&mut self, s: K, t: K) -> bool {
        if self.contains(&s, &t) {
            return false;
        }

        self.dependees.entry(t.clone()).or_default().insert(s.clone());
        self.dependents.entry(s).or_default().insert(t);
        self.size += 1;

        trace!(pairs = self.size, "dependency added");
        true
    }

    /// Remove the pair `(s, t)` if it exists.
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn remove_dependency<Q>(&mut self, s: &Q, t: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        if !unlink(&mut self.dependents, s, t) {
            return false;
        }
        let mirrored = unlink(&mut self.dependees, t, s);
        debug_assert!(mirrored, "dependee map out of sync with dependent map");
        self.size -= 1;

        trace!(pairs = self.size, "dependency removed");
        true
    }

    /// Remove every pair `(s, r)`, then add `(s, t)` for each `t` in
    /// `new_dependents`.
    ///
    /// Duplicates in `new_dependents` collapse to one pair.
    pub fn replace_dependents<I>(&mut self, s: K, new_dependents: I)
    where
        I: IntoIterator<Item = K>,
    {
        let removed = self.detach_dependents(&s);

        let mut added = 0usize;
        for t in new_dependents {
            if self.add_dependency(s.clone(), t) {
                added += 1;
            }
        }

        debug!(removed, added, pairs = self.size, "dependents replaced");
    }

    /// Remove every pair `(r, s)`, then add `(t, s)` for each `t` in
    /// `new_dependees`.
    ///
    /// Duplicates in `new_dependees` collapse to one pair.
    pub fn replace_dependees<I>(&mut self, s: K, new_dependees: I)
    where
        I: IntoIterator<Item = K>,
    {
        let removed = self.detach_dependees(&s);

        let mut added = 0usize;
        for t in new_dependees {
            if self.add_dependency(t, s.clone()) {
                added += 1;
            }
        }

        debug!(removed, added, pairs = self.size, "dependees replaced");
    }

    /// Remove every pair in which `s` appears on either side.
    ///
    /// Returns the number of pairs removed. A self-pair `(s, s)` counts once.
    pub fn remove_key<Q>(&mut self, s: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let removed = self.detach_dependents(s) + self.detach_dependees(s);
        if removed > 0 {
            debug!(removed, pairs = self.size, "key removed");
        }
        removed
    }

    /// Remove all pairs.
    pub fn clear(&mut self) {
        let removed = self.size;
        self.dependents.clear();
        self.dependees.clear();
        self.size = 0;

        debug!(removed, "index cleared");
    }

    /// Drop every pair `(s, r)` and return how many there were.
    fn detach_dependents<Q>(&mut self, s: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        // Taking the set out of the map snapshots it before the mirror changes.
        let Some(old) = self.dependents.swap_remove(s) else {
            return 0;
        };
        for t in &old {
            let mirrored = unlink(&mut self.dependees, t, s);
            debug_assert!(mirrored, "dependee map out of sync with dependent map");
        }
        self.size -= old.len();
        old.len()
    }

    /// Drop every pair `(r, s)` and return how many there were.
    fn detach_dependees<Q>(&mut self, s: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let Some(old) = self.dependees.swap_remove(s) else {
            return 0;
        };
        for r in &old {
            let mirrored = unlink(&mut self.dependents, r, s);
            debug_assert!(mirrored, "dependent map out of sync with dependee map");
        }
        self.size -= old.len();
        old.len()
    }
}

/// Remove `member` from the set stored under `key`, pruning the entry if it
/// empties. Returns `false` if `member` was not there.
fn unlink<K, A, B>(map: &mut Adjacency<K>, key: &A, member: &B) -> bool
where
    K: Hash + Eq,
    A: ?Sized + Hash + Equivalent<K>,
    B: ?Sized + Hash + Equivalent<K>,
{
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    if !set.shift_remove(member) {
        return false;
    }
    if set.is_empty() {
        map.swap_remove(key);
    }
    true
}

impl<K> PartialEq for DependencyIndex<K>
where
    K: Hash + Eq,
{
    /// Two indexes are equal when they hold the same pairs, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.dependents == other.dependents
    }
}

impl<K> Eq for DependencyIndex<K> where K: Hash + Eq {}

impl<K> Extend<(K, K)> for DependencyIndex<K>
where
    K: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = (K, K)>>(&mut self, iter: I) {
        for (s, t) in iter {
            self.add_dependency(s, t);
        }
    }
}

impl<K> Extend<DependencyPair<K>> for DependencyIndex<K>
where
    K: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = DependencyPair<K>>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(DependencyPair::into_tuple));
    }
}

impl<K> FromIterator<(K, K)> for DependencyIndex<K>
where
    K: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, K)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<K> FromIterator<DependencyPair<K>> for DependencyIndex<K>
where
    K: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = DependencyPair<K>>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

/// Borrowed iterator over the keys related to one key.
///
/// Returned by [`DependencyIndex::dependents`] and
/// [`DependencyIndex::dependees`]. It holds a shared borrow of the index, so
/// the index cannot change while it is alive.
#[derive(Debug, Clone)]
pub struct Keys<'a, K> {
    inner: Option<set::Iter<'a, K>>,
}

impl<'a, K> Keys<'a, K> {
    fn new(set: Option<&'a IndexSet<K>>) -> Self {
        Self {
            inner: set.map(|set| set.iter()),
        }
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<K> DoubleEndedIterator for Keys<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

impl<K> FusedIterator for Keys<'_, K> {}
