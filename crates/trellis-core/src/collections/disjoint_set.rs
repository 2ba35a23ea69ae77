//! Disjoint-set forest (union-find).
//!
//! Elements are interned into a dense index on `make_set`, so the forest
//! itself is two parallel arrays. `find` compresses the whole traversed
//! chain onto the root, not just every other node.

use std::fmt::Debug;
use std::hash::Hash;
use trellis_common::utils::error::{Error, Result};
use trellis_common::utils::hash::FxHashMap;

#[derive(Debug, Clone, Copy)]
struct Node {
    parent: usize,
    rank: u32,
}

/// A partition of elements into disjoint sets.
///
/// # Example
///
/// ```
/// use trellis_core::DisjointSetForest;
///
/// let mut sets = DisjointSetForest::new();
/// for x in 0..5 {
///     sets.make_set(x).unwrap();
/// }
/// assert!(sets.union(&0, &1).unwrap());
/// assert!(!sets.union(&1, &0).unwrap());
/// assert_eq!(sets.set_count(), 4);
/// assert!(sets.are_in_same_set(&0, &1).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSetForest<T> {
    elements: Vec<T>,
    nodes: Vec<Node>,
    index: FxHashMap<T, usize>,
    set_count: usize,
}

impl<T> DisjointSetForest<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty forest with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            elements: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            index,
            set_count: 0,
        }
    }

    /// Registers `element` as a new singleton set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateElement`] if it is already registered.
    pub fn make_set(&mut self, element: T) -> Result<()> {
        if self.index.contains_key(&element) {
            return Err(Error::duplicate(&element));
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent: id,
            rank: 0,
        });
        self.index.insert(element.clone(), id);
        self.elements.push(element);
        self.set_count += 1;
        Ok(())
    }

    /// Returns the representative of the set containing `element`.
    ///
    /// Every node visited on the way is re-parented directly onto the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if `element` was never registered.
    pub fn find(&mut self, element: &T) -> Result<T> {
        let id = self.id_of(element)?;
        let root = self.find_root(id);
        Ok(self.elements[root].clone())
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns true if a merge happened, false if they already shared a set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if either element is unregistered.
    pub fn union(&mut self, a: &T, b: &T) -> Result<bool> {
        let a = self.id_of(a)?;
        let b = self.id_of(b)?;
        let root_a = self.find_root(a);
        let root_b = self.find_root(b);

        if root_a == root_b {
            return Ok(false);
        }

        let rank_a = self.nodes[root_a].rank;
        let rank_b = self.nodes[root_b].rank;
        match rank_a.cmp(&rank_b) {
            std::cmp::Ordering::Less => self.nodes[root_a].parent = root_b,
            std::cmp::Ordering::Greater => self.nodes[root_b].parent = root_a,
            std::cmp::Ordering::Equal => {
                self.nodes[root_b].parent = root_a;
                self.nodes[root_a].rank += 1;
            }
        }

        self.set_count -= 1;
        Ok(true)
    }

    /// Returns true if `a` and `b` belong to the same set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if either element is unregistered.
    pub fn are_in_same_set(&mut self, a: &T, b: &T) -> Result<bool> {
        let a = self.id_of(a)?;
        let b = self.id_of(b)?;
        Ok(self.find_root(a) == self.find_root(b))
    }

    /// Returns true if `element` is registered.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of disjoint sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Returns true if no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every element, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.nodes.clear();
        self.index.clear();
        self.set_count = 0;
    }

    /// Returns the immediate parent of `element` without compressing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if `element` was never registered.
    pub fn parent(&self, element: &T) -> Result<&T> {
        let id = self.id_of(element)?;
        Ok(&self.elements[self.nodes[id].parent])
    }

    /// Returns the rank of `element`'s node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if `element` was never registered.
    pub fn rank(&self, element: &T) -> Result<u32> {
        let id = self.id_of(element)?;
        Ok(self.nodes[id].rank)
    }

    /// Iterates registered elements in registration order.
    pub fn elements(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    /// Returns the current partition, one vector per set.
    ///
    /// Sets appear in order of their first registered member.
    pub fn sets(&mut self) -> Vec<Vec<T>> {
        let mut groups: Vec<Vec<T>> = Vec::with_capacity(self.set_count);
        let mut group_of_root: FxHashMap<usize, usize> = FxHashMap::default();

        for id in 0..self.nodes.len() {
            let root = self.find_root(id);
            let group = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(self.elements[id].clone());
        }
        groups
    }

    fn id_of(&self, element: &T) -> Result<usize> {
        self.index
            .get(element)
            .copied()
            .ok_or_else(|| Error::missing(element))
    }

    fn find_root(&mut self, id: usize) -> usize {
        let mut root = id;
        while self.nodes[root].parent != root {
            root = self.nodes[root].parent;
        }

        let mut current = id;
        while current != root {
            let next = self.nodes[current].parent;
            self.nodes[current].parent = root;
            current = next;
        }
        root
    }
}

impl<T> Default for DisjointSetForest<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest(n: u32) -> DisjointSetForest<u32> {
        let mut sets = DisjointSetForest::with_capacity(n as usize);
        for x in 0..n {
            sets.make_set(x).unwrap();
        }
        sets
    }

    #[test]
    fn test_make_set_counts() {
        let mut sets = DisjointSetForest::new();
        for i in 0..4u32 {
            sets.make_set(i).unwrap();
            assert!(sets.contains(&i));
            assert_eq!(sets.element_count(), i as usize + 1);
            assert_eq!(sets.set_count(), i as usize + 1);
        }
        assert!(matches!(sets.make_set(2), Err(Error::DuplicateElement(_))));
    }

    #[test]
    fn test_union_example() {
        let mut sets = forest(5);
        assert_eq!(sets.set_count(), 5);

        assert!(sets.union(&0, &1).unwrap());
        assert_eq!(sets.set_count(), 4);
        assert!(sets.union(&2, &3).unwrap());
        assert_eq!(sets.set_count(), 3);

        assert_eq!(sets.find(&0).unwrap(), sets.find(&1).unwrap());
        assert_eq!(sets.find(&2).unwrap(), sets.find(&3).unwrap());
        assert_ne!(sets.find(&0).unwrap(), sets.find(&2).unwrap());
        assert_eq!(sets.find(&4).unwrap(), 4);
    }

    #[test]
    fn test_redundant_union_keeps_count() {
        let mut sets = forest(3);
        sets.union(&0, &1).unwrap();
        sets.union(&1, &2).unwrap();
        assert_eq!(sets.set_count(), 1);
        assert!(!sets.union(&2, &0).unwrap());
        assert_eq!(sets.set_count(), 1);
        assert!(sets.are_in_same_set(&0, &2).unwrap());
    }

    #[test]
    fn test_missing_element() {
        let mut sets = forest(2);
        assert!(matches!(sets.find(&9), Err(Error::MissingElement(_))));
        assert!(matches!(sets.union(&0, &9), Err(Error::MissingElement(_))));
        assert!(sets.are_in_same_set(&9, &0).is_err());
        assert!(!sets.contains(&9));
    }

    #[test]
    fn test_union_by_rank() {
        let mut sets = forest(4);
        // Equal ranks: first root wins and its rank grows
        sets.union(&0, &1).unwrap();
        assert_eq!(sets.rank(&0).unwrap(), 1);
        assert_eq!(sets.parent(&1).unwrap(), &0);

        // Lower-rank root goes under the higher-rank one
        sets.union(&2, &0).unwrap();
        assert_eq!(sets.parent(&2).unwrap(), &0);
        assert_eq!(sets.rank(&0).unwrap(), 1);
    }

    #[test]
    fn test_full_path_compression() {
        let mut sets = forest(8);
        // Build a tree of height 3 rooted at 0: ranks force the chain shape
        sets.union(&0, &1).unwrap();
        sets.union(&2, &3).unwrap();
        sets.union(&4, &5).unwrap();
        sets.union(&6, &7).unwrap();
        sets.union(&0, &2).unwrap();
        sets.union(&4, &6).unwrap();
        sets.union(&0, &4).unwrap();

        // 7 -> 6 -> 4 -> 0 before compression
        assert_eq!(sets.parent(&7).unwrap(), &6);
        assert_eq!(sets.find(&7).unwrap(), 0);
        assert_eq!(sets.parent(&7).unwrap(), &0);
        assert_eq!(sets.parent(&6).unwrap(), &0);
        assert_eq!(sets.parent(&4).unwrap(), &0);
    }

    #[test]
    fn test_sets_snapshot() {
        let mut sets = forest(5);
        sets.union(&3, &0).unwrap();
        sets.union(&1, &4).unwrap();

        let groups = sets.sets();
        assert_eq!(groups, vec![vec![0, 3], vec![1, 4], vec![2]]);
        assert_eq!(sets.elements().count(), 5);
    }

    #[test]
    fn test_clear_allows_reuse() {
        let mut sets = forest(3);
        sets.union(&0, &1).unwrap();
        sets.clear();
        assert!(sets.is_empty());
        assert_eq!(sets.set_count(), 0);

        sets.make_set(0).unwrap();
        assert_eq!(sets.find(&0).unwrap(), 0);
        assert_eq!(sets.rank(&0).unwrap(), 0);
    }
}
