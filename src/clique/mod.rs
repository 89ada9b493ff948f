//! Cliques and their level-by-level enumeration

pub mod enumerate;
pub mod index;

pub use enumerate::{enumerate_cliques, level_for_size, CliqueEnumerator, LevelObserver, LevelReport};
pub use index::{CliqueId, CliqueIndex};

use serde::{Deserialize, Serialize};

/// A set of pairwise-adjacent nodes, stored as strictly increasing indices
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Clique(Vec<u32>);

impl Clique {
    /// The 2-clique formed by an edge
    pub fn edge(a: u32, b: u32) -> Self {
        if a < b {
            Self(vec![a, b])
        } else {
            Self(vec![b, a])
        }
    }

    /// Wrap a node set; duplicates are removed.
    ///
    /// Adjacency is not checked, cliques are only ever grown from edges.
    pub fn from_nodes(nodes: impl IntoIterator<Item = u32>) -> Self {
        let mut nodes: Vec<u32> = nodes.into_iter().collect();
        nodes.sort_unstable();
        nodes.dedup();
        Self(nodes)
    }

    /// Member nodes in ascending order
    pub fn nodes(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, node: u32) -> bool {
        self.0.binary_search(&node).is_ok()
    }

    /// The symmetric difference of `self` and `other` if it has exactly two
    /// elements, in ascending order.
    pub fn symmetric_difference_pair(&self, other: &Clique) -> Option<(u32, u32)> {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j) = (0, 0);
        let mut diff = [0u32; 2];
        let mut found = 0;

        loop {
            let next = match (a.get(i), b.get(j)) {
                (Some(&x), Some(&y)) if x == y => {
                    i += 1;
                    j += 1;
                    continue;
                }
                (Some(&x), Some(&y)) if x < y => {
                    i += 1;
                    x
                }
                (Some(_), Some(&y)) => {
                    j += 1;
                    y
                }
                (Some(&x), None) => {
                    i += 1;
                    x
                }
                (None, Some(&y)) => {
                    j += 1;
                    y
                }
                (None, None) => break,
            };
            if found == diff.len() {
                return None;
            }
            diff[found] = next;
            found += 1;
        }

        (found == 2).then_some((diff[0], diff[1]))
    }

    /// Number of nodes shared with `other`
    pub fn intersection_len(&self, other: &Clique) -> usize {
        intersection_len(&self.0, &other.0)
    }

    /// Nodes in either clique
    pub fn union(&self, other: &Clique) -> Clique {
        Clique(sorted_union(&self.0, &other.0))
    }
}

/// Union of two strictly increasing slices
pub(crate) fn sorted_union(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Size of the intersection of two strictly increasing slices
pub(crate) fn intersection_len(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            shared += 1;
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_difference_pair_needs_exactly_two() {
        let abc = Clique::from_nodes([1, 2, 3]);
        let bcd = Clique::from_nodes([2, 3, 4]);
        let cde = Clique::from_nodes([3, 4, 5]);

        assert_eq!(abc.symmetric_difference_pair(&bcd), Some((1, 4)));
        assert_eq!(abc.symmetric_difference_pair(&cde), None);
        assert_eq!(abc.symmetric_difference_pair(&abc), None);
        assert_eq!(
            Clique::edge(7, 3).symmetric_difference_pair(&Clique::edge(3, 9)),
            Some((7, 9))
        );
    }

    #[test]
    fn union_and_intersection_follow_set_semantics() {
        let left = Clique::from_nodes([5, 1, 3, 3]);
        let right = Clique::from_nodes([3, 4, 5]);

        assert_eq!(left.nodes(), &[1, 3, 5]);
        assert_eq!(left.intersection_len(&right), 2);
        assert_eq!(left.union(&right).nodes(), &[1, 3, 4, 5]);
        assert!(left.contains(5));
        assert!(!left.contains(4));
    }
}
