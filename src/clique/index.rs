//! Stable integer identifiers for the cliques of one size

use crate::clique::Clique;

/// Identifier of a clique within a [`CliqueIndex`], starting at 1
pub type CliqueId = u32;

/// Dense mapping from clique ids `1..=len()` to cliques, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliqueIndex {
    cliques: Vec<Clique>,
}

impl CliqueIndex {
    /// Number every clique in list order, the first one getting id 1.
    ///
    /// The list is expected to be free of duplicates, as an enumeration level is.
    pub fn new(cliques: Vec<Clique>) -> Self {
        debug_assert!(
            cliques.windows(2).all(|pair| pair[0] != pair[1]),
            "clique index built from a list with adjacent duplicates"
        );
        Self { cliques }
    }

    pub fn len(&self) -> usize {
        self.cliques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cliques.is_empty()
    }

    /// Clique with the given id
    pub fn get(&self, id: CliqueId) -> Option<&Clique> {
        (id as usize).checked_sub(1).and_then(|slot| self.cliques.get(slot))
    }

    /// All `(id, clique)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (CliqueId, &Clique)> + Clone + '_ {
        self.cliques
            .iter()
            .enumerate()
            .map(|(slot, clique)| (slot as CliqueId + 1, clique))
    }

    /// Cliques in id order; slot `i` holds id `i + 1`
    pub fn as_slice(&self) -> &[Clique] {
        &self.cliques
    }
}
