//! Map percolation components back to original graph nodes

use std::collections::BTreeSet;
use crate::clique::CliqueIndex;
use crate::cluster::{Community, Component};

/// One community per component: the union of the nodes of its cliques.
///
/// Output order follows component order. Nodes shared between components
/// stay in every community that contains them.
pub fn materialize_communities(components: &[Component], index: &CliqueIndex) -> Vec<Community> {
    components
        .iter()
        .enumerate()
        .map(|(position, component)| {
            let members: BTreeSet<u32> = component
                .iter()
                .filter_map(|&id| index.get(id))
                .flat_map(|clique| clique.nodes().iter().copied())
                .collect();
            let members: Vec<u32> = members.into_iter().collect();

            Community {
                id: position as u32,
                size: members.len(),
                members,
                clique_count: component.len(),
            }
        })
        .collect()
}
