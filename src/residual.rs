/*
 * Copyright (c) 2024 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Residual capacities of a flow network during a run.
//!
//! The residual graph is a snapshot of the remaining capacity of each
//! arc taken at the start of a run. Augmentations only *decrease* the
//! capacity of the forward arcs, no reverse arcs are opened. Hence flow
//! once pushed is never cancelled, which can leave the computed flow
//! below the true maximum on networks that require flow cancellation.
//!
//! # Example
//!
//! ```
//! use rs_flownet::network::Network;
//! use rs_flownet::residual::ResidualGraph;
//!
//! let mut net = Network::<u32>::new();
//! for id in 1..=3 {
//!     net.add_node(id).unwrap();
//! }
//! net.add_edge(1, 2, 5).unwrap();
//! net.add_edge(1, 3, 2).unwrap();
//!
//! let mut g = ResidualGraph::build(&net);
//! g.reduce(1, 2, 5).unwrap();
//! assert_eq!(g.capacity_of(1, 2), 0);
//! assert_eq!(g.neighbors_with_capacity(1).collect::<Vec<_>>(), vec![(3, 2)]);
//! assert!(g.reduce(1, 3, 3).is_err());
//! ```

use crate::error::{Error, Result};
use crate::network::{Network, NodeId};
use crate::num::traits::NumAssign;

use std::collections::HashMap;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Remaining capacity of each arc of a network.
///
/// Internally nodes are numbered `0..n` in the insertion order of the
/// network, the outgoing arcs of each node are kept in the insertion
/// order of the arcs.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResidualGraph<F> {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    neighs: Vec<Vec<(usize, F)>>,
}

impl<F> ResidualGraph<F>
where
    F: NumAssign + Ord + Copy,
{
    /// Build the residual graph from the current arc residuals.
    pub fn build(network: &Network<F>) -> Self {
        let ids: Vec<NodeId> = network.nodes().map(|n| n.id()).collect();
        let index: HashMap<NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let mut neighs = vec![vec![]; ids.len()];
        for e in network.edges() {
            if let (Some(&u), Some(&v)) = (index.get(&e.tail()), index.get(&e.head())) {
                neighs[u].push((v, e.residual()));
            }
        }
        ResidualGraph { ids, index, neighs }
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.ids.len()
    }

    /// Iterate over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().cloned()
    }

    /// Return the residual capacity of the arc `(u,v)`.
    ///
    /// This is zero if there is no such arc.
    pub fn capacity_of(&self, u: NodeId, v: NodeId) -> F {
        match (self.index.get(&u), self.index.get(&v)) {
            (Some(&u), Some(&v)) => self.arc_capacity(u, v),
            _ => F::zero(),
        }
    }

    /// Iterate over the neighbors of `u` reachable by an arc with
    /// positive residual capacity.
    pub fn neighbors_with_capacity(&self, u: NodeId) -> impl Iterator<Item = (NodeId, F)> + '_ {
        self.index
            .get(&u)
            .into_iter()
            .flat_map(move |&u| self.arcs(u))
            .map(move |(v, cap)| (self.ids[v], cap))
    }

    /// Subtract `amount` from the residual capacity of the arc `(u,v)`.
    ///
    /// Fails with [`Error::InvariantViolation`] if the arc does not
    /// exist or its residual capacity is smaller than `amount`. The
    /// graph is left unchanged in this case.
    pub fn reduce(&mut self, u: NodeId, v: NodeId, amount: F) -> Result<()> {
        let violation = Error::InvariantViolation { tail: u, head: v };
        let (ui, vi) = match (self.index.get(&u), self.index.get(&v)) {
            (Some(&ui), Some(&vi)) => (ui, vi),
            _ => return Err(violation),
        };
        let cap = self.neighs[ui]
            .iter_mut()
            .find(|(w, _)| *w == vi)
            .map(|(_, cap)| cap)
            .ok_or(violation)?;
        if amount > *cap {
            return Err(violation);
        }
        *cap -= amount;
        Ok(())
    }

    /// Return the internal number of a node.
    pub(crate) fn node_index(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).cloned()
    }

    /// All outgoing arcs of the internal node `u`, exhausted ones included.
    pub(crate) fn all_arcs(&self, u: usize) -> &[(usize, F)] {
        &self.neighs[u]
    }

    /// The outgoing arcs of the internal node `u` with positive capacity.
    pub(crate) fn arcs(&self, u: usize) -> impl Iterator<Item = (usize, F)> + '_ {
        self.neighs[u].iter().cloned().filter(|&(_, cap)| cap > F::zero())
    }

    /// The residual capacity of the arc between internal nodes.
    pub(crate) fn arc_capacity(&self, u: usize, v: usize) -> F {
        self.neighs[u]
            .iter()
            .find(|&&(w, _)| w == v)
            .map(|&(_, cap)| cap)
            .unwrap_or_else(F::zero)
    }

    /// The minimal residual capacity along a path of internal nodes.
    pub(crate) fn bottleneck(&self, path: &[usize]) -> F {
        let mut arcs = path.windows(2).map(|uv| self.arc_capacity(uv[0], uv[1]));
        let first = arcs.next().unwrap_or_else(F::zero);
        arcs.fold(first, |df, cap| if cap < df { cap } else { df })
    }

    /// Translate a path of internal nodes to node ids.
    pub(crate) fn path_ids(&self, path: &[usize]) -> Vec<NodeId> {
        path.iter().map(|&u| self.ids[u]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ResidualGraph;
    use crate::error::Error;
    use crate::network::Network;

    #[test]
    fn test_build_from_residuals() {
        let mut net = Network::<u32>::new();
        for id in &[4, 2, 9] {
            net.add_node(*id).unwrap();
        }
        net.add_edge(4, 9, 3).unwrap();
        net.add_edge(4, 2, 6).unwrap();
        net.add_edge(2, 9, 1).unwrap();
        net.push_flow(4, 2, 2).unwrap();

        let g = ResidualGraph::build(&net);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec![4, 2, 9]);
        assert_eq!(g.capacity_of(4, 2), 4);
        assert_eq!(g.capacity_of(2, 4), 0);
        assert_eq!(g.capacity_of(4, 7), 0);
        assert_eq!(g.neighbors_with_capacity(4).collect::<Vec<_>>(), vec![(9, 3), (2, 4)]);
        assert_eq!(g.neighbors_with_capacity(7).count(), 0);
    }

    #[test]
    fn test_reduce() {
        let mut net = Network::<u32>::new();
        net.add_node(1).unwrap();
        net.add_node(2).unwrap();
        net.add_edge(1, 2, 3).unwrap();

        let mut g = ResidualGraph::build(&net);
        g.reduce(1, 2, 2).unwrap();
        assert_eq!(g.capacity_of(1, 2), 1);
        assert_eq!(g.reduce(1, 2, 2), Err(Error::InvariantViolation { tail: 1, head: 2 }));
        assert_eq!(g.capacity_of(1, 2), 1);
        assert_eq!(g.reduce(2, 1, 1), Err(Error::InvariantViolation { tail: 2, head: 1 }));

        g.reduce(1, 2, 1).unwrap();
        assert_eq!(g.neighbors_with_capacity(1).count(), 0);
        assert_eq!(g.bottleneck(&[0, 1]), 0);
    }
}
