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

//! Minimal cut (bottleneck) analysis of a finished run.
//!
//! The source side of the cut consists of all nodes reachable from the
//! source via arcs with positive residual capacity. The cut arcs are
//! the arcs of the network leaving the source side. If the sum of their
//! capacities equals the flow value, the flow is maximal.
//!
//! Algorithms that are not guaranteed to be optimal may produce a flow
//! below the cut capacity, it is never above.

use crate::network::{Network, NodeId};
use crate::num::traits::NumAssign;
use crate::residual::ResidualGraph;

use log::{debug, warn};

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// An arc crossing the cut.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CutEdge<F> {
    pub tail: NodeId,
    pub head: NodeId,
    /// The original capacity of the arc.
    pub capacity: F,
}

/// The minimal cut of a run.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MinCut<F> {
    source_side: Vec<NodeId>,
    edges: Vec<CutEdge<F>>,
    capacity: F,
    flow: F,
}

impl<F> MinCut<F>
where
    F: NumAssign + Ord + Copy,
{
    /// The nodes reachable from the source, in ascending order.
    pub fn source_side(&self) -> &[NodeId] {
        &self.source_side
    }

    /// The cut arcs in insertion order of the network.
    pub fn edges(&self) -> &[CutEdge<F>] {
        &self.edges
    }

    /// The sum of the capacities of the cut arcs.
    ///
    /// This sum must fit into `F`. For a verified cut it equals the flow
    /// value of the run.
    pub fn capacity(&self) -> F {
        self.capacity
    }

    /// The flow value the cut has been compared with.
    pub fn flow(&self) -> F {
        self.flow
    }

    /// Return `true` if flow value and cut capacity coincide.
    pub fn is_verified(&self) -> bool {
        self.capacity == self.flow
    }

    /// Return an object that prints the analysis using node labels.
    pub fn display<'b>(&'b self, network: &'b Network<F>) -> DisplayMinCut<'b, F> {
        DisplayMinCut { cut: self, network }
    }
}

/// Compute the minimal cut of a final residual graph.
///
/// `flow` is the total flow of the run that produced `residual`.
pub fn analyze<F>(network: &Network<F>, residual: &ResidualGraph<F>, src: NodeId, flow: F) -> MinCut<F>
where
    F: NumAssign + Ord + Copy,
{
    let mut reachable = vec![false; residual.num_nodes()];
    if let Some(s) = residual.node_index(src) {
        reachable[s] = true;
        let mut stack = vec![s];
        while let Some(u) = stack.pop() {
            for (v, _) in residual.arcs(u) {
                if !reachable[v] {
                    reachable[v] = true;
                    stack.push(v);
                }
            }
        }
    }

    let is_reachable = |u: NodeId| residual.node_index(u).map(|u| reachable[u]).unwrap_or(false);

    let mut source_side: Vec<_> = residual.node_ids().filter(|&u| is_reachable(u)).collect();
    source_side.sort_unstable();

    let edges: Vec<_> = network
        .edges()
        .filter(|e| is_reachable(e.tail()) && !is_reachable(e.head()))
        .map(|e| CutEdge {
            tail: e.tail(),
            head: e.head(),
            capacity: e.capacity(),
        })
        .collect();
    let capacity = edges.iter().fold(F::zero(), |acc, e| acc + e.capacity);

    for e in &edges {
        debug!("Cut arc ({}, {})", e.tail, e.head);
    }
    if capacity != flow {
        warn!("Cut capacity differs from flow value, the flow is not maximal");
    }

    MinCut {
        source_side,
        edges,
        capacity,
        flow,
    }
}

/// Printable cut analysis, see [`MinCut::display`].
pub struct DisplayMinCut<'b, F> {
    cut: &'b MinCut<F>,
    network: &'b Network<F>,
}

impl<'b, F> fmt::Display for DisplayMinCut<'b, F>
where
    F: NumAssign + Ord + Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Minimal cut (bottlenecks)")?;
        for e in &self.cut.edges {
            writeln!(
                f,
                "  {} → {} (capacity {})",
                self.network.label(e.tail),
                self.network.label(e.head),
                e.capacity
            )?;
        }
        writeln!(f, "Cut capacity: {}", self.cut.capacity)?;
        writeln!(f, "Maximum flow: {}", self.cut.flow)?;
        if self.cut.is_verified() {
            write!(f, "Theorem verified: max flow == min cut")
        } else {
            write!(f, "Flow is below the cut capacity, the flow is not maximal")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze, CutEdge};
    use crate::network::Network;
    use crate::residual::ResidualGraph;

    #[test]
    fn test_cut_uses_original_capacities() {
        let mut net = Network::<u32>::new();
        for id in 1..=3 {
            net.add_node(id).unwrap();
        }
        net.add_edge(1, 2, 8).unwrap();
        net.add_edge(2, 3, 3).unwrap();

        let mut g = ResidualGraph::build(&net);
        g.reduce(1, 2, 3).unwrap();
        g.reduce(2, 3, 3).unwrap();

        let cut = analyze(&net, &g, 1, 3);
        assert_eq!(cut.source_side(), &[1, 2]);
        assert_eq!(
            cut.edges(),
            &[CutEdge {
                tail: 2,
                head: 3,
                capacity: 3
            }]
        );
        assert_eq!(cut.capacity(), 3);
        assert!(cut.is_verified());

        let text = cut.display(&net).to_string();
        assert!(text.contains("2 → 3 (capacity 3)"));
        assert!(text.ends_with("Theorem verified: max flow == min cut"));
    }

    #[test]
    fn test_flow_below_cut() {
        let mut net = Network::<u32>::new();
        for id in 1..=2 {
            net.add_node(id).unwrap();
        }
        net.add_edge(1, 2, 4).unwrap();
        let mut g = ResidualGraph::build(&net);
        g.reduce(1, 2, 4).unwrap();

        let cut = analyze(&net, &g, 1, 2);
        assert_eq!(cut.source_side(), &[1]);
        assert_eq!(cut.capacity(), 4);
        assert!(!cut.is_verified());
        assert!(cut.display(&net).to_string().ends_with("the flow is not maximal"));
    }
}
