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

//! Node-arc incidence matrix of a network.
//!
//! Nodes are ordered by id, arcs by `(tail, head)`. The entry of a node
//! for an arc is `-1` if the node is the tail of the arc, `1` if it is
//! the head and `0` otherwise.
//!
//! # Example
//!
//! ```
//! use rs_flownet::incidence::incidence_matrix;
//! use rs_flownet::network::Network;
//!
//! let mut net = Network::<u32>::new();
//! for id in &[3, 1, 2] {
//!     net.add_node(*id).unwrap();
//! }
//! net.add_edge(2, 3, 4).unwrap();
//! net.add_edge(1, 2, 6).unwrap();
//!
//! let m = incidence_matrix(&net);
//! assert_eq!(m.arcs().iter().map(|a| (a.tail, a.head)).collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
//! assert_eq!(m.row(0), &[-1, 0]);
//! assert_eq!(m.row(1), &[1, -1]);
//! assert_eq!(m.row(2), &[0, 1]);
//! ```

use crate::network::{Network, NodeId, Role};
use crate::num::traits::NumAssign;

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A row header of the matrix.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NodeEntry {
    pub id: NodeId,
    pub label: String,
    pub role: Role,
}

/// A column header of the matrix with the current flow data of the arc.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ArcEntry<F> {
    pub tail: NodeId,
    pub head: NodeId,
    pub capacity: F,
    pub flow: F,
    pub residual: F,
}

/// The incidence matrix together with the capacity table.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IncidenceMatrix<F> {
    nodes: Vec<NodeEntry>,
    arcs: Vec<ArcEntry<F>>,
    entries: Vec<Vec<i8>>,
}

impl<F> IncidenceMatrix<F> {
    /// The rows of the matrix.
    pub fn nodes(&self) -> &[NodeEntry] {
        &self.nodes
    }

    /// The columns of the matrix.
    pub fn arcs(&self) -> &[ArcEntry<F>] {
        &self.arcs
    }

    /// The entries of row `i`.
    pub fn row(&self, i: usize) -> &[i8] {
        &self.entries[i]
    }

    /// The entry of node row `i` and arc column `j`.
    pub fn entry(&self, i: usize, j: usize) -> i8 {
        self.entries[i][j]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    fn label(&self, id: NodeId) -> String {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Build the incidence matrix of a network.
pub fn incidence_matrix<F>(network: &Network<F>) -> IncidenceMatrix<F>
where
    F: NumAssign + Ord + Copy,
{
    let nodes: Vec<_> = network
        .sorted_node_ids()
        .into_iter()
        .map(|id| NodeEntry {
            id,
            label: network.label(id).into_owned(),
            role: network.role(id).unwrap_or(Role::Transshipment),
        })
        .collect();

    let arcs: Vec<_> = network
        .sorted_edges()
        .into_iter()
        .map(|e| ArcEntry {
            tail: e.tail(),
            head: e.head(),
            capacity: e.capacity(),
            flow: e.flow(),
            residual: e.residual(),
        })
        .collect();

    let entries: Vec<Vec<i8>> = nodes
        .iter()
        .map(|n| {
            arcs.iter()
                .map(|a| {
                    if a.tail == n.id {
                        -1
                    } else if a.head == n.id {
                        1
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect();

    IncidenceMatrix { nodes, arcs, entries }
}

impl<F> fmt::Display for IncidenceMatrix<F>
where
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "NODES:")?;
        writeln!(f, "ID  | Label | Role")?;
        writeln!(f, "{}", "-".repeat(30))?;
        for n in &self.nodes {
            writeln!(f, "{:3} | {:5} | {}", n.id, n.label, n.role)?;
        }
        writeln!(f)?;

        writeln!(f, "INCIDENCE MATRIX (nodes x arcs):")?;
        let mut header = String::from("Node\\Arc   |");
        for a in &self.arcs {
            header.push_str(&format!(" {:>8} |", format!("{}→{}", self.label(a.tail), self.label(a.head))));
        }
        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "-".repeat(header.chars().count()))?;
        for (n, row) in self.nodes.iter().zip(&self.entries) {
            write!(f, "{:10} |", n.label)?;
            for x in row {
                write!(f, " {:>8} |", x)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        writeln!(f, "ARC CAPACITIES:")?;
        writeln!(f, "From  | To    | Capacity | Flow     | Residual")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for a in &self.arcs {
            writeln!(
                f,
                "{:5} | {:5} | {:>8} | {:>8} | {:>8}",
                self.label(a.tail),
                self.label(a.head),
                a.capacity,
                a.flow,
                a.residual
            )?;
        }
        Ok(())
    }
}
