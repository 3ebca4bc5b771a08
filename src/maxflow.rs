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

//! Augmenting path algorithms.
//!
//! Each algorithm searches *one* augmenting path from the source to the
//! sink in a [`ResidualGraph`]. The path is returned as a [`Route`]
//! together with its bottleneck, the minimal residual capacity along the
//! path. Repeating the search and augmentation until no path is left is
//! the job of the [`FlowRunner`][crate::runner::FlowRunner].
//!
//! | Algorithm                   | Search                           | Optimal |
//! |-----------------------------|----------------------------------|---------|
//! | [`Algorithm::Greedy`]       | DFS, widest arc first            | no      |
//! | [`Algorithm::FordFulkerson`]| DFS, arcs in insertion order     | no      |
//! | [`Algorithm::EdmondsKarp`]  | BFS, shortest path in arc count  | yes*    |
//!
//! (*) Only on networks that need no flow cancellation. The residual
//! graph has no reverse arcs (see [`crate::residual`]), so even the BFS
//! may stop below the maximum.

pub mod edmondskarp;
pub mod fordfulkerson;
pub mod greedy;

use crate::network::NodeId;
use crate::num::traits::NumAssign;
use crate::residual::ResidualGraph;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A path from source to sink with the amount of flow sent along it.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Route<F> {
    /// The nodes of the path, source and sink included.
    pub path: Vec<NodeId>,
    /// The bottleneck of the path.
    pub flow: F,
}

impl<F> Route<F> {
    /// Iterate over the arcs `(u,v)` of the path.
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.path.windows(2).map(|uv| (uv[0], uv[1]))
    }
}

/// The available path finding strategies.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Algorithm {
    /// Depth-first search preferring the arc with largest residual.
    Greedy,
    /// Depth-first search (Ford-Fulkerson).
    FordFulkerson,
    /// Breadth-first search (Edmonds-Karp).
    EdmondsKarp,
}

impl Algorithm {
    /// All algorithms.
    pub const ALL: [Algorithm; 3] = [Algorithm::Greedy, Algorithm::FordFulkerson, Algorithm::EdmondsKarp];

    /// Search one augmenting path from `src` to `snk`.
    ///
    /// Returns `None` if there is no path with positive residual capacity.
    pub fn find_path<F>(self, g: &ResidualGraph<F>, src: NodeId, snk: NodeId) -> Option<Route<F>>
    where
        F: NumAssign + Ord + Copy,
    {
        match self {
            Algorithm::Greedy => greedy::find_path(g, src, snk),
            Algorithm::FordFulkerson => fordfulkerson::find_path(g, src, snk),
            Algorithm::EdmondsKarp => edmondskarp::find_path(g, src, snk),
        }
    }

    /// Return `true` if iterating the search yields a maximum flow.
    ///
    /// This holds for Edmonds-Karp on networks whose maximum flow can be
    /// found without cancelling flow. Since no reverse arcs are opened,
    /// the run may end below the maximum otherwise, which the min-cut
    /// analysis reports as unverified.
    pub fn is_optimal(self) -> bool {
        self == Algorithm::EdmondsKarp
    }

    /// A short description of the search strategy.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Greedy => "selects the path with largest available capacity in each step",
            Algorithm::FordFulkerson => "uses depth-first search to find augmenting paths",
            Algorithm::EdmondsKarp => "uses breadth-first search to find augmenting paths (optimal)",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Algorithm::Greedy => "GREEDY",
            Algorithm::FordFulkerson => "FORD_FULKERSON_DFS",
            Algorithm::EdmondsKarp => "EDMONDS_KARP_BFS",
        })
    }
}

/// Error when parsing an algorithm name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Algorithm::Greedy),
            "ford_fulkerson_dfs" | "fordfulkerson" | "dfs" => Ok(Algorithm::FordFulkerson),
            "edmonds_karp_bfs" | "edmondskarp" | "bfs" => Ok(Algorithm::EdmondsKarp),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
