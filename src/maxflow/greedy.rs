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

//! Greedy widest-arc-first path search.
//!
//! The search is a depth-first search that, at each node, first follows
//! the arc with the largest residual capacity. Ties are broken by the
//! insertion order of the arcs. A node that has been visited once in a
//! search is never entered again, even after backtracking.
//!
//! The first path found is returned. It is *not* necessarily the path
//! with the largest bottleneck, and repeating the search does not
//! necessarily produce a maximum flow.
//!
//! # Example
//!
//! ```
//! use rs_flownet::maxflow::greedy;
//! use rs_flownet::network::Network;
//! use rs_flownet::residual::ResidualGraph;
//!
//! let mut net = Network::<u32>::new();
//! for id in 1..=4 {
//!     net.add_node(id).unwrap();
//! }
//! net.add_edge(1, 2, 3).unwrap();
//! net.add_edge(1, 3, 8).unwrap();
//! net.add_edge(2, 4, 9).unwrap();
//! net.add_edge(3, 4, 2).unwrap();
//!
//! let g = ResidualGraph::build(&net);
//! let route = greedy::find_path(&g, 1, 4).unwrap();
//! assert_eq!(route.path, vec![1, 3, 4]);
//! assert_eq!(route.flow, 2);
//! ```

use crate::maxflow::Route;
use crate::network::NodeId;
use crate::num::traits::NumAssign;
use crate::residual::ResidualGraph;

/// Return the candidate arcs of `u` in reverse visiting order.
///
/// The last element is the widest arc to an unvisited node, so the
/// candidates can be consumed with `pop`.
fn candidates<F>(g: &ResidualGraph<F>, u: usize, seen: &[bool]) -> Vec<(usize, F)>
where
    F: NumAssign + Ord + Copy,
{
    let mut cands: Vec<_> = g.arcs(u).filter(|&(v, _)| !seen[v]).collect();
    // stable, so equal capacities keep the insertion order
    cands.sort_by(|a, b| b.1.cmp(&a.1));
    cands.reverse();
    cands
}

/// Find an augmenting path from `src` to `snk` greedily.
///
/// Returns `None` if the sink cannot be reached, if one of the nodes
/// does not exist or if `src == snk`.
pub fn find_path<F>(g: &ResidualGraph<F>, src: NodeId, snk: NodeId) -> Option<Route<F>>
where
    F: NumAssign + Ord + Copy,
{
    let s = g.node_index(src)?;
    let t = g.node_index(snk)?;
    if s == t {
        return None;
    }

    let mut seen = vec![false; g.num_nodes()];
    seen[s] = true;
    let mut stack = vec![(s, candidates(g, s, &seen))];

    loop {
        let next = stack.last_mut()?.1.pop();
        match next {
            Some((v, _)) if v == t => {
                let mut path: Vec<usize> = stack.iter().map(|&(u, _)| u).collect();
                path.push(t);
                return Some(Route {
                    flow: g.bottleneck(&path),
                    path: g.path_ids(&path),
                });
            }
            // v has been completely explored by an earlier branch
            Some((v, _)) if seen[v] => {}
            Some((v, _)) => {
                seen[v] = true;
                let cands = candidates(g, v, &seen);
                stack.push((v, cands));
            }
            None => {
                stack.pop();
            }
        }
    }
}
