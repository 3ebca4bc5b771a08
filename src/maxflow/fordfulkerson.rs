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

//! Depth-first path search of Ford-Fulkerson.
//!
//! The outgoing arcs of each node are tried in insertion order. A node
//! is blocked only while it is on the current path, after backtracking
//! it may be entered again via another branch.
//!
//! # Example
//!
//! ```
//! use rs_flownet::maxflow::fordfulkerson;
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
//! let route = fordfulkerson::find_path(&g, 1, 4).unwrap();
//! assert_eq!(route.path, vec![1, 2, 4]);
//! assert_eq!(route.flow, 3);
//! ```

use crate::maxflow::Route;
use crate::network::NodeId;
use crate::num::traits::NumAssign;
use crate::residual::ResidualGraph;

/// Find an augmenting path from `src` to `snk` by depth-first search.
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

    let mut onpath = vec![false; g.num_nodes()];
    // each entry is a node of the current path and the position of
    // the next arc to be tried
    let mut stack = vec![(s, 0)];
    onpath[s] = true;

    loop {
        let (u, pos) = stack.last_mut()?;
        let arcs = g.all_arcs(*u);
        let mut next = None;
        while *pos < arcs.len() {
            let (v, cap) = arcs[*pos];
            *pos += 1;
            if cap > F::zero() && !onpath[v] {
                next = Some(v);
                break;
            }
        }

        match next {
            Some(v) if v == t => {
                let mut path: Vec<usize> = stack.iter().map(|&(u, _)| u).collect();
                path.push(t);
                return Some(Route {
                    flow: g.bottleneck(&path),
                    path: g.path_ids(&path),
                });
            }
            Some(v) => {
                onpath[v] = true;
                stack.push((v, 0));
            }
            None => {
                let u = *u;
                onpath[u] = false;
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::find_path;
    use crate::network::Network;
    use crate::residual::ResidualGraph;

    fn network(nnodes: u32, edges: &[(u32, u32, i64)]) -> Network<i64> {
        let mut net = Network::new();
        for id in 1..=nnodes {
            net.add_node(id).unwrap();
        }
        for &(u, v, c) in edges {
            net.add_edge(u, v, c).unwrap();
        }
        net
    }

    #[test]
    fn test_insertion_order() {
        let net = network(4, &[(1, 3, 1), (1, 2, 9), (3, 4, 1), (2, 4, 9)]);
        let g = ResidualGraph::build(&net);
        let route = find_path(&g, 1, 4).unwrap();
        assert_eq!(route.path, vec![1, 3, 4]);
        assert_eq!(route.flow, 1);
    }

    #[test]
    fn test_backtracking() {
        // from 3 the only arc leads back to 2 which is on the path
        let net = network(4, &[(1, 2, 5), (1, 3, 7), (2, 3, 6), (3, 2, 2), (2, 4, 4)]);
        let g = ResidualGraph::build(&net);
        let route = find_path(&g, 1, 4).unwrap();
        assert_eq!(route.path, vec![1, 2, 4]);
        assert_eq!(route.flow, 4);

        let net = network(4, &[(1, 2, 5), (2, 3, 6), (1, 3, 7), (3, 4, 3)]);
        let g = ResidualGraph::build(&net);
        let route = find_path(&g, 1, 4).unwrap();
        assert_eq!(route.path, vec![1, 2, 3, 4]);
        assert_eq!(route.flow, 3);
    }

    #[test]
    fn test_exhausted_arcs_are_skipped() {
        let net = network(3, &[(1, 2, 2), (2, 3, 2), (1, 3, 1)]);
        let mut g = ResidualGraph::build(&net);
        g.reduce(2, 3, 2).unwrap();
        let route = find_path(&g, 1, 3).unwrap();
        assert_eq!(route.path, vec![1, 3]);
        assert_eq!(route.flow, 1);

        g.reduce(1, 3, 1).unwrap();
        assert_eq!(find_path(&g, 1, 3), None);
    }
}
