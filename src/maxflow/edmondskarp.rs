/*
 * Copyright (c) 2017-2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements the path search of Edmonds-Karp.
//!
//! The search is a breadth-first search from the source, hence the
//! path found has the minimal number of arcs among all augmenting
//! paths. Neighbors are enqueued in the insertion order of the arcs.
//!
//! # Example
//!
//! ```
//! use rs_flownet::maxflow::edmondskarp;
//! use rs_flownet::network::Network;
//! use rs_flownet::residual::ResidualGraph;
//!
//! let mut net = Network::<u32>::new();
//! for id in 1..=4 {
//!     net.add_node(id).unwrap();
//! }
//! net.add_edge(1, 2, 10).unwrap();
//! net.add_edge(1, 3, 5).unwrap();
//! net.add_edge(2, 4, 5).unwrap();
//! net.add_edge(3, 4, 10).unwrap();
//! net.add_edge(2, 3, 3).unwrap();
//!
//! let mut g = ResidualGraph::build(&net);
//! let route = edmondskarp::find_path(&g, 1, 4).unwrap();
//! assert_eq!(route.path, vec![1, 2, 4]);
//! assert_eq!(route.flow, 5);
//!
//! for (u, v) in route.arcs() {
//!     g.reduce(u, v, route.flow).unwrap();
//! }
//! let route = edmondskarp::find_path(&g, 1, 4).unwrap();
//! assert_eq!(route.path, vec![1, 3, 4]);
//! assert_eq!(route.flow, 5);
//! ```

use crate::maxflow::Route;
use crate::network::NodeId;
use crate::num::traits::NumAssign;
use crate::residual::ResidualGraph;

use std::collections::VecDeque;

/// Find a shortest augmenting path from `src` to `snk`.
///
/// Returns `None` if the sink cannot be reached, if one of the nodes
/// does not exist or if `src == snk`.
pub fn find_path<F>(g: &ResidualGraph<F>, src: NodeId, snk: NodeId) -> Option<Route<F>>
where
    F: NumAssign + Ord + Copy,
{
    let src = g.node_index(src)?;
    let snk = g.node_index(snk)?;
    if src == snk {
        return None;
    }

    // pred[v] is the predecessor of v in the bfs tree
    let mut pred = vec![usize::max_value(); g.num_nodes()];
    let mut queue = VecDeque::with_capacity(g.num_nodes());
    pred[src] = src;
    queue.push_back(src);
    'bfs: while let Some(u) = queue.pop_front() {
        for (v, _) in g.arcs(u) {
            if pred[v] == usize::max_value() {
                pred[v] = u;
                queue.push_back(v);
                if v == snk {
                    break 'bfs;
                }
            }
        }
    }

    // sink cannot be reached
    if pred[snk] == usize::max_value() {
        return None;
    }

    let mut path = vec![snk];
    let mut v = snk;
    while v != src {
        v = pred[v];
        path.push(v);
    }
    path.reverse();

    let df = g.bottleneck(&path);
    debug_assert!(!df.is_zero());

    Some(Route {
        flow: df,
        path: g.path_ids(&path),
    })
}
