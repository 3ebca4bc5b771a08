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

//! The flow network model.
//!
//! A [`Network`] is a directed graph whose nodes carry an identity
//! chosen by the editor and a display label, and whose arcs carry a
//! capacity and the flow of the latest run. At most one arc may exist
//! for each ordered pair of nodes, but an arc `(u,v)` and its opposite
//! `(v,u)` may coexist.
//!
//! Nodes and arcs are enumerated in insertion order, which is also the
//! order in which the path finders visit the neighbors of a node.
//!
//! # Example
//!
//! ```
//! use rs_flownet::network::{Network, Role};
//!
//! let mut net = Network::<u32>::new();
//! net.add_node(1).unwrap();
//! net.add_node_with_label(2, "t").unwrap();
//! net.add_edge(1, 2, 7).unwrap();
//! net.set_source(1).unwrap();
//! net.set_sink(2).unwrap();
//!
//! assert_eq!(net.role(1), Some(Role::Source));
//! assert_eq!(net.label(2), "t");
//! assert_eq!(net.edge(1, 2).map(|e| e.residual()), Some(7));
//! assert_eq!(net.terminals().unwrap(), (1, 2));
//! ```

use crate::error::{ConfigError, EditError, Error, Result};
use crate::num::traits::NumAssign;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Identity of a node, assigned by the editor.
///
/// Valid ids are positive, `0` is rejected by [`Network::add_node`].
pub type NodeId = u32;

/// The role of a node in the network.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Role {
    Source,
    Sink,
    Transshipment,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Role::Source => "Source",
            Role::Sink => "Sink",
            Role::Transshipment => "Transshipment",
        })
    }
}

/// A node of the network.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    id: NodeId,
    label: String,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// An arc of the network.
///
/// The residual capacity is not stored but always derived from
/// capacity and flow.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Edge<F> {
    tail: NodeId,
    head: NodeId,
    capacity: F,
    flow: F,
}

impl<F> Edge<F>
where
    F: NumAssign + Ord + Copy,
{
    /// The start node of the arc.
    pub fn tail(&self) -> NodeId {
        self.tail
    }

    /// The end node of the arc.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Both end nodes as `(tail, head)`.
    pub fn enodes(&self) -> (NodeId, NodeId) {
        (self.tail, self.head)
    }

    pub fn capacity(&self) -> F {
        self.capacity
    }

    /// The flow assigned by the latest run.
    pub fn flow(&self) -> F {
        self.flow
    }

    /// The remaining capacity `capacity - flow`.
    pub fn residual(&self) -> F {
        self.capacity - self.flow
    }
}

/// A flow network with designated source and sink.
///
/// Nodes and arcs are stored in insertion order, both are indexed by
/// their ids for constant time lookup.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Network<F> {
    nodes: Vec<Node>,
    edges: Vec<Edge<F>>,
    node_index: HashMap<NodeId, usize>,
    /// Position of the arc `(u,v)` at `edge_index[u][v]`.
    edge_index: HashMap<NodeId, HashMap<NodeId, usize>>,
    source: Option<NodeId>,
    sink: Option<NodeId>,
}

impl<F> Default for Network<F> {
    fn default() -> Self {
        Network {
            nodes: vec![],
            edges: vec![],
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            source: None,
            sink: None,
        }
    }
}

impl<F> Network<F>
where
    F: NumAssign + Ord + Copy,
{
    /// Create a new, empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of arcs.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add a node labelled with its id.
    pub fn add_node(&mut self, id: NodeId) -> Result<()> {
        self.add_node_with_label(id, id.to_string())
    }

    /// Add a node with a display label.
    ///
    /// Labels need not be unique, ids must be positive.
    pub fn add_node_with_label<S>(&mut self, id: NodeId, label: S) -> Result<()>
    where
        S: Into<String>,
    {
        if id == 0 {
            return Err(EditError::InvalidId(id).into());
        }
        if self.node(id).is_some() {
            return Err(EditError::DuplicateNode(id).into());
        }
        self.node_index.insert(id, self.nodes.len());
        self.nodes.push(Node {
            id,
            label: label.into(),
        });
        Ok(())
    }

    /// Change the label of a node.
    pub fn rename_node<S>(&mut self, id: NodeId, label: S) -> Result<()>
    where
        S: Into<String>,
    {
        let pos = self.node_pos(id).ok_or(EditError::UnknownNode(id))?;
        self.nodes[pos].label = label.into();
        Ok(())
    }

    /// Remove a node together with all incident arcs.
    ///
    /// If the node was the source or the sink, that role becomes unset.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let pos = self.node_pos(id).ok_or(EditError::UnknownNode(id))?;
        self.nodes.remove(pos);
        self.edges.retain(|e| e.tail != id && e.head != id);
        self.reindex();
        if self.source == Some(id) {
            self.source = None;
        }
        if self.sink == Some(id) {
            self.sink = None;
        }
        Ok(())
    }

    /// Add the arc `(u,v)` with the given capacity and zero flow.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, capacity: F) -> Result<()> {
        if self.node(u).is_none() {
            return Err(EditError::UnknownNode(u).into());
        }
        if self.node(v).is_none() {
            return Err(EditError::UnknownNode(v).into());
        }
        if u == v {
            return Err(EditError::Loop(u).into());
        }
        if self.edge(u, v).is_some() {
            return Err(EditError::ParallelArc(u, v).into());
        }
        if capacity <= F::zero() {
            return Err(EditError::NonPositiveCapacity(u, v).into());
        }
        self.edge_index
            .entry(u)
            .or_insert_with(HashMap::new)
            .insert(v, self.edges.len());
        self.edges.push(Edge {
            tail: u,
            head: v,
            capacity,
            flow: F::zero(),
        });
        Ok(())
    }

    /// Remove the arc `(u,v)`.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<()> {
        let pos = self.edge_pos(u, v).ok_or(EditError::UnknownArc(u, v))?;
        self.edges.remove(pos);
        self.reindex();
        Ok(())
    }

    /// Change the capacity of the arc `(u,v)`.
    ///
    /// The flow of the arc is reset to zero.
    pub fn set_capacity(&mut self, u: NodeId, v: NodeId, capacity: F) -> Result<()> {
        if capacity <= F::zero() {
            return Err(EditError::NonPositiveCapacity(u, v).into());
        }
        let pos = self.edge_pos(u, v).ok_or(EditError::UnknownArc(u, v))?;
        let edge = &mut self.edges[pos];
        edge.capacity = capacity;
        edge.flow = F::zero();
        Ok(())
    }

    /// Make `id` the source node, replacing the previous one.
    pub fn set_source(&mut self, id: NodeId) -> Result<()> {
        if self.node(id).is_none() {
            return Err(EditError::UnknownNode(id).into());
        }
        self.source = Some(id);
        Ok(())
    }

    /// Make `id` the sink node, replacing the previous one.
    pub fn set_sink(&mut self, id: NodeId) -> Result<()> {
        if self.node(id).is_none() {
            return Err(EditError::UnknownNode(id).into());
        }
        self.sink = Some(id);
        Ok(())
    }

    /// Unset source and sink.
    pub fn clear_terminals(&mut self) {
        self.source = None;
        self.sink = None;
    }

    /// Remove all nodes and arcs.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_index.clear();
        self.clear_terminals();
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn sink(&self) -> Option<NodeId> {
        self.sink
    }

    /// Return the role of a node, or `None` if it does not exist.
    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.node(id)?;
        Some(if self.source == Some(id) {
            Role::Source
        } else if self.sink == Some(id) {
            Role::Sink
        } else {
            Role::Transshipment
        })
    }

    /// Return the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_pos(id).map(|pos| &self.nodes[pos])
    }

    /// Return the arc `(u,v)`.
    pub fn edge(&self, u: NodeId, v: NodeId) -> Option<&Edge<F>> {
        self.edge_pos(u, v).map(|pos| &self.edges[pos])
    }

    /// Return the display label of a node.
    ///
    /// Falls back to the numeric id for unknown nodes or empty labels.
    pub fn label(&self, id: NodeId) -> Cow<str> {
        match self.node(id) {
            Some(node) if !node.label.is_empty() => Cow::Borrowed(&node.label),
            _ => Cow::Owned(id.to_string()),
        }
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Iterate over all arcs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<F>> + '_ {
        self.edges.iter()
    }

    /// Iterate over the outgoing arcs of `u` in insertion order.
    pub fn outedges(&self, u: NodeId) -> impl Iterator<Item = &Edge<F>> + '_ {
        self.edges.iter().filter(move |e| e.tail == u)
    }

    /// Iterate over the incoming arcs of `u` in insertion order.
    pub fn inedges(&self, u: NodeId) -> impl Iterator<Item = &Edge<F>> + '_ {
        self.edges.iter().filter(move |e| e.head == u)
    }

    /// Return all node ids in ascending order.
    pub fn sorted_node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.nodes.iter().map(|n| n.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Return all arcs ordered by `(tail, head)`.
    pub fn sorted_edges(&self) -> Vec<&Edge<F>> {
        let mut edges: Vec<_> = self.edges.iter().collect();
        edges.sort_by_key(|e| e.enodes());
        edges
    }

    /// Set the flow of every arc to zero.
    pub fn reset(&mut self) {
        for e in &mut self.edges {
            e.flow = F::zero();
        }
    }

    /// The net amount of flow leaving the source.
    ///
    /// This is zero if no source is set.
    pub fn flow_value(&self) -> F {
        let src = match self.source {
            Some(src) => src,
            None => return F::zero(),
        };
        let outflow = self.outedges(src).fold(F::zero(), |acc, e| acc + e.flow);
        let inflow = self.inedges(src).fold(F::zero(), |acc, e| acc + e.flow);
        if outflow >= inflow {
            outflow - inflow
        } else {
            F::zero()
        }
    }

    /// Return `(source, sink)` if the network is runnable.
    pub fn terminals(&self) -> Result<(NodeId, NodeId)> {
        let src = self.source.ok_or(ConfigError::MissingSource)?;
        let snk = self.sink.ok_or(ConfigError::MissingSink)?;
        if src == snk {
            return Err(ConfigError::SourceIsSink(src).into());
        }
        for &id in &[src, snk] {
            if self.node(id).is_none() {
                return Err(ConfigError::UnknownNode(id).into());
            }
        }
        Ok((src, snk))
    }

    /// Add `amount` to the flow of the arc `(u,v)`.
    ///
    /// Fails if the arc does not exist or its capacity would be exceeded.
    pub(crate) fn push_flow(&mut self, u: NodeId, v: NodeId, amount: F) -> Result<()> {
        let violation = Error::InvariantViolation { tail: u, head: v };
        let pos = self.edge_pos(u, v).ok_or(violation)?;
        let edge = &mut self.edges[pos];
        if amount > edge.capacity - edge.flow {
            return Err(violation);
        }
        edge.flow += amount;
        Ok(())
    }

    fn node_pos(&self, id: NodeId) -> Option<usize> {
        self.node_index.get(&id).cloned()
    }

    fn edge_pos(&self, u: NodeId, v: NodeId) -> Option<usize> {
        self.edge_index.get(&u).and_then(|heads| heads.get(&v)).cloned()
    }

    /// Rebuild both indices after nodes or arcs have been removed.
    fn reindex(&mut self) {
        self.node_index = self.nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        self.edge_index.clear();
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.entry(e.tail).or_insert_with(HashMap::new).insert(e.head, i);
        }
    }
}
