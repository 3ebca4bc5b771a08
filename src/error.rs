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

//! Errors reported by the flow network core.

use crate::network::NodeId;

use thiserror::Error;

/// The network cannot be used to start a run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no source node has been defined")]
    MissingSource,
    #[error("no sink node has been defined")]
    MissingSink,
    #[error("node {0} is both source and sink")]
    SourceIsSink(NodeId),
    #[error("terminal node {0} does not exist")]
    UnknownNode(NodeId),
}

/// An editing operation would break the structure of the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    #[error("node ids must be positive, got {0}")]
    InvalidId(NodeId),
    #[error("a node with id {0} already exists")]
    DuplicateNode(NodeId),
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("arcs must connect two different nodes, got a loop at {0}")]
    Loop(NodeId),
    #[error("there is already an arc from {0} to {1}")]
    ParallelArc(NodeId, NodeId),
    #[error("there is no arc from {0} to {1}")]
    UnknownArc(NodeId, NodeId),
    #[error("the capacity of arc ({0}, {1}) must be positive")]
    NonPositiveCapacity(NodeId, NodeId),
}

/// Error of the flow network core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Source or sink are missing or invalid.
    #[error("invalid network configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// The network could not be modified.
    #[error("invalid network modification: {0}")]
    Edit(#[from] EditError),
    /// The residual capacity of an arc would become negative.
    ///
    /// This is never caused by user input but by a broken augmentation.
    #[error("residual capacity of arc ({tail}, {head}) would become negative")]
    InvariantViolation { tail: NodeId, head: NodeId },
    /// The total flow does not fit into the capacity type.
    #[error("total flow exceeds the range of the capacity type")]
    Overflow,
    /// An analysis has been requested without a completed run.
    #[error("no completed run available, run the algorithm first")]
    Analysis,
}

pub type Result<T> = std::result::Result<T, Error>;
