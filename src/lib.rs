// Copyright (c) 2015-2024 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Maximum flows by augmenting paths.
//!
//! A [`Network`] is handed over by an editor, a [`FlowRunner`] repeatedly
//! searches augmenting paths with one of three [`Algorithm`]s and pushes
//! flow along them until no path is left. The result can be checked with
//! a minimal cut analysis and the network can be inspected as incidence
//! matrix.
//!
//! The residual model only reduces the capacity of the forward arcs,
//! flow is never cancelled along reverse arcs. See [`residual`].
//!
//! # Example
//!
//! ```
//! use rs_flownet::{maxflow, Algorithm, Network};
//!
//! let mut net = Network::<u32>::new();
//! net.add_node(1).unwrap();
//! net.add_node(2).unwrap();
//! net.add_edge(1, 2, 7).unwrap();
//! net.set_source(1).unwrap();
//! net.set_sink(2).unwrap();
//!
//! for &alg in &Algorithm::ALL {
//!     let result = maxflow(&mut net, alg).unwrap();
//!     assert_eq!(result.value(), 7);
//!     assert_eq!(result.routes()[0].path, vec![1, 2]);
//!
//!     let cut = result.min_cut(&net);
//!     assert_eq!(cut.capacity(), 7);
//!     assert!(cut.is_verified());
//! }
//! ```

mod num {
    pub use num_traits as traits;
}

pub mod error;
pub use self::error::{ConfigError, EditError, Error, Result};

// # Data structures

pub mod network;
pub use self::network::{Network, NodeId, Role};

pub mod residual;
pub use self::residual::ResidualGraph;

// # Algorithms

pub mod maxflow;
pub use self::maxflow::{Algorithm, Route};

pub mod runner;
pub use self::runner::{maxflow, FlowResult, FlowRunner, RunState, StepEvent};

// # Analysis

pub mod incidence;
pub use self::incidence::{incidence_matrix, IncidenceMatrix};

pub mod mincut;
pub use self::mincut::MinCut;
