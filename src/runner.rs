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

//! Repeated augmentation until no augmenting path is left.
//!
//! A [`FlowRunner`] drives one of the path search [`Algorithm`]s on a
//! [`Network`]. It is a small state machine:
//!
//! - `Idle`: nothing has been computed, yet,
//! - `Running`: the flow of the network has been reset and augmenting
//!   paths are being searched,
//! - `Finished`: no further path exists (or the run has been stopped),
//!   the [`FlowResult`] is frozen.
//!
//! The run can be driven step by step with [`FlowRunner::step`] (or the
//! iterator returned by [`FlowRunner::steps`]), which leaves any pacing
//! to the caller, or completely with [`FlowRunner::run`], which reports
//! each step to an observer.
//!
//! # Example
//!
//! ```
//! use rs_flownet::maxflow::Algorithm;
//! use rs_flownet::network::Network;
//! use rs_flownet::runner::FlowRunner;
//! use std::ops::ControlFlow;
//!
//! let mut net = Network::<u32>::new();
//! for id in 1..=4 {
//!     net.add_node(id).unwrap();
//! }
//! net.add_edge(1, 2, 10).unwrap();
//! net.add_edge(1, 3, 5).unwrap();
//! net.add_edge(2, 4, 5).unwrap();
//! net.add_edge(3, 4, 10).unwrap();
//! net.set_source(1).unwrap();
//! net.set_sink(4).unwrap();
//!
//! let mut runner = FlowRunner::new(&mut net, Algorithm::EdmondsKarp);
//! let mut steps = vec![];
//! let result = runner
//!     .run(|step| {
//!         steps.push(step.total);
//!         ControlFlow::Continue(())
//!     })
//!     .unwrap();
//! assert_eq!(result.value(), 10);
//! assert_eq!(steps, vec![5, 10]);
//!
//! let mincut = runner.min_cut().unwrap();
//! assert!(mincut.is_verified());
//! assert_eq!(net.edge(1, 2).unwrap().flow(), 5);
//! ```

use crate::error::{Error, Result};
use crate::maxflow::{Algorithm, Route};
use crate::mincut::{self, MinCut};
use crate::network::{Network, NodeId};
use crate::num::traits::{CheckedAdd, NumAssign};
use crate::residual::ResidualGraph;

use log::{debug, error, info, warn};

use std::fmt;
use std::ops::ControlFlow;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// State of a [`FlowRunner`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Idle,
    Running,
    Finished,
}

/// A single augmentation of a run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StepEvent<F> {
    /// The number of the step, starting at 1.
    pub step: usize,
    /// The augmenting path and its bottleneck.
    pub route: Route<F>,
    /// The total flow after this step.
    pub total: F,
}

/// The result of a run.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlowResult<F> {
    algorithm: Algorithm,
    source: NodeId,
    sink: NodeId,
    routes: Vec<Route<F>>,
    value: F,
    residual: ResidualGraph<F>,
    complete: bool,
}

impl<F> FlowResult<F>
where
    F: NumAssign + Ord + Copy,
{
    /// The algorithm used to compute the flow.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// The augmenting paths in the order they have been found.
    pub fn routes(&self) -> &[Route<F>] {
        &self.routes
    }

    /// The total flow value.
    pub fn value(&self) -> F {
        self.value
    }

    /// The residual capacities at the end of the run.
    pub fn residual(&self) -> &ResidualGraph<F> {
        &self.residual
    }

    /// Return `false` if the run has been stopped before all augmenting
    /// paths had been found.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Compute the minimal cut of the final residual graph.
    pub fn min_cut(&self, network: &Network<F>) -> MinCut<F> {
        mincut::analyze(network, &self.residual, self.source, self.value)
    }

    /// Return the routes with node labels instead of node ids.
    pub fn routes_with_labels(&self, network: &Network<F>) -> Vec<(Vec<String>, F)> {
        self.routes
            .iter()
            .map(|r| (r.path.iter().map(|&u| network.label(u).into_owned()).collect(), r.flow))
            .collect()
    }

    /// Return an object that prints the route log using node labels.
    pub fn display<'b>(&'b self, network: &'b Network<F>) -> DisplayResult<'b, F> {
        DisplayResult { result: self, network }
    }
}

/// Printable route log, see [`FlowResult::display`].
pub struct DisplayResult<'b, F> {
    result: &'b FlowResult<F>,
    network: &'b Network<F>,
}

impl<'b, F> fmt::Display for DisplayResult<'b, F>
where
    F: NumAssign + Ord + Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Results of {}", self.result.algorithm)?;
        for (i, (labels, flow)) in self.result.routes_with_labels(self.network).into_iter().enumerate() {
            writeln!(f, "Route {}: {} = {}", i + 1, labels.join(" → "), flow)?;
        }
        writeln!(f, "{}", "-".repeat(40))?;
        write!(f, "Total maximum flow: {}", self.result.value)?;
        if !self.result.complete {
            write!(f, " (stopped)")?;
        }
        Ok(())
    }
}

enum State<F> {
    Idle,
    Running(FlowResult<F>),
    Finished(FlowResult<F>),
}

/// Runs an augmenting path algorithm on a network.
///
/// The runner borrows the network mutably for its whole lifetime: the
/// flows of the arcs are reset at the start of a run and updated with
/// each augmentation, so the network must not be edited meanwhile.
///
/// The total flow must fit into `F`. A step whose augmentation would
/// exceed the range of `F` fails with [`Error::Overflow`] before any
/// flow is pushed.
pub struct FlowRunner<'a, F> {
    network: &'a mut Network<F>,
    algorithm: Algorithm,
    state: State<F>,
}

impl<'a, F> FlowRunner<'a, F>
where
    F: NumAssign + Ord + Copy + CheckedAdd + fmt::Debug,
{
    /// Create an idle runner.
    pub fn new(network: &'a mut Network<F>, algorithm: Algorithm) -> Self {
        FlowRunner {
            network,
            algorithm,
            state: State::Idle,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Return the underlying network.
    pub fn network(&self) -> &Network<F> {
        &*self.network
    }

    pub fn state(&self) -> RunState {
        match self.state {
            State::Idle => RunState::Idle,
            State::Running(_) => RunState::Running,
            State::Finished(_) => RunState::Finished,
        }
    }

    /// The result of the run, available once it is finished.
    pub fn result(&self) -> Option<&FlowResult<F>> {
        match &self.state {
            State::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Consume the runner and return the result of a finished run.
    pub fn into_result(self) -> Option<FlowResult<F>> {
        match self.state {
            State::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Start a new run.
    ///
    /// Any previous result is dropped. If the network has no valid
    /// source and sink, the runner stays idle and a configuration
    /// error is returned. Otherwise the flow of the network is reset to
    /// zero and the runner is running.
    pub fn start(&mut self) -> Result<()> {
        self.state = State::Idle;
        let (src, snk) = self.network.terminals()?;

        info!(
            "Start {} from {} to {} ({} nodes, {} arcs)",
            self.algorithm,
            src,
            snk,
            self.network.num_nodes(),
            self.network.num_edges()
        );

        self.network.reset();
        self.state = State::Running(FlowResult {
            algorithm: self.algorithm,
            source: src,
            sink: snk,
            routes: vec![],
            value: F::zero(),
            residual: ResidualGraph::build(&*self.network),
            complete: true,
        });
        Ok(())
    }

    /// Perform one augmentation.
    ///
    /// An idle runner is started first. Returns the step performed or
    /// `None` if the run is finished. An invariant violation or an
    /// overflow of the total flow finishes the run with the routes found
    /// so far and is returned as error. The failed augmentation leaves
    /// the network and the residual graph untouched.
    pub fn step(&mut self) -> Result<Option<StepEvent<F>>> {
        if let State::Idle = self.state {
            self.start()?;
        }

        let run = match &mut self.state {
            State::Running(run) => run,
            _ => return Ok(None),
        };

        let route = match self.algorithm.find_path(&run.residual, run.source, run.sink) {
            Some(route) if route.flow > F::zero() => route,
            _ => {
                self.finish();
                return Ok(None);
            }
        };

        let augmented = match run.value.checked_add(&route.flow) {
            Some(total) => augment(&mut *self.network, &mut run.residual, &route).map(|_| total),
            None => Err(Error::Overflow),
        };
        let total = match augmented {
            Ok(total) => total,
            Err(err) => {
                error!("Augmentation along {:?} failed: {}", route.path, err);
                run.complete = false;
                self.finish();
                return Err(err);
            }
        };

        run.value = total;
        run.routes.push(route.clone());
        let event = StepEvent {
            step: run.routes.len(),
            route,
            total: run.value,
        };
        debug!(
            "Step {}: path {:?}, flow {:?}, total {:?}",
            event.step, event.route.path, event.route.flow, event.total
        );
        Ok(Some(event))
    }

    /// Iterate over the remaining steps of the run.
    pub fn steps(&mut self) -> Steps<'_, 'a, F> {
        Steps { runner: self }
    }

    /// Run to completion, reporting each step to `observer`.
    ///
    /// The observer may stop the run by returning `ControlFlow::Break`;
    /// the run is then finished with the routes found so far. If the
    /// runner is already finished, its result is returned unchanged.
    pub fn run<O>(&mut self, mut observer: O) -> Result<&FlowResult<F>>
    where
        O: FnMut(&StepEvent<F>) -> ControlFlow<()>,
    {
        while let Some(event) = self.step()? {
            if observer(&event).is_break() {
                warn!("Run of {} stopped after step {}", self.algorithm, event.step);
                if let State::Running(run) = &mut self.state {
                    run.complete = false;
                }
                self.finish();
                break;
            }
        }
        self.result().ok_or(Error::Analysis)
    }

    /// Run to completion without observer.
    pub fn run_to_end(&mut self) -> Result<&FlowResult<F>> {
        self.run(|_| ControlFlow::Continue(()))
    }

    /// Compute the minimal cut of the finished run.
    ///
    /// Fails with [`Error::Analysis`] if no run has been completed.
    pub fn min_cut(&self) -> Result<MinCut<F>> {
        self.result()
            .map(|result| result.min_cut(&*self.network))
            .ok_or(Error::Analysis)
    }

    /// Drop any result and return to the idle state.
    ///
    /// The flow on the network is kept.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    fn finish(&mut self) {
        self.state = match std::mem::replace(&mut self.state, State::Idle) {
            State::Running(run) => {
                info!(
                    "Finished {} with {} routes, total flow {:?}",
                    run.algorithm,
                    run.routes.len(),
                    run.value
                );
                State::Finished(run)
            }
            state => state,
        };
    }
}

/// Push the bottleneck of `route` along all its arcs.
///
/// All arcs are checked first, nothing is changed if one of them cannot
/// carry the flow in the network or in the residual graph.
fn augment<F>(network: &mut Network<F>, residual: &mut ResidualGraph<F>, route: &Route<F>) -> Result<()>
where
    F: NumAssign + Ord + Copy,
{
    for (u, v) in route.arcs() {
        let fits = network.edge(u, v).map_or(false, |e| route.flow <= e.residual());
        if !fits || route.flow > residual.capacity_of(u, v) {
            return Err(Error::InvariantViolation { tail: u, head: v });
        }
    }
    for (u, v) in route.arcs() {
        residual.reduce(u, v, route.flow)?;
        network.push_flow(u, v, route.flow)?;
    }
    Ok(())
}

/// Iterator over the steps of a run, see [`FlowRunner::steps`].
pub struct Steps<'r, 'a, F> {
    runner: &'r mut FlowRunner<'a, F>,
}

impl<'r, 'a, F> Iterator for Steps<'r, 'a, F>
where
    F: NumAssign + Ord + Copy + CheckedAdd + fmt::Debug,
{
    type Item = Result<StepEvent<F>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runner.step().transpose()
    }
}

/// Compute a flow with the given algorithm.
///
/// This is a convenience wrapper running a [`FlowRunner`] to completion.
/// It fails with [`Error::Overflow`] if the total flow does not fit into
/// `F`.
pub fn maxflow<F>(network: &mut Network<F>, algorithm: Algorithm) -> Result<FlowResult<F>>
where
    F: NumAssign + Ord + Copy + CheckedAdd + fmt::Debug,
{
    let mut runner = FlowRunner::new(network, algorithm);
    runner.run_to_end()?;
    runner.into_result().ok_or(Error::Analysis)
}
