/*
 * Copyright (c) 2020-2024 Frank Fischer <frank-fischer@shadow-soft.de>
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

use rs_flownet::{maxflow, Algorithm, ConfigError, Error, FlowRunner, Network, NodeId, RunState};

use std::collections::VecDeque;
use std::error;
use std::ops::ControlFlow;

type Instance = (&'static str, &'static [(NodeId, NodeId, i64)], NodeId, NodeId);

const INSTANCES: &[Instance] = &[
    ("diamond", &[(1, 2, 10), (1, 3, 5), (2, 4, 5), (3, 4, 10), (2, 3, 3)], 1, 4),
    ("single", &[(1, 2, 7)], 1, 2),
    ("chain", &[(1, 2, 4), (2, 3, 2), (3, 4, 9)], 1, 4),
    (
        "layered",
        &[
            (1, 3, 15),
            (1, 5, 10),
            (3, 4, 6),
            (3, 5, 7),
            (4, 2, 5),
            (4, 6, 2),
            (5, 4, 11),
            (5, 6, 4),
            (6, 4, 4),
            (6, 2, 20),
        ],
        1,
        2,
    ),
    ("trap", &[(1, 2, 2), (1, 3, 1), (2, 3, 2), (2, 4, 1), (3, 4, 2)], 1, 4),
];

fn build(edges: &[(NodeId, NodeId, i64)], src: NodeId, snk: NodeId) -> Result<Network<i64>, Error> {
    let mut net = Network::new();
    for &(u, v, _) in edges {
        for &w in &[u, v] {
            if net.node(w).is_none() {
                net.add_node(w)?;
            }
        }
    }
    for &(u, v, c) in edges {
        net.add_edge(u, v, c)?;
    }
    net.set_source(src)?;
    net.set_sink(snk)?;
    Ok(net)
}

/// Textbook Edmonds-Karp with reverse arcs.
fn reference_maxflow(net: &Network<i64>, src: NodeId, snk: NodeId) -> i64 {
    let ids = net.sorted_node_ids();
    let idx = |u: NodeId| ids.iter().position(|&w| w == u).unwrap();
    let n = ids.len();
    let mut cap = vec![vec![0i64; n]; n];
    for e in net.edges() {
        cap[idx(e.tail())][idx(e.head())] += e.capacity();
    }
    let (s, t) = (idx(src), idx(snk));
    let mut value = 0;
    loop {
        let mut pred = vec![None; n];
        pred[s] = Some(s);
        let mut queue = VecDeque::new();
        queue.push_back(s);
        while let Some(u) = queue.pop_front() {
            for v in 0..n {
                if pred[v].is_none() && cap[u][v] > 0 {
                    pred[v] = Some(u);
                    queue.push_back(v);
                }
            }
        }
        if pred[t].is_none() {
            return value;
        }
        let mut df = i64::max_value();
        let mut v = t;
        while v != s {
            let u = pred[v].unwrap();
            df = df.min(cap[u][v]);
            v = u;
        }
        let mut v = t;
        while v != s {
            let u = pred[v].unwrap();
            cap[u][v] -= df;
            cap[v][u] += df;
            v = u;
        }
        value += df;
    }
}

#[test]
fn test_scenario_diamond() -> Result<(), Box<dyn error::Error>> {
    let (_, edges, s, t) = INSTANCES[0];
    let mut net = build(edges, s, t)?;

    let ek = maxflow(&mut net, Algorithm::EdmondsKarp)?;
    let routes: Vec<_> = ek.routes().iter().map(|r| (r.path.clone(), r.flow)).collect();
    assert_eq!(
        routes,
        vec![(vec![1, 2, 4], 5), (vec![1, 3, 4], 5), (vec![1, 2, 3, 4], 3)]
    );
    assert_eq!(ek.value(), 13);
    assert_eq!(ek.value(), reference_maxflow(&net, s, t));

    let greedy = maxflow(&mut net, Algorithm::Greedy)?;
    let routes: Vec<_> = greedy.routes().iter().map(|r| (r.path.clone(), r.flow)).collect();
    assert_eq!(
        routes,
        vec![(vec![1, 2, 4], 5), (vec![1, 2, 3, 4], 3), (vec![1, 3, 4], 5)]
    );
    assert!(greedy.value() <= ek.value());

    Ok(())
}

#[test]
fn test_scenario_single_edge() -> Result<(), Box<dyn error::Error>> {
    for &alg in &Algorithm::ALL {
        let mut net = build(&[(1, 2, 7)], 1, 2)?;
        let result = maxflow(&mut net, alg)?;
        assert_eq!(result.value(), 7);
        assert_eq!(result.routes().len(), 1);
        assert_eq!(result.routes()[0].path, vec![1, 2]);
        assert_eq!(result.routes()[0].flow, 7);

        let cut = result.min_cut(&net);
        assert_eq!(cut.edges().iter().map(|e| (e.tail, e.head)).collect::<Vec<_>>(), vec![(1, 2)]);
        assert_eq!(cut.capacity(), 7);
        assert!(cut.is_verified());
    }
    Ok(())
}

// None of the instances needs flow cancellation, on such networks the
// forward-only residual model reaches the true maximum.
#[test]
fn test_edmondskarp_matches_reference() -> Result<(), Box<dyn error::Error>> {
    for &(name, edges, s, t) in INSTANCES {
        let mut net = build(edges, s, t)?;
        let result = maxflow(&mut net, Algorithm::EdmondsKarp)?;
        assert_eq!(result.value(), reference_maxflow(&net, s, t), "Instance: {}", name);
        assert_eq!(net.flow_value(), result.value(), "Instance: {}", name);
    }
    Ok(())
}

#[test]
fn test_greedy_not_optimal() -> Result<(), Box<dyn error::Error>> {
    let (_, edges, s, t) = INSTANCES[4];
    let mut net = build(edges, s, t)?;

    let greedy = maxflow(&mut net, Algorithm::Greedy)?;
    assert_eq!(greedy.value(), 2);
    assert_eq!(greedy.routes()[0].path, vec![1, 2, 3, 4]);
    let cut = greedy.min_cut(&net);
    assert!(!cut.is_verified());
    assert!(cut.capacity() > greedy.value());

    let ek = maxflow(&mut net, Algorithm::EdmondsKarp)?;
    assert_eq!(ek.value(), 3);
    assert!(ek.min_cut(&net).is_verified());
    Ok(())
}

#[test]
fn test_edmondskarp_without_cancellation() -> Result<(), Box<dyn error::Error>> {
    // the shortest path 1-2-5-8 blocks both longer paths
    let edges: &[(NodeId, NodeId, i64)] = &[
        (1, 2, 1),
        (2, 5, 1),
        (5, 8, 1),
        (1, 3, 1),
        (3, 4, 1),
        (4, 5, 1),
        (2, 6, 1),
        (6, 7, 1),
        (7, 8, 1),
    ];
    let mut net = build(edges, 1, 8)?;
    assert!(Algorithm::EdmondsKarp.is_optimal());

    let result = maxflow(&mut net, Algorithm::EdmondsKarp)?;
    assert_eq!(result.routes().len(), 1);
    assert_eq!(result.routes()[0].path, vec![1, 2, 5, 8]);
    assert_eq!(result.value(), 1);
    assert_eq!(reference_maxflow(&net, 1, 8), 2);

    let cut = result.min_cut(&net);
    assert_eq!(cut.source_side(), &[1, 3, 4, 5]);
    assert_eq!(cut.capacity(), 2);
    assert!(!cut.is_verified());
    Ok(())
}

#[test]
fn test_flow_is_feasible() -> Result<(), Box<dyn error::Error>> {
    for &(name, edges, s, t) in INSTANCES {
        for &alg in &Algorithm::ALL {
            let mut net = build(edges, s, t)?;
            let result = maxflow(&mut net, alg)?;
            assert!(net.edges().all(|e| e.flow() >= 0 && e.flow() <= e.capacity()));
            assert!(net
                .nodes()
                .map(|n| n.id())
                .filter(|&u| u != s && u != t)
                .all(|u| net.outedges(u).map(|e| e.flow()).sum::<i64>()
                    == net.inedges(u).map(|e| e.flow()).sum::<i64>()));
            assert_eq!(
                result.routes().iter().map(|r| r.flow).sum::<i64>(),
                result.value(),
                "Instance: {} algorithm: {}",
                name,
                alg
            );
            assert!(result.routes().iter().all(|r| r.path.len() >= 2 && r.flow > 0));
            assert!(result.min_cut(&net).capacity() >= result.value());
        }
    }
    Ok(())
}

#[test]
fn test_deterministic() -> Result<(), Box<dyn error::Error>> {
    for &(_, edges, s, t) in INSTANCES {
        for &alg in &Algorithm::ALL {
            let mut net = build(edges, s, t)?;
            let first = maxflow(&mut net, alg)?;
            let second = maxflow(&mut net, alg)?;
            assert_eq!(first.routes(), second.routes());
            assert_eq!(first.value(), second.value());
        }
    }
    Ok(())
}

#[test]
fn test_configuration_errors() -> Result<(), Box<dyn error::Error>> {
    for &alg in &Algorithm::ALL {
        let mut net = build(&[(1, 2, 3)], 1, 1)?;
        assert_eq!(
            maxflow(&mut net, alg).err(),
            Some(Error::Configuration(ConfigError::SourceIsSink(1)))
        );

        net.clear_terminals();
        net.set_sink(2)?;
        assert_eq!(
            maxflow(&mut net, alg).err(),
            Some(Error::Configuration(ConfigError::MissingSource))
        );

        let mut net = build(&[(1, 2, 3)], 1, 2)?;
        net.remove_node(2)?;
        let mut runner = FlowRunner::new(&mut net, alg);
        assert_eq!(
            runner.start(),
            Err(Error::Configuration(ConfigError::MissingSink))
        );
        assert_eq!(runner.state(), RunState::Idle);

        let mut empty = Network::<i64>::new();
        assert!(maxflow(&mut empty, alg).is_err());
    }
    Ok(())
}

#[test]
fn test_no_edges_and_disconnected() -> Result<(), Box<dyn error::Error>> {
    for &alg in &Algorithm::ALL {
        let mut net = Network::<i64>::new();
        net.add_node(1)?;
        net.add_node(2)?;
        net.set_source(1)?;
        net.set_sink(2)?;
        let result = maxflow(&mut net, alg)?;
        assert_eq!(result.value(), 0);
        assert!(result.routes().is_empty());

        let mut net = build(&[(1, 2, 3), (3, 4, 5), (4, 3, 1)], 1, 4)?;
        let result = maxflow(&mut net, alg)?;
        assert_eq!(result.value(), 0);
        assert!(result.routes().is_empty());
        assert!(result.is_complete());
        assert!(result.min_cut(&net).is_verified());
    }
    Ok(())
}

#[test]
fn test_cooperative_stop() -> Result<(), Box<dyn error::Error>> {
    let (_, edges, s, t) = INSTANCES[0];
    let mut net = build(edges, s, t)?;
    let mut runner = FlowRunner::new(&mut net, Algorithm::EdmondsKarp);
    let mut seen = vec![];
    let result = runner.run(|event| {
        seen.push((event.step, event.route.flow, event.total));
        if event.step == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    assert_eq!(result.value(), 10);
    assert_eq!(result.routes().len(), 2);
    assert!(!result.is_complete());
    assert_eq!(seen, vec![(1, 5, 5), (2, 5, 10)]);
    assert_eq!(runner.state(), RunState::Finished);
    assert_eq!(runner.step()?, None);
    assert_eq!(runner.network().flow_value(), 10);
    Ok(())
}

#[test]
fn test_step_by_step() -> Result<(), Box<dyn error::Error>> {
    let (_, edges, s, t) = INSTANCES[2];
    let mut net = build(edges, s, t)?;
    let mut runner = FlowRunner::new(&mut net, Algorithm::FordFulkerson);
    let events = runner.steps().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].route.path, vec![1, 2, 3, 4]);
    assert_eq!(events[0].route.flow, 2);
    let result = runner.into_result().ok_or("run not finished")?;
    assert_eq!(result.value(), 2);
    assert_eq!(net.edge(2, 3).map(|e| e.residual()), Some(0));
    Ok(())
}
