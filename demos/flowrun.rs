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

use time::OffsetDateTime;

use rustop::opts;

use rs_flownet::{incidence_matrix, Algorithm, FlowRunner, Network, NodeId};

use std::ops::ControlFlow;

const DIAMOND: &[(NodeId, NodeId, u32)] = &[(1, 2, 10), (1, 3, 5), (2, 4, 5), (3, 4, 10), (2, 3, 3)];

const TRAP: &[(NodeId, NodeId, u32)] = &[(1, 2, 2), (1, 3, 1), (2, 3, 2), (2, 4, 1), (3, 4, 2)];

fn sample(name: &str) -> Option<Network<u32>> {
    let edges = match name {
        "diamond" => DIAMOND,
        "trap" => TRAP,
        _ => return None,
    };
    let mut net = Network::new();
    let labels = ["s", "a", "b", "t"];
    for (id, label) in (1..).zip(labels.iter()) {
        net.add_node_with_label(id, *label).ok()?;
    }
    for &(u, v, c) in edges {
        net.add_edge(u, v, c).ok()?;
    }
    net.set_source(1).ok()?;
    net.set_sink(4).ok()?;
    Some(net)
}

fn main() {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Compute a maximum flow on a sample network by augmenting paths.";
        opt matrix:bool, desc:"Print the incidence matrix after the run.";
        opt stop:Option<usize>, desc:"Stop the run after this number of steps.";
        param algorithm:String, desc:"Algorithm (greedy, dfs, bfs)";
        param network:String, desc:"Sample network (diamond, trap)";
    }
    .parse_or_exit();

    let algorithm: Algorithm = match args.algorithm.parse() {
        Ok(alg) => alg,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let mut net = match sample(&args.network) {
        Some(net) => net,
        None => {
            eprintln!("unknown sample network: {}", args.network);
            std::process::exit(1);
        }
    };

    println!("Algorithm: {} ({})", algorithm, algorithm.description());
    println!("  number of nodes: {}", net.num_nodes());
    println!("  number of arcs: {}", net.num_edges());

    let tstart = OffsetDateTime::now_utc();
    let mut runner = FlowRunner::new(&mut net, algorithm);
    let stop = args.stop;
    let result = runner.run(|event| {
        println!(
            "[Step {}] {:?} flow {} (total {})",
            event.step, event.route.path, event.route.flow, event.total
        );
        match stop {
            Some(n) if event.step >= n => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });
    let tend = OffsetDateTime::now_utc();

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
    println!("Time: {}", (tend - tstart).as_seconds_f64());

    if let (Some(result), Ok(cut)) = (runner.result(), runner.min_cut()) {
        println!("{}", result.display(runner.network()));
        println!("{}", cut.display(runner.network()));
    }

    if args.matrix {
        print!("{}", incidence_matrix(runner.network()));
    }
}
