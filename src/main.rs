use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::info;

use air_cargo::pddl::instances::{air_cargo_p1, air_cargo_p2, air_cargo_p3};
use air_cargo::pddl::heuristic::Heuristic;
use air_cargo::pddl::search::SearchKind;
use air_cargo::pddl::{Error, Problem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProblemId {
    P1,
    P2,
    P3,
}

impl ProblemId {
    fn build(&self) -> Problem {
        match self {
            ProblemId::P1 => air_cargo_p1(),
            ProblemId::P2 => air_cargo_p2(),
            ProblemId::P3 => air_cargo_p3(),
        }
    }
}

/// Solve the canned air cargo problems and report search statistics.
#[derive(Debug, Parser)]
#[command(name = "air-cargo", version)]
struct Args {
    /// Problems to solve
    #[arg(short, long, value_enum, num_args = 1.., default_values_t = [ProblemId::P1, ProblemId::P2, ProblemId::P3])]
    problem: Vec<ProblemId>,
    /// Searches to run on every problem
    #[arg(short, long, value_enum, num_args = 1.., default_values_t = [
        SearchKind::BreadthFirst,
        SearchKind::DepthFirstGraph,
        SearchKind::UniformCost,
        SearchKind::GreedyBestFirst,
        SearchKind::Astar,
    ])]
    search: Vec<SearchKind>,
    /// Heuristics for the informed searches, each run once per heuristic
    #[arg(long, value_enum, num_args = 1.., default_values_t = [Heuristic::Constant, Heuristic::IgnorePreconditions])]
    heuristic: Vec<Heuristic>,
}

impl Args {
    /// Every (search, heuristic) pair to run. Uninformed searches appear once
    /// with no heuristic.
    fn runs(&self) -> Vec<(SearchKind, Option<Heuristic>)> {
        let mut runs = Vec::new();
        for kind in &self.search {
            if kind.is_informed() {
                runs.extend(self.heuristic.iter().map(|h| (*kind, Some(*h))));
            } else {
                runs.push((*kind, None));
            }
        }
        runs
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    for id in &args.problem {
        let problem = id.build();
        info!(
            "{:?}: {} actions over {} fluents",
            id,
            problem.actions_list().len(),
            problem.state_map().len()
        );
        for (kind, h) in args.runs() {
            match h {
                Some(h) => println!("\nSolving {:?} using {:?} with {:?}...", id, kind, h),
                None => println!("\nSolving {:?} using {:?}...", id, kind),
            }
            let start = Instant::now();
            let solution = kind.run(&problem, h.unwrap_or(Heuristic::Constant))?;
            let elapsed = start.elapsed();
            match solution {
                Some(solution) => {
                    println!("Expansions   Goal Tests   New Nodes");
                    println!(
                        "{:>10}   {:>10}   {:>9}",
                        solution.stats.expansions, solution.stats.goal_tests, solution.stats.new_nodes
                    );
                    println!(
                        "\nPlan length: {}  Time elapsed in seconds: {:.4}",
                        solution.plan.len(),
                        elapsed.as_secs_f64()
                    );
                    for action in &solution.plan {
                        println!("\t{}", action);
                    }
                }
                None => println!("No plan found after {:.4} seconds.", elapsed.as_secs_f64()),
            }
        }
    }
    Ok(())
}
