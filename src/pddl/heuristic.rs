use super::error::Result;
use super::planning_graph::PlanningGraph;
use super::problem::Problem;
use super::search::Node;

/// Estimators of the remaining number of actions, selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Heuristic {
    /// Constant 1, i.e. uniform cost
    #[value(name = "h_1")]
    Constant,
    #[value(name = "h_ignore_preconditions")]
    IgnorePreconditions,
    #[value(name = "h_pg_levelsum")]
    LevelSum,
}

impl Heuristic {
    pub fn estimate(&self, problem: &Problem, node: &Node) -> Result<usize> {
        match self {
            Heuristic::Constant => Ok(problem.h_1(node)),
            Heuristic::IgnorePreconditions => problem.h_ignore_preconditions(node),
            Heuristic::LevelSum => problem.h_pg_levelsum(node),
        }
    }
}

impl Problem {
    /// Not a real heuristic: every state is one step away.
    pub fn h_1(&self, _node: &Node) -> usize {
        1
    }

    /// Number of goal fluents that do not hold yet, as if every action were
    /// always applicable. One action may achieve several goals, so this is not
    /// a strict lower bound.
    pub fn h_ignore_preconditions(&self, node: &Node) -> Result<usize> {
        let state = self.decode(&node.state)?;
        Ok(self.goal().iter().filter(|fluent| !state.holds(fluent)).count())
    }

    /// Level-sum estimate from a planning graph grown out of the node's state.
    pub fn h_pg_levelsum(&self, node: &Node) -> Result<usize> {
        let pg = PlanningGraph::new(self, &node.state)?;
        Ok(pg.h_levelsum())
    }
}
