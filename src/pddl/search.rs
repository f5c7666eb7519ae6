use std::cmp::Reverse;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use log::{debug, trace};
use priority_queue::PriorityQueue;

use super::action::Action;
use super::error::Result;
use super::heuristic::Heuristic;
use super::problem::Problem;
use super::state::EncodedState;

/// Search tree node: a state, the action that produced it and a link back to
/// the node it was expanded from.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub state: EncodedState,
    pub action: Option<&'a Action>,
    pub parent: Option<Rc<Node<'a>>>,
    pub path_cost: usize,
    pub depth: usize,
}

impl<'a> Node<'a> {
    pub fn root(state: EncodedState) -> Node<'a> {
        Node { state, action: None, parent: None, path_cost: 0, depth: 0 }
    }

    pub fn child(self: &Rc<Self>, problem: &Problem, action: &'a Action) -> Result<Node<'a>> {
        Ok(Node {
            state: problem.result(&self.state, action)?,
            action: Some(action),
            parent: Some(Rc::clone(self)),
            path_cost: self.path_cost + 1,
            depth: self.depth + 1,
        })
    }

    pub fn expand(self: &Rc<Self>, problem: &'a Problem) -> Result<Vec<Node<'a>>> {
        problem
            .actions(&self.state)?
            .into_iter()
            .map(|action| self.child(problem, action))
            .collect()
    }

    /// Actions from the root to this node.
    pub fn solution(&self) -> Vec<&'a Action> {
        let mut plan = Vec::with_capacity(self.depth);
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(action) = node.action {
                plan.push(action);
            }
            current = node.parent.as_deref();
        }
        plan.reverse();
        plan
    }
}

/// Counters reported alongside a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: usize,
    pub goal_tests: usize,
    pub new_nodes: usize,
}

#[derive(Debug, Clone)]
pub struct Solution<'a> {
    pub plan: Vec<&'a Action>,
    pub path_cost: usize,
    pub stats: SearchStats,
}

impl<'a> Solution<'a> {
    fn new(node: &Node<'a>, stats: SearchStats) -> Solution<'a> {
        debug!(
            "Found a plan of length {} after {} expansions.",
            node.depth, stats.expansions
        );
        Solution { plan: node.solution(), path_cost: node.path_cost, stats }
    }
}

/// Breadth-first graph search. Children are goal-tested when generated.
pub fn breadth_first_search(problem: &Problem) -> Result<Option<Solution<'_>>> {
    let mut stats = SearchStats::default();
    let root = Rc::new(Node::root(problem.initial().clone()));
    stats.goal_tests += 1;
    if problem.goal_test(&root.state)? {
        return Ok(Some(Solution::new(&root, stats)));
    }
    let mut reached = HashSet::new();
    reached.insert(root.state.clone());
    let mut frontier = VecDeque::from([root]);
    while let Some(node) = frontier.pop_front() {
        stats.expansions += 1;
        trace!("Expanding {} at depth {}", node.state, node.depth);
        for child in node.expand(problem)? {
            stats.new_nodes += 1;
            if reached.insert(child.state.clone()) {
                stats.goal_tests += 1;
                if problem.goal_test(&child.state)? {
                    return Ok(Some(Solution::new(&child, stats)));
                }
                frontier.push_back(Rc::new(child));
            }
        }
    }
    debug!("Breadth-first search exhausted after {} expansions.", stats.expansions);
    Ok(None)
}

/// Depth-first graph search. Finds a plan quickly, rarely a short one.
pub fn depth_first_graph_search(problem: &Problem) -> Result<Option<Solution<'_>>> {
    let mut stats = SearchStats::default();
    let mut explored = HashSet::new();
    let mut frontier = vec![Rc::new(Node::root(problem.initial().clone()))];
    while let Some(node) = frontier.pop() {
        stats.goal_tests += 1;
        if problem.goal_test(&node.state)? {
            return Ok(Some(Solution::new(&node, stats)));
        }
        if !explored.insert(node.state.clone()) {
            continue;
        }
        stats.expansions += 1;
        trace!("Expanding {} at depth {}", node.state, node.depth);
        for child in node.expand(problem)? {
            stats.new_nodes += 1;
            if !explored.contains(&child.state) {
                frontier.push(Rc::new(child));
            }
        }
    }
    debug!("Depth-first search exhausted after {} expansions.", stats.expansions);
    Ok(None)
}

/// Expands the frontier node with the lowest `f` first. Ties are broken in
/// insertion order.
pub fn best_first_graph_search<'a, F>(problem: &'a Problem, f: F) -> Result<Option<Solution<'a>>>
where
    F: Fn(&Node<'a>) -> Result<usize>,
{
    let mut stats = SearchStats::default();
    let mut counter: u64 = 0;
    let root = Node::root(problem.initial().clone());
    let mut frontier = PriorityQueue::new();
    frontier.push(root.state.clone(), Reverse((f(&root)?, counter)));
    let mut open: HashMap<EncodedState, Rc<Node<'a>>> = HashMap::new();
    open.insert(root.state.clone(), Rc::new(root));
    let mut explored = HashSet::new();

    while let Some((state, _)) = frontier.pop() {
        let node = match open.remove(&state) {
            Some(node) => node,
            None => continue,
        };
        stats.goal_tests += 1;
        if problem.goal_test(&node.state)? {
            return Ok(Some(Solution::new(&node, stats)));
        }
        explored.insert(state);
        stats.expansions += 1;
        trace!("Expanding {} with cost {}", node.state, node.path_cost);
        for child in node.expand(problem)? {
            stats.new_nodes += 1;
            if explored.contains(&child.state) {
                continue;
            }
            let score = f(&child)?;
            let improves = match frontier.get_priority(&child.state) {
                Some(Reverse((known, _))) => score < *known,
                None => true,
            };
            if improves {
                counter += 1;
                frontier.push(child.state.clone(), Reverse((score, counter)));
                open.insert(child.state.clone(), Rc::new(child));
            }
        }
    }
    debug!("Best-first search exhausted after {} expansions.", stats.expansions);
    Ok(None)
}

pub fn uniform_cost_search(problem: &Problem) -> Result<Option<Solution<'_>>> {
    best_first_graph_search(problem, |node| Ok(node.path_cost))
}

pub fn greedy_best_first_graph_search(problem: &Problem, h: Heuristic) -> Result<Option<Solution<'_>>> {
    best_first_graph_search(problem, |node| h.estimate(problem, node))
}

pub fn astar_search(problem: &Problem, h: Heuristic) -> Result<Option<Solution<'_>>> {
    best_first_graph_search(problem, |node| {
        Ok(node.path_cost.saturating_add(h.estimate(problem, node)?))
    })
}

/// The search runs offered by the experiment runner. Informed searches take
/// their heuristic separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchKind {
    BreadthFirst,
    DepthFirstGraph,
    UniformCost,
    GreedyBestFirst,
    Astar,
}

impl SearchKind {
    /// True for searches ordered by a heuristic.
    pub fn is_informed(&self) -> bool {
        matches!(self, SearchKind::GreedyBestFirst | SearchKind::Astar)
    }

    /// Runs the search. `h` is ignored by uninformed searches.
    pub fn run<'a>(&self, problem: &'a Problem, h: Heuristic) -> Result<Option<Solution<'a>>> {
        match self {
            SearchKind::BreadthFirst => breadth_first_search(problem),
            SearchKind::DepthFirstGraph => depth_first_graph_search(problem),
            SearchKind::UniformCost => uniform_cost_search(problem),
            SearchKind::GreedyBestFirst => greedy_best_first_graph_search(problem, h),
            SearchKind::Astar => astar_search(problem, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pddl::instances::air_cargo_p1;

    fn replay(problem: &Problem, plan: &[&Action]) -> bool {
        let mut state = problem.initial().clone();
        for action in plan {
            state = problem.result(&state, action).unwrap();
        }
        problem.goal_test(&state).unwrap()
    }

    #[test]
    fn breadth_first_finds_six_steps() {
        let p = air_cargo_p1();
        let solution = breadth_first_search(&p).unwrap().unwrap();
        assert_eq!(solution.plan.len(), 6);
        assert_eq!(solution.path_cost, 6);
        assert!(replay(&p, &solution.plan));
        assert!(solution.stats.goal_tests > solution.stats.expansions);
    }

    #[test]
    fn every_search_reaches_the_goal() {
        let p = air_cargo_p1();
        let runs = [
            (SearchKind::BreadthFirst, Heuristic::Constant),
            (SearchKind::DepthFirstGraph, Heuristic::Constant),
            (SearchKind::UniformCost, Heuristic::Constant),
            (SearchKind::GreedyBestFirst, Heuristic::Constant),
            (SearchKind::GreedyBestFirst, Heuristic::IgnorePreconditions),
            (SearchKind::Astar, Heuristic::Constant),
            (SearchKind::Astar, Heuristic::IgnorePreconditions),
            (SearchKind::Astar, Heuristic::LevelSum),
        ];
        for (kind, h) in runs {
            let solution = kind.run(&p, h).unwrap().unwrap();
            assert!(replay(&p, &solution.plan), "{:?} with {:?} returned an invalid plan", kind, h);
            assert!(solution.stats.expansions > 0);
        }
    }

    #[test]
    fn optimal_searches_agree_on_length() {
        let p = air_cargo_p1();
        assert_eq!(SearchKind::UniformCost.run(&p, Heuristic::Constant).unwrap().unwrap().plan.len(), 6);
        for h in [Heuristic::Constant, Heuristic::IgnorePreconditions] {
            assert_eq!(SearchKind::Astar.run(&p, h).unwrap().unwrap().plan.len(), 6, "{:?}", h);
        }
    }

    #[test]
    fn uninformed_searches_ignore_the_heuristic() {
        let p = air_cargo_p1();
        for kind in [SearchKind::BreadthFirst, SearchKind::DepthFirstGraph, SearchKind::UniformCost] {
            assert!(!kind.is_informed());
            let a = kind.run(&p, Heuristic::Constant).unwrap().unwrap();
            let b = kind.run(&p, Heuristic::LevelSum).unwrap().unwrap();
            assert_eq!(a.stats, b.stats, "{:?}", kind);
            assert_eq!(a.plan, b.plan, "{:?}", kind);
        }
        assert!(SearchKind::GreedyBestFirst.is_informed());
        assert!(SearchKind::Astar.is_informed());
    }

    #[test]
    fn plans_borrow_actions_from_the_problem() {
        type Uninformed = fn(&Problem) -> Result<Option<Solution<'_>>>;
        type Informed = fn(&Problem, Heuristic) -> Result<Option<Solution<'_>>>;
        let uninformed: [Uninformed; 3] = [breadth_first_search, depth_first_graph_search, uniform_cost_search];
        let informed: [Informed; 2] = [greedy_best_first_graph_search, astar_search];

        let p = air_cargo_p1();
        let grounded = p.actions_list().as_ptr_range();
        let mut plans: Vec<Solution<'_>> = uninformed.iter().map(|search| search(&p).unwrap().unwrap()).collect();
        plans.extend(informed.iter().map(|search| search(&p, Heuristic::IgnorePreconditions).unwrap().unwrap()));
        for solution in &plans {
            assert!(solution.plan.iter().all(|action| grounded.contains(&(*action as *const Action))));
        }
    }

    #[test]
    fn solution_walks_back_to_root() {
        let p = air_cargo_p1();
        let root = Rc::new(Node::root(p.initial().clone()));
        let load = p.actions(p.initial()).unwrap()[0];
        let child = Rc::new(root.child(&p, load).unwrap());
        let fly = p.actions(&child.state).unwrap().into_iter().find(|a| a.to_string() == "Fly(P1, SFO, JFK)").unwrap();
        let grandchild = child.child(&p, fly).unwrap();
        assert_eq!(grandchild.depth, 2);
        let names: Vec<String> = grandchild.solution().iter().map(|a| a.to_string()).collect();
        assert_eq!(names, vec!["Load(C1, P1, SFO)", "Fly(P1, SFO, JFK)"]);
        assert!(root.solution().is_empty());
    }
}
