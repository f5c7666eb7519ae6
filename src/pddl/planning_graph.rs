use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use log::debug;

use super::action::Action;
use super::error::Result;
use super::predicate::Fluent;
use super::problem::Problem;
use super::state::EncodedState;

/// A fluent together with its truth value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub fluent: Fluent,
    pub positive: bool,
}

impl Literal {
    pub fn pos(fluent: Fluent) -> Literal {
        Literal { fluent, positive: true }
    }

    pub fn neg(fluent: Fluent) -> Literal {
        Literal { fluent, positive: false }
    }

    pub fn negation(&self) -> Literal {
        Literal { fluent: self.fluent.clone(), positive: !self.positive }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.fluent)
        } else {
            write!(f, "~{}", self.fluent)
        }
    }
}

#[derive(Debug, Clone)]
enum Step<'a> {
    Grounded(&'a Action),
    Persist,
}

#[derive(Debug, Clone)]
struct ActionNode<'a> {
    step: Step<'a>,
    /// Indices into the literal level the action reads from.
    preconds: Vec<usize>,
    effects: Vec<Literal>,
}

impl<'a> ActionNode<'a> {
    fn persist(idx: usize, literal: &Literal) -> Self {
        ActionNode { step: Step::Persist, preconds: vec![idx], effects: vec![literal.clone()] }
    }

    fn grounded(action: &'a Action, level: &IndexSet<Literal>) -> Option<Self> {
        let required = action.precond_pos.iter().cloned().map(Literal::pos);
        let forbidden = action.precond_neg.iter().cloned().map(Literal::neg);
        let preconds = required
            .chain(forbidden)
            .map(|literal| level.get_index_of(&literal))
            .collect::<Option<Vec<usize>>>()?;
        let add = action.effect_add.iter().cloned().map(Literal::pos);
        let rem = action.effect_rem.iter().cloned().map(Literal::neg);
        Some(ActionNode { step: Step::Grounded(action), preconds, effects: add.chain(rem).collect() })
    }
}

/// Unordered pair of indices within one level.
#[inline]
fn pair(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Leveled graph alternating literal levels and action levels, expanded from
/// a single state until no new literal appears.
///
/// Level `0` holds one literal per tracked fluent. Action level `i` connects
/// literal level `i` to literal level `i + 1`.
#[derive(Debug)]
pub struct PlanningGraph<'a> {
    problem: &'a Problem,
    literal_levels: Vec<IndexSet<Literal>>,
    literal_mutex: Vec<HashSet<(usize, usize)>>,
    action_levels: Vec<Vec<ActionNode<'a>>>,
    action_mutex: Vec<HashSet<(usize, usize)>>,
}

impl<'a> PlanningGraph<'a> {
    pub fn new(problem: &'a Problem, state: &EncodedState) -> Result<PlanningGraph<'a>> {
        let decoded = problem.decode(state)?;
        let first: IndexSet<Literal> = problem
            .state_map()
            .iter()
            .map(|f| Literal { fluent: f.clone(), positive: decoded.holds(f) })
            .collect();
        let mut graph = PlanningGraph {
            problem,
            literal_levels: vec![first],
            literal_mutex: vec![HashSet::new()],
            action_levels: Vec::new(),
            action_mutex: Vec::new(),
        };
        while graph.expand() {}
        debug!(
            "Planning graph leveled off after {} levels with {} literals.",
            graph.literal_levels.len(),
            graph.literal_levels.last().map_or(0, IndexSet::len)
        );
        Ok(graph)
    }

    /// Adds one action level and the literal level it produces. Returns
    /// `false` once the new literal level equals the previous one, in which
    /// case nothing is kept.
    fn expand(&mut self) -> bool {
        let problem = self.problem;
        let level = self.literal_levels.len() - 1;
        let literals = &self.literal_levels[level];

        let mut actions: Vec<ActionNode<'a>> = problem
            .actions_list()
            .iter()
            .filter_map(|a| ActionNode::grounded(a, literals))
            .collect();
        actions.extend(literals.iter().enumerate().map(|(idx, l)| ActionNode::persist(idx, l)));

        let mut next = IndexSet::new();
        let mut support: Vec<Vec<usize>> = Vec::new();
        for (a_idx, action) in actions.iter().enumerate() {
            for effect in &action.effects {
                let (l_idx, inserted) = next.insert_full(effect.clone());
                if inserted {
                    support.push(Vec::new());
                }
                support[l_idx].push(a_idx);
            }
        }
        if next == *literals {
            return false;
        }

        let action_mutex = self.action_mutexes(&actions, &self.literal_mutex[level]);
        let literal_mutex = Self::literal_mutexes(&next, &support, &action_mutex);
        self.action_levels.push(actions);
        self.action_mutex.push(action_mutex);
        self.literal_levels.push(next);
        self.literal_mutex.push(literal_mutex);
        true
    }

    fn action_mutexes(&self, actions: &[ActionNode], literal_mutex: &HashSet<(usize, usize)>) -> HashSet<(usize, usize)> {
        let level = &self.literal_levels[self.literal_levels.len() - 1];
        let mut mutex = HashSet::new();
        for (i, a) in actions.iter().enumerate() {
            for (j, b) in actions.iter().enumerate().skip(i + 1) {
                let inconsistent_effects = a
                    .effects
                    .iter()
                    .any(|e| b.effects.contains(&e.negation()));
                let interference = |x: &ActionNode, y: &ActionNode| {
                    x.effects.iter().any(|e| {
                        level
                            .get_index_of(&e.negation())
                            .map_or(false, |idx| y.preconds.contains(&idx))
                    })
                };
                let competing_needs = || {
                    a.preconds
                        .iter()
                        .any(|p| b.preconds.iter().any(|q| literal_mutex.contains(&pair(*p, *q))))
                };
                if inconsistent_effects || interference(a, b) || interference(b, a) || competing_needs() {
                    mutex.insert((i, j));
                }
            }
        }
        mutex
    }

    fn literal_mutexes(
        literals: &IndexSet<Literal>,
        support: &[Vec<usize>],
        action_mutex: &HashSet<(usize, usize)>,
    ) -> HashSet<(usize, usize)> {
        let mut mutex = HashSet::new();
        for (i, l) in literals.iter().enumerate() {
            for (j, m) in literals.iter().enumerate().skip(i + 1) {
                let negation = l.fluent == m.fluent && l.positive != m.positive;
                let inconsistent_support = support[i]
                    .iter()
                    .all(|a| support[j].iter().all(|b| a != b && action_mutex.contains(&pair(*a, *b))));
                if negation || inconsistent_support {
                    mutex.insert((i, j));
                }
            }
        }
        mutex
    }

    /// Number of literal levels, the state's own level included.
    pub fn depth(&self) -> usize {
        self.literal_levels.len()
    }

    pub fn literals(&self, level: usize) -> impl Iterator<Item = &Literal> {
        self.literal_levels.get(level).into_iter().flatten()
    }

    /// Grounded actions of an action level, persistence actions excluded.
    pub fn actions(&self, level: usize) -> impl Iterator<Item = &'a Action> + '_ {
        self.action_levels.get(level).into_iter().flatten().filter_map(|node| match node.step {
            Step::Grounded(action) => Some(action),
            Step::Persist => None,
        })
    }

    /// First level at which `literal` appears.
    pub fn level_of(&self, literal: &Literal) -> Option<usize> {
        self.literal_levels.iter().position(|level| level.contains(literal))
    }

    pub fn is_literal_mutex(&self, level: usize, a: &Literal, b: &Literal) -> bool {
        let literals = match self.literal_levels.get(level) {
            Some(literals) => literals,
            None => return false,
        };
        match (literals.get_index_of(a), literals.get_index_of(b)) {
            (Some(i), Some(j)) => self.literal_mutex[level].contains(&pair(i, j)),
            _ => false,
        }
    }

    pub fn is_action_mutex(&self, level: usize, a: &Action, b: &Action) -> bool {
        let actions = match self.action_levels.get(level) {
            Some(actions) => actions,
            None => return false,
        };
        let find = |target: &Action| {
            actions
                .iter()
                .position(|node| matches!(node.step, Step::Grounded(action) if action == target))
        };
        match (find(a), find(b)) {
            (Some(i), Some(j)) => self.action_mutex[level].contains(&pair(i, j)),
            _ => false,
        }
    }

    /// Sum over the goal fluents of the first level each one holds at.
    /// `usize::MAX` when a goal fluent never holds.
    pub fn h_levelsum(&self) -> usize {
        let mut sum = 0usize;
        for fluent in self.problem.goal() {
            match self.level_of(&Literal::pos(fluent.clone())) {
                Some(level) => sum += level,
                None => return usize::MAX,
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pddl::instances::{air_cargo_p1, air_cargo_p2};

    fn find<'a>(problem: &'a Problem, name: &str) -> &'a Action {
        problem
            .actions_list()
            .iter()
            .find(|a| a.to_string() == name)
            .unwrap()
    }

    #[test]
    fn first_level_mirrors_the_state() {
        let p = air_cargo_p1();
        let pg = PlanningGraph::new(&p, p.initial()).unwrap();
        assert_eq!(pg.literals(0).count(), p.state_map().len());
        assert!(pg.literals(0).any(|l| *l == Literal::pos(Fluent::at("C1", "SFO"))));
        assert!(pg.literals(0).any(|l| *l == Literal::neg(Fluent::inside("C1", "P1"))));
        assert_eq!(pg.actions(0).count(), p.actions(p.initial()).unwrap().len());
    }

    #[test]
    fn goal_levels_on_p1() {
        let p = air_cargo_p1();
        let pg = PlanningGraph::new(&p, p.initial()).unwrap();
        assert_eq!(pg.level_of(&Literal::pos(Fluent::inside("C1", "P1"))), Some(1));
        assert_eq!(pg.level_of(&Literal::pos(Fluent::at("C1", "JFK"))), Some(2));
        assert_eq!(pg.level_of(&Literal::pos(Fluent::at("C2", "SFO"))), Some(2));
        assert_eq!(pg.h_levelsum(), 4);
        assert!(pg.depth() >= 3);
    }

    #[test]
    fn action_mutexes() {
        let p = air_cargo_p1();
        let pg = PlanningGraph::new(&p, p.initial()).unwrap();
        let load = find(&p, "Load(C1, P1, SFO)");
        let fly = find(&p, "Fly(P1, SFO, JFK)");
        let other_load = find(&p, "Load(C2, P2, JFK)");
        assert!(pg.is_action_mutex(0, load, fly));
        assert!(pg.is_action_mutex(0, fly, load));
        assert!(!pg.is_action_mutex(0, load, other_load));
    }

    #[test]
    fn literal_mutexes() {
        let p = air_cargo_p1();
        let pg = PlanningGraph::new(&p, p.initial()).unwrap();
        let loaded = Literal::pos(Fluent::inside("C1", "P1"));
        let flown = Literal::pos(Fluent::at("P1", "JFK"));
        let at_sfo = Literal::pos(Fluent::at("C1", "SFO"));
        assert!(pg.is_literal_mutex(1, &loaded, &flown));
        assert!(pg.is_literal_mutex(1, &at_sfo, &at_sfo.negation()));
        assert!(!pg.is_literal_mutex(1, &loaded, &Literal::pos(Fluent::inside("C2", "P2"))));
    }

    #[test]
    fn goal_state_costs_nothing() {
        let p = air_cargo_p2();
        let mut state = p.decode(p.initial()).unwrap();
        for goal in p.goal() {
            state.neg.shift_remove(goal);
            state.pos.insert(goal.clone());
        }
        for (cargo, airport) in [("C1", "SFO"), ("C2", "JFK"), ("C3", "ATL")] {
            state.pos.shift_remove(&Fluent::at(cargo, airport));
            state.neg.insert(Fluent::at(cargo, airport));
        }
        let encoded = p.encode(&state).unwrap();
        let pg = PlanningGraph::new(&p, &encoded).unwrap();
        assert_eq!(pg.h_levelsum(), 0);
    }

    #[test]
    fn unreachable_goal_saturates() {
        let base = air_cargo_p1();
        let initial = base.decode(base.initial()).unwrap();
        let p = Problem::new(&["C1", "C2"], &["P1", "P2"], &["JFK", "SFO"], initial, vec![Fluent::at("C1", "LAX")])
            .unwrap();
        let pg = PlanningGraph::new(&p, p.initial()).unwrap();
        assert_eq!(pg.h_levelsum(), usize::MAX);
    }
}
