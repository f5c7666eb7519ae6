use log::debug;

use super::action::Action;
use super::domain::ground_actions;
use super::error::{Error, Result};
use super::predicate::{Fluent, Object};
use super::state::{decode, encode, EncodedState, FluentState, StateMap};

/// Air cargo planning problem seen as a search problem.
///
/// Everything is fixed at construction: the grounded actions, the state map
/// and the encoded initial state. The transition model is a pure function of
/// its inputs, so a `Problem` can be shared read-only between search workers.
#[derive(Debug, Clone)]
pub struct Problem {
    cargos: Vec<Object>,
    planes: Vec<Object>,
    airports: Vec<Object>,
    goal: Vec<Fluent>,
    state_map: StateMap,
    initial: EncodedState,
    actions_list: Vec<Action>,
}

fn objects(names: &[&str]) -> Vec<Object> {
    names.iter().map(|name| Object::from(*name)).collect()
}

impl Problem {
    pub fn new(
        cargos: &[&str],
        planes: &[&str],
        airports: &[&str],
        initial: FluentState,
        goal: Vec<Fluent>,
    ) -> Result<Problem> {
        let (cargos, planes, airports) = (objects(cargos), objects(planes), objects(airports));
        let state_map = StateMap::from_initial(&initial)?;
        let initial = encode(&initial, &state_map)?;
        let actions_list = ground_actions(&cargos, &planes, &airports);
        debug!(
            "Grounded {} actions over {} tracked fluents.",
            actions_list.len(),
            state_map.len()
        );
        Ok(Problem { cargos, planes, airports, goal, state_map, initial, actions_list })
    }

    pub fn cargos(&self) -> &[Object] {
        &self.cargos
    }

    pub fn planes(&self) -> &[Object] {
        &self.planes
    }

    pub fn airports(&self) -> &[Object] {
        &self.airports
    }

    /// Fluents that must all hold in a goal state.
    pub fn goal(&self) -> &[Fluent] {
        &self.goal
    }

    pub fn initial(&self) -> &EncodedState {
        &self.initial
    }

    pub fn state_map(&self) -> &StateMap {
        &self.state_map
    }

    /// All grounded actions, applicable or not.
    pub fn actions_list(&self) -> &[Action] {
        &self.actions_list
    }

    pub fn decode(&self, state: &EncodedState) -> Result<FluentState> {
        decode(state, &self.state_map)
    }

    pub fn encode(&self, state: &FluentState) -> Result<EncodedState> {
        encode(state, &self.state_map)
    }

    #[inline]
    fn is_applicable(action: &Action, state: &FluentState) -> bool {
        state.satisfies(&action.precond_pos, &action.precond_neg)
    }

    /// Actions whose preconditions hold in `state`, in grounding order.
    pub fn actions(&self, state: &EncodedState) -> Result<Vec<&Action>> {
        let decoded = self.decode(state)?;
        Ok(self
            .actions_list
            .iter()
            .filter(|action| Self::is_applicable(action, &decoded))
            .collect())
    }

    /// State reached by executing `action` in `state`. Fails if the action's
    /// preconditions do not hold.
    pub fn result(&self, state: &EncodedState, action: &Action) -> Result<EncodedState> {
        let old = self.decode(state)?;
        if !Self::is_applicable(action, &old) {
            return Err(Error::InapplicableAction(action.to_string()));
        }
        let FluentState { mut pos, mut neg } = old;
        for fluent in &action.effect_rem {
            pos.shift_remove(fluent);
        }
        for fluent in &action.effect_add {
            neg.shift_remove(fluent);
        }
        pos.extend(action.effect_add.iter().cloned());
        neg.extend(action.effect_rem.iter().cloned());
        self.encode(&FluentState { pos, neg })
    }

    /// True when every goal fluent holds. Goal fluents the state map does not
    /// track never hold.
    pub fn goal_test(&self, state: &EncodedState) -> Result<bool> {
        let decoded = self.decode(state)?;
        Ok(self.goal.iter().all(|fluent| decoded.holds(fluent)))
    }
}
