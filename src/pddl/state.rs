use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use super::error::{Error, Result};
use super::predicate::Fluent;

/// World state in open-world literal form: `pos` holds the fluents asserted
/// true, `neg` the fluents asserted false. Equality ignores ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FluentState {
    pub pos: IndexSet<Fluent>,
    pub neg: IndexSet<Fluent>,
}

impl FluentState {
    pub fn new<P, N>(pos: P, neg: N) -> FluentState
    where
        P: IntoIterator<Item = Fluent>,
        N: IntoIterator<Item = Fluent>,
    {
        FluentState {
            pos: pos.into_iter().collect(),
            neg: neg.into_iter().collect(),
        }
    }

    #[inline]
    pub fn holds(&self, fluent: &Fluent) -> bool {
        self.pos.contains(fluent)
    }

    /// True when every fluent of `required` holds and none of `forbidden` does.
    pub fn satisfies(&self, required: &[Fluent], forbidden: &[Fluent]) -> bool {
        required.iter().all(|f| self.holds(f)) && !forbidden.iter().any(|f| self.holds(f))
    }

    pub fn contradiction(&self) -> Option<&Fluent> {
        self.pos.iter().find(|f| self.neg.contains(*f))
    }
}

/// Ordered list of all fluents tracked by a problem. Position `i` of every
/// encoded state refers to `fluents[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMap {
    fluents: Vec<Fluent>,
    index: HashMap<Fluent, usize>,
}

impl StateMap {
    pub fn new(fluents: Vec<Fluent>) -> Result<StateMap> {
        let mut index = HashMap::with_capacity(fluents.len());
        for (idx, fluent) in fluents.iter().enumerate() {
            if index.insert(fluent.clone(), idx).is_some() {
                return Err(Error::DuplicateFluent(fluent.clone()));
            }
        }
        Ok(StateMap { fluents, index })
    }

    /// `initial.pos` followed by `initial.neg`.
    pub fn from_initial(initial: &FluentState) -> Result<StateMap> {
        if let Some(fluent) = initial.contradiction() {
            return Err(Error::ContradictoryFluent(fluent.clone()));
        }
        StateMap::new(initial.pos.iter().chain(initial.neg.iter()).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.fluents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluents.is_empty()
    }

    pub fn fluents(&self) -> &[Fluent] {
        &self.fluents
    }

    pub fn position(&self, fluent: &Fluent) -> Option<usize> {
        self.index.get(fluent).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fluent> {
        self.fluents.iter()
    }
}

/// Fixed-width truth vector over a [`StateMap`], written as a `T`/`F` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncodedState(Vec<bool>);

impl EncodedState {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<bool> {
        self.0.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl fmt::Display for EncodedState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", if *bit { 'T' } else { 'F' })?;
        }
        Ok(())
    }
}

impl FromStr for EncodedState {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(index, symbol)| match symbol {
                'T' => Ok(true),
                'F' => Ok(false),
                _ => Err(Error::InvalidStateSymbol { index, symbol }),
            })
            .collect::<Result<Vec<bool>>>()
            .map(EncodedState)
    }
}

/// Emits `T` for every map fluent in `state.pos` and `F` for every one in
/// `state.neg`. Fluents outside the map are ignored.
pub fn encode(state: &FluentState, state_map: &StateMap) -> Result<EncodedState> {
    state_map
        .iter()
        .map(|fluent| {
            if state.pos.contains(fluent) {
                Ok(true)
            } else if state.neg.contains(fluent) {
                Ok(false)
            } else {
                Err(Error::UncoveredFluent(fluent.clone()))
            }
        })
        .collect::<Result<Vec<bool>>>()
        .map(EncodedState)
}

pub fn decode(state: &EncodedState, state_map: &StateMap) -> Result<FluentState> {
    if state.len() != state_map.len() {
        return Err(Error::StateLength {
            expected: state_map.len(),
            found: state.len(),
        });
    }
    let mut decoded = FluentState::default();
    for (fluent, bit) in state_map.iter().zip(state.as_slice()) {
        if *bit {
            decoded.pos.insert(fluent.clone());
        } else {
            decoded.neg.insert(fluent.clone());
        }
    }
    Ok(decoded)
}
