use thiserror::Error;

use super::predicate::Fluent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("encoded state has {found} symbols but the state map tracks {expected} fluents")]
    StateLength { expected: usize, found: usize },
    #[error("invalid symbol {symbol:?} at position {index} of an encoded state, expected 'T' or 'F'")]
    InvalidStateSymbol { index: usize, symbol: char },
    #[error("fluent {0} is tracked by the state map but is neither true nor false in the state")]
    UncoveredFluent(Fluent),
    #[error("fluent {0} is asserted both true and false")]
    ContradictoryFluent(Fluent),
    #[error("fluent {0} appears more than once in the state map")]
    DuplicateFluent(Fluent),
    #[error("action {0} is not applicable in the given state")]
    InapplicableAction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
