pub mod action;
pub mod domain;
pub mod error;
pub mod heuristic;
pub mod instances;
pub mod planning_graph;
pub mod predicate;
pub mod problem;
pub mod search;
pub mod state;

mod utils;

pub use error::{Error, Result};
pub use predicate::{Fluent, Object, Predicate};
pub use problem::Problem;
pub use state::{decode, encode, EncodedState, FluentState, StateMap};
