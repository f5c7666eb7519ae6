//! Air cargo logistics as a classical planning problem.
//!
//! [`pddl::Problem`] grounds the `Load`, `Unload` and `Fly` schemas once and
//! exposes the transition model a search algorithm needs: `actions`,
//! `result` and `goal_test` over states encoded as fixed-width `T`/`F`
//! vectors. Heuristics, a planning graph and a handful of graph searches
//! live alongside it.

pub mod pddl;
