use std::fmt;
use std::sync::Arc;

/// Interned name of a cargo, plane or airport.
pub type Object = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Predicate {
    At,
    In,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::At => write!(f, "At"),
            Predicate::In => write!(f, "In"),
        }
    }
}

/// Ground atomic proposition such as `At(C1, SFO)` or `In(C1, P1)`.
/// Compared and hashed structurally, never through its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fluent {
    pub predicate: Predicate,
    pub args: [Object; 2],
}

impl Fluent {
    pub fn new(predicate: Predicate, first: &Object, second: &Object) -> Fluent {
        Fluent {
            predicate,
            args: [first.clone(), second.clone()],
        }
    }

    /// `At(object, location)`
    pub fn at(object: &str, location: &str) -> Fluent {
        Fluent {
            predicate: Predicate::At,
            args: [Object::from(object), Object::from(location)],
        }
    }

    /// `In(cargo, plane)`
    pub fn inside(cargo: &str, plane: &str) -> Fluent {
        Fluent {
            predicate: Predicate::In,
            args: [Object::from(cargo), Object::from(plane)],
        }
    }
}

impl fmt::Display for Fluent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.predicate, super::utils::build_arg_string(&self.args))
    }
}
