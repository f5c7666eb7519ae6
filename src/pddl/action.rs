use std::fmt;
use super::predicate::{Fluent, Object, Predicate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Load,
    Unload,
    Fly,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActionKind::Load => write!(f, "Load"),
            ActionKind::Unload => write!(f, "Unload"),
            ActionKind::Fly => write!(f, "Fly"),
        }
    }
}

/// Fully grounded action: preconditions split into fluents that must hold and
/// fluents that must not, effects split into an add list and a remove list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub kind: ActionKind,
    pub args: Vec<Object>,
    pub precond_pos: Vec<Fluent>,
    pub precond_neg: Vec<Fluent>,
    pub effect_add: Vec<Fluent>,
    pub effect_rem: Vec<Fluent>,
}

impl Action {
    /// `Load(cargo, plane, airport)`: both at the airport, cargo ends up in the plane.
    pub fn load(cargo: &Object, plane: &Object, airport: &Object) -> Action {
        Action {
            kind: ActionKind::Load,
            args: vec![cargo.clone(), plane.clone(), airport.clone()],
            precond_pos: vec![
                Fluent::new(Predicate::At, cargo, airport),
                Fluent::new(Predicate::At, plane, airport),
            ],
            precond_neg: Vec::new(),
            effect_add: vec![Fluent::new(Predicate::In, cargo, plane)],
            effect_rem: vec![Fluent::new(Predicate::At, cargo, airport)],
        }
    }

    /// `Unload(cargo, plane, airport)`: cargo in the plane, plane at the airport.
    pub fn unload(cargo: &Object, plane: &Object, airport: &Object) -> Action {
        Action {
            kind: ActionKind::Unload,
            args: vec![cargo.clone(), plane.clone(), airport.clone()],
            precond_pos: vec![
                Fluent::new(Predicate::In, cargo, plane),
                Fluent::new(Predicate::At, plane, airport),
            ],
            precond_neg: Vec::new(),
            effect_add: vec![Fluent::new(Predicate::At, cargo, airport)],
            effect_rem: vec![Fluent::new(Predicate::In, cargo, plane)],
        }
    }

    /// `Fly(plane, from, to)`
    pub fn fly(plane: &Object, from: &Object, to: &Object) -> Action {
        Action {
            kind: ActionKind::Fly,
            args: vec![plane.clone(), from.clone(), to.clone()],
            precond_pos: vec![Fluent::new(Predicate::At, plane, from)],
            precond_neg: Vec::new(),
            effect_add: vec![Fluent::new(Predicate::At, plane, to)],
            effect_rem: vec![Fluent::new(Predicate::At, plane, from)],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use super::utils::build_arg_string;
        write!(f, "{}({})", self.kind, build_arg_string(&self.args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects() -> (Object, Object, Object) {
        (Object::from("C1"), Object::from("P1"), Object::from("SFO"))
    }

    #[test]
    fn load_moves_cargo_into_plane() {
        let (c, p, a) = objects();
        let load = Action::load(&c, &p, &a);
        assert_eq!(load.to_string(), "Load(C1, P1, SFO)");
        assert_eq!(load.precond_pos, vec![Fluent::at("C1", "SFO"), Fluent::at("P1", "SFO")]);
        assert!(load.precond_neg.is_empty());
        assert_eq!(load.effect_add, vec![Fluent::inside("C1", "P1")]);
        assert_eq!(load.effect_rem, vec![Fluent::at("C1", "SFO")]);
    }

    #[test]
    fn unload_is_the_inverse_of_load() {
        let (c, p, a) = objects();
        let load = Action::load(&c, &p, &a);
        let unload = Action::unload(&c, &p, &a);
        assert_eq!(unload.effect_add, load.effect_rem);
        assert_eq!(unload.effect_rem, load.effect_add);
        assert!(unload.precond_pos.contains(&Fluent::inside("C1", "P1")));
    }

    #[test]
    fn fly_relocates_plane() {
        let fly = Action::fly(&Object::from("P1"), &Object::from("SFO"), &Object::from("JFK"));
        assert_eq!(fly.to_string(), "Fly(P1, SFO, JFK)");
        assert_eq!(fly.precond_pos, vec![Fluent::at("P1", "SFO")]);
        assert_eq!(fly.effect_add, vec![Fluent::at("P1", "JFK")]);
        assert_eq!(fly.effect_rem, vec![Fluent::at("P1", "SFO")]);
    }
}
