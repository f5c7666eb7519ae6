//! Canned air cargo instances of increasing size.
//!
//! Negative literals are listed with the `C2` block ahead of `C1`, so the
//! state maps line up with the published instance tables.

use super::predicate::Fluent;
use super::problem::Problem;
use super::state::FluentState;

/// Every tracked fluent over the given objects that is not in `pos`:
/// `At(cargo, airport)` and `In(cargo, plane)` per cargo, then
/// `At(plane, airport)` per plane.
pub fn negative_closure(pos: &[Fluent], cargos: &[&str], planes: &[&str], airports: &[&str]) -> Vec<Fluent> {
    let mut universe = Vec::new();
    for c in cargos {
        universe.extend(airports.iter().map(|a| Fluent::at(c, a)));
        universe.extend(planes.iter().map(|p| Fluent::inside(c, p)));
    }
    for p in planes {
        universe.extend(airports.iter().map(|a| Fluent::at(p, a)));
    }
    universe.retain(|f| !pos.contains(f));
    universe
}

/// `C2` first, then every other cargo in declaration order.
fn listing_order<'a>(cargos: &[&'a str]) -> Vec<&'a str> {
    let mut order: Vec<&str> = cargos.iter().copied().filter(|c| *c == "C2").collect();
    order.extend(cargos.iter().copied().filter(|c| *c != "C2"));
    order
}

fn build(cargos: &[&str], planes: &[&str], airports: &[&str], pos: Vec<Fluent>, goal: Vec<Fluent>) -> Problem {
    let neg = negative_closure(&pos, &listing_order(cargos), planes, airports);
    match Problem::new(cargos, planes, airports, FluentState::new(pos, neg), goal) {
        Ok(problem) => problem,
        // The closure is disjoint from `pos` by construction.
        Err(e) => unreachable!("canned instance is malformed: {}", e),
    }
}

pub fn air_cargo_p1() -> Problem {
    let cargos = ["C1", "C2"];
    let planes = ["P1", "P2"];
    let airports = ["JFK", "SFO"];
    let pos = vec![
        Fluent::at("C1", "SFO"),
        Fluent::at("C2", "JFK"),
        Fluent::at("P1", "SFO"),
        Fluent::at("P2", "JFK"),
    ];
    let goal = vec![Fluent::at("C1", "JFK"), Fluent::at("C2", "SFO")];
    build(&cargos, &planes, &airports, pos, goal)
}

pub fn air_cargo_p2() -> Problem {
    let cargos = ["C1", "C2", "C3"];
    let planes = ["P1", "P2", "P3"];
    let airports = ["JFK", "SFO", "ATL"];
    let pos = vec![
        Fluent::at("C1", "SFO"),
        Fluent::at("C2", "JFK"),
        Fluent::at("C3", "ATL"),
        Fluent::at("P1", "SFO"),
        Fluent::at("P2", "JFK"),
        Fluent::at("P3", "ATL"),
    ];
    let goal = vec![
        Fluent::at("C1", "JFK"),
        Fluent::at("C2", "SFO"),
        Fluent::at("C3", "SFO"),
    ];
    build(&cargos, &planes, &airports, pos, goal)
}

pub fn air_cargo_p3() -> Problem {
    let cargos = ["C1", "C2", "C3", "C4"];
    let planes = ["P1", "P2"];
    let airports = ["JFK", "SFO", "ATL", "ORD"];
    let pos = vec![
        Fluent::at("C1", "SFO"),
        Fluent::at("C2", "JFK"),
        Fluent::at("C3", "ATL"),
        Fluent::at("C4", "ORD"),
        Fluent::at("P1", "SFO"),
        Fluent::at("P2", "JFK"),
    ];
    let goal = vec![
        Fluent::at("C1", "JFK"),
        Fluent::at("C2", "SFO"),
        Fluent::at("C3", "JFK"),
        Fluent::at("C4", "SFO"),
    ];
    build(&cargos, &planes, &airports, pos, goal)
}
