use super::action::Action;
use super::predicate::Object;

/// Every `Load` instance, in cargo / plane / airport order.
pub fn load_actions(cargos: &[Object], planes: &[Object], airports: &[Object]) -> Vec<Action> {
    let mut loads = Vec::with_capacity(cargos.len() * planes.len() * airports.len());
    for c in cargos {
        for p in planes {
            for a in airports {
                loads.push(Action::load(c, p, a));
            }
        }
    }
    loads
}

/// Every `Unload` instance, in cargo / plane / airport order.
pub fn unload_actions(cargos: &[Object], planes: &[Object], airports: &[Object]) -> Vec<Action> {
    let mut unloads = Vec::with_capacity(cargos.len() * planes.len() * airports.len());
    for c in cargos {
        for p in planes {
            for a in airports {
                unloads.push(Action::unload(c, p, a));
            }
        }
    }
    unloads
}

/// Every `Fly` between distinct airports, in origin / destination / plane order.
pub fn fly_actions(planes: &[Object], airports: &[Object]) -> Vec<Action> {
    let mut flys = Vec::new();
    for from in airports {
        for to in airports {
            if from != to {
                for p in planes {
                    flys.push(Action::fly(p, from, to));
                }
            }
        }
    }
    flys
}

/// Grounds the three schemas over the object lists. Loads come first, then
/// unloads, then flights, so action indices are stable between runs.
pub fn ground_actions(cargos: &[Object], planes: &[Object], airports: &[Object]) -> Vec<Action> {
    let mut actions = Vec::with_capacity(action_count(cargos.len(), planes.len(), airports.len()));
    actions.extend(load_actions(cargos, planes, airports));
    actions.extend(unload_actions(cargos, planes, airports));
    actions.extend(fly_actions(planes, airports));
    actions
}

pub fn action_count(cargos: usize, planes: usize, airports: usize) -> usize {
    2 * cargos * planes * airports + planes * airports * airports.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pddl::action::ActionKind;

    fn objects(names: &[&str]) -> Vec<Object> {
        names.iter().map(|n| Object::from(*n)).collect()
    }

    #[test]
    fn count_matches_formula() {
        for (c, p, a) in [(2, 2, 2), (3, 3, 3), (4, 2, 4), (1, 1, 1), (0, 2, 3)] {
            let cargos = objects(&["C1", "C2", "C3", "C4"][..c]);
            let planes = objects(&["P1", "P2", "P3"][..p]);
            let airports = objects(&["JFK", "SFO", "ATL", "ORD"][..a]);
            let actions = ground_actions(&cargos, &planes, &airports);
            assert_eq!(actions.len(), action_count(c, p, a));
            assert_eq!(actions.len(), 2 * c * p * a + p * a * (a - 1));
        }
    }

    #[test]
    fn grounding_order_is_stable() {
        let cargos = objects(&["C1", "C2"]);
        let planes = objects(&["P1", "P2"]);
        let airports = objects(&["JFK", "SFO"]);
        let actions = ground_actions(&cargos, &planes, &airports);
        assert_eq!(actions.len(), 20);
        assert!(actions[..8].iter().all(|a| a.kind == ActionKind::Load));
        assert!(actions[8..16].iter().all(|a| a.kind == ActionKind::Unload));
        assert!(actions[16..].iter().all(|a| a.kind == ActionKind::Fly));
        assert_eq!(actions[0].to_string(), "Load(C1, P1, JFK)");
        assert_eq!(actions[1].to_string(), "Load(C1, P1, SFO)");
        assert_eq!(actions[2].to_string(), "Load(C1, P2, JFK)");
        assert_eq!(actions[16].to_string(), "Fly(P1, JFK, SFO)");
        assert_eq!(actions[17].to_string(), "Fly(P2, JFK, SFO)");
        assert_eq!(actions[18].to_string(), "Fly(P1, SFO, JFK)");
        assert_eq!(actions, ground_actions(&cargos, &planes, &airports));
    }

    #[test]
    fn no_flight_stays_in_place() {
        let airports = objects(&["JFK", "SFO", "ATL"]);
        let flys = fly_actions(&objects(&["P1"]), &airports);
        assert_eq!(flys.len(), 6);
        assert!(flys.iter().all(|f| f.args[1] != f.args[2]));
    }
}
