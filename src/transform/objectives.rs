use tracing::debug;

use crate::matching::TeamResolver;
use crate::models::{EventKind, RawEvent, TeamObjectives, TeamSide};

const UNKNOWN_DRAGON: &str = "Unknown";

/// Objectives credited to each side over the whole event log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveTally {
    pub blue_team: TeamObjectives,
    pub red_team: TeamObjectives,
}

impl ObjectiveTally {
    pub fn for_side(&self, side: TeamSide) -> &TeamObjectives {
        match side {
            TeamSide::Blue => &self.blue_team,
            TeamSide::Red => &self.red_team,
        }
    }

    fn for_side_mut(&mut self, side: TeamSide) -> &mut TeamObjectives {
        match side {
            TeamSide::Blue => &mut self.blue_team,
            TeamSide::Red => &mut self.red_team,
        }
    }
}

/// Single pass over the event log crediting objectives to the side that took them.
///
/// Attribution is best effort (see [`TeamResolver`]); an event whose side
/// cannot be resolved is dropped, never guessed.
pub fn extract_objectives(events: &[RawEvent], resolver: &TeamResolver) -> ObjectiveTally {
    let mut tally = ObjectiveTally::default();

    for event in events {
        match event.kind() {
            EventKind::DragonKill => {
                let Some(side) = killer_side(event, resolver) else {
                    drop_event(event);
                    continue;
                };
                let team = tally.for_side_mut(side);
                team.dragons += 1;
                team.dragon_types.push(
                    event
                        .dragon_type
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_DRAGON.to_string()),
                );
            }
            EventKind::BaronKill => match killer_side(event, resolver) {
                Some(side) => tally.for_side_mut(side).barons += 1,
                None => drop_event(event),
            },
            EventKind::HeraldKill => match killer_side(event, resolver) {
                Some(side) => tally.for_side_mut(side).heralds += 1,
                None => drop_event(event),
            },
            EventKind::TurretKilled => {
                match structure_credit(event.turret_killed.as_deref(), event, resolver) {
                    Some(side) => tally.for_side_mut(side).turrets += 1,
                    None => drop_event(event),
                }
            }
            EventKind::InhibKilled => {
                match structure_credit(event.inhib_killed.as_deref(), event, resolver) {
                    Some(side) => tally.for_side_mut(side).inhibitors += 1,
                    None => drop_event(event),
                }
            }
            EventKind::BuildingKill => match building_class(event) {
                Some(Building::Tower) => {
                    match structure_credit(event.turret_killed.as_deref(), event, resolver) {
                        Some(side) => tally.for_side_mut(side).turrets += 1,
                        None => drop_event(event),
                    }
                }
                Some(Building::Inhibitor) => {
                    match structure_credit(event.inhib_killed.as_deref(), event, resolver) {
                        Some(side) => tally.for_side_mut(side).inhibitors += 1,
                        None => drop_event(event),
                    }
                }
                None => {}
            },
            EventKind::FirstBlood => {
                if tally.blue_team.first_blood || tally.red_team.first_blood {
                    continue;
                }
                let recipient = event.recipient.as_deref().or(event.killer_name.as_deref());
                match recipient.and_then(|name| resolver.resolve_name(name)) {
                    Some(side) => tally.for_side_mut(side).first_blood = true,
                    None => drop_event(event),
                }
            }
            _ => {}
        }
    }

    tally
}

enum Building {
    Tower,
    Inhibitor,
}

fn building_class(event: &RawEvent) -> Option<Building> {
    let building = event.building_type.as_deref()?.to_uppercase();
    if building.contains("TOWER") || building.contains("TURRET") {
        Some(Building::Tower)
    } else if building.contains("INHIBITOR") {
        Some(Building::Inhibitor)
    } else {
        None
    }
}

fn killer_side(event: &RawEvent, resolver: &TeamResolver) -> Option<TeamSide> {
    event
        .killer_name
        .as_deref()
        .and_then(|name| resolver.resolve_name(name))
}

/// The destroyed structure's owner loses it, so the opponent gets the credit.
/// Falls back to the killer when the identifier is absent or inconclusive.
fn structure_credit(
    identifier: Option<&str>,
    event: &RawEvent,
    resolver: &TeamResolver,
) -> Option<TeamSide> {
    identifier
        .and_then(TeamResolver::structure_owner)
        .map(TeamSide::opponent)
        .or_else(|| killer_side(event, resolver))
}

fn drop_event(event: &RawEvent) {
    debug!(
        "Dropping unattributed {} at {:.0}s (killer: {:?})",
        event.event_name, event.event_time, event.killer_name
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, killer: &str) -> RawEvent {
        RawEvent {
            event_name: name.to_string(),
            killer_name: Some(killer.to_string()),
            ..Default::default()
        }
    }

    fn dragon(killer: &str, kind: Option<&str>) -> RawEvent {
        RawEvent {
            dragon_type: kind.map(str::to_string),
            ..event("DragonKill", killer)
        }
    }

    fn turret(killer: &str, turret: Option<&str>) -> RawEvent {
        RawEvent {
            turret_killed: turret.map(str::to_string),
            ..event("TurretKilled", killer)
        }
    }

    #[test]
    fn test_dragon_attribution_by_killer_token() {
        let resolver = TeamResolver::new();

        let tally = extract_objectives(&[dragon("T1_TopLaner", Some("Infernal"))], &resolver);
        assert_eq!(tally.blue_team.dragons, 1);
        assert_eq!(tally.blue_team.dragon_types, vec!["Infernal"]);
        assert_eq!(tally.red_team.dragons, 0);

        let tally = extract_objectives(&[dragon("T2_TopLaner", Some("Infernal"))], &resolver);
        assert_eq!(tally.red_team.dragons, 1);
        assert_eq!(tally.red_team.dragon_types, vec!["Infernal"]);
        assert_eq!(tally.blue_team.dragons, 0);
    }

    #[test]
    fn test_dragon_type_defaults_to_unknown() {
        let tally = extract_objectives(&[dragon("T1_Jungle", None)], &TeamResolver::new());
        assert_eq!(tally.blue_team.dragon_types, vec!["Unknown"]);
    }

    #[test]
    fn test_dragon_attribution_by_roster() {
        let mut resolver = TeamResolver::new();
        resolver.add_player("Canyon", TeamSide::Red);

        let tally = extract_objectives(&[dragon("Canyon", Some("Ocean"))], &resolver);
        assert_eq!(tally.red_team.dragons, 1);
        assert_eq!(tally.red_team.dragon_types, vec!["Ocean"]);
    }

    #[test]
    fn test_turret_credit_goes_to_opponent_of_owner() {
        let resolver = TeamResolver::new();
        let events = [
            turret("Minion_T200L0S14N0022", Some("Turret_T1_L_03_A")),
            turret("T1_Support", Some("Turret_T2_C_05_A")),
        ];

        let tally = extract_objectives(&events, &resolver);
        assert_eq!(tally.red_team.turrets, 1);
        assert_eq!(tally.blue_team.turrets, 1);
    }

    #[test]
    fn test_turret_identifier_wins_over_killer() {
        // A blue-looking killer on a blue-owned turret: identifier decides
        let tally = extract_objectives(
            &[turret("T1_Mid", Some("Turret_T1_R_02_A"))],
            &TeamResolver::new(),
        );
        assert_eq!(tally.red_team.turrets, 1);
        assert_eq!(tally.blue_team.turrets, 0);
    }

    #[test]
    fn test_turret_falls_back_to_killer() {
        let resolver = TeamResolver::new();
        let events = [
            turret("T2_Adc", None),
            turret("T1_Adc", Some("Turret_Unknown")),
        ];

        let tally = extract_objectives(&events, &resolver);
        assert_eq!(tally.red_team.turrets, 1);
        assert_eq!(tally.blue_team.turrets, 1);
    }

    #[test]
    fn test_building_kill_towers_and_inhibitors() {
        let tower = RawEvent {
            building_type: Some("TOWER_BUILDING".to_string()),
            turret_killed: Some("Turret_T2_L_03_A".to_string()),
            ..event("BuildingKill", "Somebody")
        };
        let inhibitor = RawEvent {
            building_type: Some("INHIBITOR_BUILDING".to_string()),
            inhib_killed: Some("Barracks_T1_L1".to_string()),
            ..event("BuildingKill", "Somebody")
        };
        let nexus = RawEvent {
            building_type: Some("NEXUS_BUILDING".to_string()),
            ..event("BuildingKill", "T1_Top")
        };

        let tally = extract_objectives(&[tower, inhibitor, nexus], &TeamResolver::new());
        assert_eq!(tally.blue_team.turrets, 1);
        assert_eq!(tally.red_team.inhibitors, 1);
        assert_eq!(tally.blue_team.inhibitors + tally.red_team.turrets, 0);
    }

    #[test]
    fn test_unresolvable_events_are_dropped() {
        let resolver = TeamResolver::new();
        let events = [
            dragon("SRU_Dragon_Elder", Some("Elder")),
            turret("Somebody", None),
            event("BaronKill", "Nobody"),
            RawEvent {
                event_name: "DragonKill".to_string(),
                ..Default::default()
            },
        ];

        let tally = extract_objectives(&events, &resolver);
        assert_eq!(tally, ObjectiveTally::default());
    }

    #[test]
    fn test_barons_heralds_inhibitors_and_first_blood() {
        let mut resolver = TeamResolver::new();
        resolver.add_player("Keria", TeamSide::Blue);
        resolver.add_player("Oner", TeamSide::Red);

        let events = [
            RawEvent {
                recipient: Some("Keria".to_string()),
                ..event("FirstBlood", "")
            },
            event("HeraldKill", "Oner"),
            event("BaronKill", "Keria"),
            RawEvent {
                inhib_killed: Some("Barracks_T2_C1".to_string()),
                ..event("InhibKilled", "Oner")
            },
            RawEvent {
                recipient: Some("Oner".to_string()),
                ..event("FirstBlood", "")
            },
        ];

        let tally = extract_objectives(&events, &resolver);
        assert!(tally.blue_team.first_blood);
        assert!(!tally.red_team.first_blood);
        assert_eq!(tally.red_team.heralds, 1);
        assert_eq!(tally.blue_team.barons, 1);
        assert_eq!(tally.blue_team.inhibitors, 1);
    }

    #[test]
    fn test_ignores_other_events() {
        let events = [
            event("GameStart", ""),
            event("ChampionKill", "T1_Top"),
            event("Multikill", "T1_Top"),
        ];
        assert_eq!(
            extract_objectives(&events, &TeamResolver::new()),
            ObjectiveTally::default()
        );
    }
}
