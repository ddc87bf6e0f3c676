use std::collections::HashMap;

use tracing::debug;

use crate::models::{RawPlayer, TeamSide};

/// Map the client's internal team tags onto canonical names.
///
/// `ORDER` becomes `BLUE`, `CHAOS` becomes `RED`; anything else (including an
/// already canonical `BLUE` / `RED`) is returned unchanged.
pub fn canonicalize_team(tag: &str) -> &str {
    match tag {
        "ORDER" => "BLUE",
        "CHAOS" => "RED",
        other => other,
    }
}

impl TeamSide {
    /// Canonical side for a raw team tag, if it names one
    pub fn from_tag(tag: &str) -> Option<Self> {
        match canonicalize_team(tag) {
            "BLUE" => Some(TeamSide::Blue),
            "RED" => Some(TeamSide::Red),
            _ => None,
        }
    }
}

/// Best-effort team attribution for names that appear in the event log.
///
/// Event payloads rarely carry a clean team id, so attribution relies on the
/// roster first and on naming conventions second. The result can be wrong; a
/// name that is ambiguous or carries no hint resolves to `None` and callers
/// drop the event rather than guess.
pub struct TeamResolver {
    /// Map of summoner name / Riot ID -> side
    roster: HashMap<String, TeamSide>,
}

impl TeamResolver {
    /// Create a resolver with an empty roster
    pub fn new() -> Self {
        Self {
            roster: HashMap::new(),
        }
    }

    /// Build a resolver from the players of a snapshot
    pub fn from_players(players: &[RawPlayer]) -> Self {
        let mut resolver = Self::new();

        for player in players {
            let Some(side) = TeamSide::from_tag(&player.team) else {
                debug!(
                    "Player {} has unrecognised team tag {:?}",
                    player.summoner_name, player.team
                );
                continue;
            };

            if !player.summoner_name.is_empty() {
                resolver.add_player(&player.summoner_name, side);
            }
            if let Some(riot_id) = player.riot_id.as_deref().filter(|id| !id.is_empty()) {
                resolver.add_player(riot_id, side);
            }
        }

        resolver
    }

    /// Add a roster entry
    pub fn add_player(&mut self, name: &str, side: TeamSide) {
        self.roster.insert(name.to_string(), side);
    }

    /// Resolve the team of a killer / recipient name.
    ///
    /// Roster match wins. Otherwise `T1` / `T2` tokens decide, then
    /// `blue`/`order` vs `red`/`chaos` substrings (case-insensitive).
    pub fn resolve_name(&self, name: &str) -> Option<TeamSide> {
        if let Some(side) = self.roster.get(name) {
            return Some(*side);
        }

        let by_tag = exclusive(name.contains("T1"), name.contains("T2"));
        if by_tag.is_some() {
            return by_tag;
        }

        let lower = name.to_lowercase();
        exclusive(
            lower.contains("blue") || lower.contains("order"),
            lower.contains("red") || lower.contains("chaos"),
        )
    }

    /// Resolve which side owns a structure from its identifier.
    ///
    /// `T1` structures belong to blue, `T2` structures to red.
    pub fn structure_owner(identifier: &str) -> Option<TeamSide> {
        exclusive(identifier.contains("T1"), identifier.contains("T2"))
    }
}

impl Default for TeamResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Exactly one hint must be present
fn exclusive(blue: bool, red: bool) -> Option<TeamSide> {
    match (blue, red) {
        (true, false) => Some(TeamSide::Blue),
        (false, true) => Some(TeamSide::Red),
        _ => None,
    }
}
