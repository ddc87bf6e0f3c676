//! Pure mapping from a raw live-client snapshot to the overlay view model.

pub mod objectives;
pub mod validate;

pub use objectives::{extract_objectives, ObjectiveTally};
pub use validate::{is_valid_snapshot, validate_snapshot, ValidationError};

use crate::matching::TeamResolver;
use crate::models::{
    ActivePlayer, PlayerView, RawItem, RawPlayer, RawSnapshot, TeamRecord, TeamScore, TeamSide, ViewModel,
};

/// Build the view model for a validated snapshot.
///
/// No I/O and no side effects: the same input always yields a structurally
/// equal result.
pub fn transform(raw: &RawSnapshot) -> ViewModel {
    let all_players: Vec<PlayerView> = raw
        .all_players
        .iter()
        .map(|player| enrich_player(player, &raw.active_player))
        .collect();

    let resolver = TeamResolver::from_players(&raw.all_players);
    let objectives = extract_objectives(&raw.events.events, &resolver);
    let teams = build_teams(&all_players, &objectives);

    ViewModel {
        game_stats: raw.game_data.clone(),
        all_players,
        teams,
        events: raw.events.clone(),
        active_player: raw.active_player.clone(),
    }
}

/// Approximate a player's gold.
///
/// The client only reports banked gold for the active player, so everyone
/// else starts from zero. Item prices are added on top.
pub fn compute_player_gold(player: &RawPlayer, active_player: &ActivePlayer) -> f64 {
    let banked = if active_player.is_player(player) {
        active_player.current_gold.unwrap_or(0.0)
    } else {
        0.0
    };

    banked + player.items.iter().map(RawItem::price).sum::<f64>()
}

/// Attach computed gold, and for the active player its live stats
fn enrich_player(player: &RawPlayer, active_player: &ActivePlayer) -> PlayerView {
    let total_gold = compute_player_gold(player, active_player);

    if !active_player.is_player(player) {
        return PlayerView {
            player: player.clone(),
            total_gold,
            is_active_player: false,
            current_gold: None,
            champion_stats: None,
        };
    }

    let mut player = player.clone();
    if let Some(level) = active_player.level {
        player.level = Some(level);
    }

    PlayerView {
        player,
        total_gold,
        is_active_player: true,
        current_gold: active_player.current_gold,
        champion_stats: active_player.champion_stats.clone(),
    }
}

/// Partition players by canonical team and aggregate each side.
///
/// Always returns blue then red, zeroed when a side has no players. Players
/// whose team tag is not recognised land in neither record.
pub fn build_teams(players: &[PlayerView], objectives: &ObjectiveTally) -> [TeamRecord; 2] {
    TeamSide::ALL.map(|side| {
        let members: Vec<PlayerView> = players
            .iter()
            .filter(|p| TeamSide::from_tag(&p.player.team) == Some(side))
            .cloned()
            .collect();

        let total_gold = members.iter().map(|p| p.total_gold).sum::<f64>();
        let score = members.iter().fold(TeamScore::default(), |mut acc, p| {
            acc.kills = acc.kills.saturating_add(p.player.scores.kills());
            acc.deaths = acc.deaths.saturating_add(p.player.scores.deaths());
            acc.assists = acc.assists.saturating_add(p.player.scores.assists());
            acc
        });

        TeamRecord {
            team_id: side.team_id(),
            team: side,
            total_gold,
            score,
            objectives: objectives.for_side(side).clone(),
            players: members,
        }
    })
}
