use serde::{Deserialize, Serialize};

use super::snapshot::{ActivePlayer, ChampionStats, EventLog, GameData, RawEvent, RawPlayer};

/// Canonical team identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamSide {
    Blue,
    Red,
}

impl TeamSide {
    /// Both sides, in the order teams are published
    pub const ALL: [TeamSide; 2] = [TeamSide::Blue, TeamSide::Red];

    /// Numeric team id used by the client (100 / 200)
    pub fn team_id(self) -> u16 {
        match self {
            TeamSide::Blue => 100,
            TeamSide::Red => 200,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Blue => "BLUE",
            TeamSide::Red => "RED",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Blue => TeamSide::Red,
            TeamSide::Red => TeamSide::Blue,
        }
    }

    fn index(self) -> usize {
        match self {
            TeamSide::Blue => 0,
            TeamSide::Red => 1,
        }
    }
}

/// Display-ready snapshot of a match.
///
/// Built wholesale by the transformer on every successful poll and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub game_stats: GameData,
    pub all_players: Vec<PlayerView>,
    /// Blue first, red second
    pub teams: [TeamRecord; 2],
    pub events: EventLog,
    pub active_player: ActivePlayer,
}

impl ViewModel {
    pub fn team(&self, side: TeamSide) -> &TeamRecord {
        &self.teams[side.index()]
    }

    /// Seconds since match start
    pub fn game_time(&self) -> f64 {
        self.game_stats.game_time
    }

    /// Blue total gold minus red total gold
    pub fn gold_lead(&self) -> f64 {
        self.team(TeamSide::Blue).total_gold - self.team(TeamSide::Red).total_gold
    }

    /// Last `limit` significant events, most recent first
    pub fn recent_events(&self, limit: usize) -> Vec<&RawEvent> {
        let significant: Vec<&RawEvent> = self
            .events
            .events
            .iter()
            .filter(|e| e.kind().is_significant())
            .collect();

        let skip = significant.len().saturating_sub(limit);
        significant.into_iter().skip(skip).rev().collect()
    }
}

/// A player with computed gold and, for the active player, merged live stats
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    #[serde(flatten)]
    pub player: RawPlayer,

    /// Banked gold (active player only) plus item value
    pub total_gold: f64,

    pub is_active_player: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_gold: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion_stats: Option<ChampionStats>,
}

/// Aggregated per-team record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    #[serde(rename = "teamID")]
    pub team_id: u16,
    pub team: TeamSide,
    pub total_gold: f64,
    pub score: TeamScore,
    pub objectives: TeamObjectives,
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamScore {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

/// Objectives credited to one team
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamObjectives {
    pub dragons: u32,
    pub dragon_types: Vec<String>,
    pub turrets: u32,
    pub inhibitors: u32,
    pub barons: u32,
    pub heralds: u32,
    pub first_blood: bool,
}

/// Format seconds as `m:ss`
pub fn format_game_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, time: f64) -> RawEvent {
        RawEvent {
            event_name: name.to_string(),
            event_time: time,
            ..Default::default()
        }
    }

    fn empty_team(side: TeamSide, total_gold: f64) -> TeamRecord {
        TeamRecord {
            team_id: side.team_id(),
            team: side,
            total_gold,
            score: TeamScore::default(),
            objectives: TeamObjectives::default(),
            players: Vec::new(),
        }
    }

    fn view(events: Vec<RawEvent>) -> ViewModel {
        ViewModel {
            game_stats: GameData {
                game_time: 754.9,
                ..Default::default()
            },
            all_players: Vec::new(),
            teams: [
                empty_team(TeamSide::Blue, 12_000.0),
                empty_team(TeamSide::Red, 10_500.0),
            ],
            events: EventLog {
                events,
                ..Default::default()
            },
            active_player: ActivePlayer::default(),
        }
    }

    #[test]
    fn test_format_game_time() {
        assert_eq!(format_game_time(0.0), "0:00");
        assert_eq!(format_game_time(65.7), "1:05");
        assert_eq!(format_game_time(754.9), "12:34");
        assert_eq!(format_game_time(-3.0), "0:00");
    }

    #[test]
    fn test_recent_events_most_recent_first() {
        let model = view(vec![
            event("GameStart", 0.0),
            event("MinionsSpawning", 65.0),
            event("FirstBlood", 120.0),
            event("ChampionKill", 120.0),
            event("DragonKill", 300.0),
            event("TurretKilled", 400.0),
        ]);

        let recent = model.recent_events(3);
        let names: Vec<&str> = recent.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["TurretKilled", "DragonKill", "ChampionKill"]);

        assert_eq!(model.recent_events(50).len(), 4);
    }

    #[test]
    fn test_team_lookup_and_gold_lead() {
        let model = view(Vec::new());
        assert_eq!(model.team(TeamSide::Blue).team_id, 100);
        assert_eq!(model.team(TeamSide::Red).team_id, 200);
        assert_eq!(model.gold_lead(), 1_500.0);
        assert_eq!(model.game_time(), 754.9);
    }

    #[test]
    fn test_team_side_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TeamSide::Blue).unwrap(), "\"BLUE\"");
        assert_eq!(TeamSide::Red.opponent(), TeamSide::Blue);
    }
}
