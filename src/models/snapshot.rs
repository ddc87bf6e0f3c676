use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One `/allgamedata` payload from the live client API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    /// The player running the client (empty-ish when spectating)
    pub active_player: ActivePlayer,

    /// Every participant in the match, in client order
    pub all_players: Vec<RawPlayer>,

    /// Event log wrapper (`{"Events": [...]}`)
    pub events: EventLog,

    /// Match metadata
    pub game_data: GameData,
}

/// The locally controlled player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summoner_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riot_id: Option<String>,

    /// Banked gold, only ever reported for the active player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_gold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_stats: Option<ChampionStats>,

    /// Abilities, runes and anything else the client sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivePlayer {
    /// Whether `player` is this active player.
    ///
    /// Matches on summoner name first, then on Riot ID when both sides carry one.
    pub fn is_player(&self, player: &RawPlayer) -> bool {
        if let Some(name) = self.summoner_name.as_deref() {
            if !name.is_empty() && name == player.summoner_name {
                return true;
            }
        }

        matches!(
            (self.riot_id.as_deref(), player.riot_id.as_deref()),
            (Some(ours), Some(theirs)) if !ours.is_empty() && ours == theirs
        )
    }
}

/// Extended champion stats, reported for the active player only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampionStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability_haste: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability_power: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_damage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit_chance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_health: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_regen_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic_resist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_health: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_value: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A participant as reported in `allPlayers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    #[serde(default)]
    pub summoner_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riot_id: Option<String>,

    /// `ORDER` / `CHAOS`, or already `BLUE` / `RED`
    #[serde(default)]
    pub team: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    #[serde(default)]
    pub scores: PlayerScores,

    #[serde(default)]
    pub items: Vec<RawItem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-player scoreboard.
///
/// Fields the client omitted stay omitted on the way back out; the
/// accessors read them as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kills: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creep_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward_score: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerScores {
    pub fn kills(&self) -> u32 {
        self.kills.unwrap_or(0)
    }

    pub fn deaths(&self) -> u32 {
        self.deaths.unwrap_or(0)
    }

    pub fn assists(&self) -> u32 {
        self.assists.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(rename = "itemID", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,

    /// `rawDescription`, `canUse`, `consumable`, `count` and the rest
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawItem {
    /// Missing price counts as zero toward gold totals
    pub fn price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// `events` wrapper object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    #[serde(rename = "Events", default)]
    pub events: Vec<RawEvent>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single entry of the event log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEvent {
    #[serde(rename = "EventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<u64>,

    #[serde(default)]
    pub event_name: String,

    /// Seconds since match start
    #[serde(default)]
    pub event_time: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victim_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assisters: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dragon_type: Option<String>,

    /// Structure identifier, e.g. `Turret_T1_C_05_A`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turret_killed: Option<String>,

    /// Structure identifier, e.g. `Barracks_T2_L1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inhib_killed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,

    /// First blood recipient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from_name(&self.event_name)
    }
}

/// Event names the overlay knows how to interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    GameStart,
    MinionsSpawning,
    FirstBrick,
    FirstBlood,
    ChampionKill,
    Multikill,
    Ace,
    DragonKill,
    HeraldKill,
    BaronKill,
    TurretKilled,
    BuildingKill,
    InhibKilled,
    InhibRespawningSoon,
    InhibRespawned,
    GameEnd,
    Other,
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "GameStart" => EventKind::GameStart,
            "MinionsSpawning" => EventKind::MinionsSpawning,
            "FirstBrick" => EventKind::FirstBrick,
            "FirstBlood" => EventKind::FirstBlood,
            "ChampionKill" => EventKind::ChampionKill,
            "Multikill" => EventKind::Multikill,
            "Ace" => EventKind::Ace,
            "DragonKill" => EventKind::DragonKill,
            "HeraldKill" => EventKind::HeraldKill,
            "BaronKill" => EventKind::BaronKill,
            "TurretKilled" => EventKind::TurretKilled,
            "BuildingKill" => EventKind::BuildingKill,
            "InhibKilled" => EventKind::InhibKilled,
            "InhibRespawningSoon" => EventKind::InhibRespawningSoon,
            "InhibRespawned" => EventKind::InhibRespawned,
            "GameEnd" => EventKind::GameEnd,
            _ => EventKind::Other,
        }
    }

    /// Events worth showing on a timeline
    pub fn is_significant(self) -> bool {
        matches!(
            self,
            EventKind::ChampionKill
                | EventKind::DragonKill
                | EventKind::HeraldKill
                | EventKind::BaronKill
                | EventKind::TurretKilled
                | EventKind::FirstBlood
                | EventKind::InhibKilled
        )
    }
}

/// `gameData` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    /// Seconds since match start
    pub game_time: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_number: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_defaults_missing_scores_and_prices() {
        let player: RawPlayer = serde_json::from_value(json!({
            "summonerName": "Mid",
            "team": "ORDER",
            "championName": "Ahri",
            "level": 7,
            "scores": { "kills": 2 },
            "items": [{ "itemID": 1056, "displayName": "Doran's Ring" }],
            "isBot": false
        }))
        .unwrap();

        assert_eq!(player.scores.kills(), 2);
        assert_eq!(player.scores.deaths(), 0);
        assert_eq!(player.items[0].price(), 0.0);
        assert_eq!(player.extra.get("isBot"), Some(&json!(false)));
    }

    #[test]
    fn test_player_reserializes_as_received() {
        let value = json!({
            "summonerName": "Top",
            "team": "CHAOS",
            "scores": { "kills": 1, "futureStat": 7 },
            "items": [{
                "itemID": 1054,
                "price": 450.0,
                "rawDescription": "GeneratedTip_Item_1054_Description",
                "rawDisplayName": "Item_1054_Name",
                "canUse": false
            }]
        });

        let player: RawPlayer = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(player.scores.deaths(), 0);
        assert_eq!(serde_json::to_value(&player).unwrap(), value);
    }

    #[test]
    fn test_event_log_reserializes_as_received() {
        let value = json!({
            "Events": [{
                "EventID": 9,
                "EventName": "ChampionKill",
                "EventTime": 301.5,
                "KillerName": "Top",
                "VictimName": "Mid",
                "Assisters": []
            }],
            "Truncated": false
        });

        let log: EventLog = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(log.events[0].assisters, Some(vec![]));
        assert_eq!(serde_json::to_value(&log).unwrap(), value);
    }

    #[test]
    fn test_event_fields_use_client_casing() {
        let event: RawEvent = serde_json::from_value(json!({
            "EventID": 4,
            "EventName": "TurretKilled",
            "EventTime": 612.4,
            "KillerName": "Minion_T100L0S14N0022",
            "TurretKilled": "Turret_T2_L_03_A",
            "Assisters": []
        }))
        .unwrap();

        assert_eq!(event.kind(), EventKind::TurretKilled);
        assert_eq!(event.event_id, Some(4));
        assert_eq!(event.turret_killed.as_deref(), Some("Turret_T2_L_03_A"));
    }

    #[test]
    fn test_unknown_event_names() {
        assert_eq!(EventKind::from_name("ChampionKill"), EventKind::ChampionKill);
        assert_eq!(EventKind::from_name("SomethingNew"), EventKind::Other);
        assert!(!EventKind::Other.is_significant());
        assert!(EventKind::InhibKilled.is_significant());
    }

    #[test]
    fn test_active_player_identity() {
        let player = RawPlayer {
            summoner_name: "Faker".to_string(),
            riot_id: Some("Faker#KR1".to_string()),
            ..Default::default()
        };

        let by_name = ActivePlayer {
            summoner_name: Some("Faker".to_string()),
            ..Default::default()
        };
        let by_riot_id = ActivePlayer {
            riot_id: Some("Faker#KR1".to_string()),
            ..Default::default()
        };
        let spectator = ActivePlayer::default();

        assert!(by_name.is_player(&player));
        assert!(by_riot_id.is_player(&player));
        assert!(!spectator.is_player(&player));
    }
}
