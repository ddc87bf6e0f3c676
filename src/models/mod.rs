pub mod overlay_state;
pub mod snapshot;
pub mod view_model;

pub use overlay_state::OverlayState;
pub use snapshot::{
    ActivePlayer, ChampionStats, EventKind, EventLog, GameData, PlayerScores, RawEvent, RawItem,
    RawPlayer, RawSnapshot,
};
pub use view_model::{
    format_game_time, PlayerView, TeamObjectives, TeamRecord, TeamScore, TeamSide, ViewModel,
};
