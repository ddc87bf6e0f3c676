pub mod team_resolver;

pub use team_resolver::{canonicalize_team, TeamResolver};
