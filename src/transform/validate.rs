use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::RawSnapshot;

/// Top-level fields every `/allgamedata` payload must carry
const REQUIRED_FIELDS: [&str; 4] = ["activePlayer", "allPlayers", "events", "gameData"];

/// A parsed payload that does not have the shape of a snapshot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("snapshot is not a JSON object")]
    NotAnObject,

    #[error("snapshot is missing `{0}`")]
    MissingField(&'static str),

    #[error("`{0}` is not a sequence")]
    NotASequence(&'static str),

    #[error("snapshot is malformed: {0}")]
    Malformed(String),
}

/// Structural gate: the four required fields are present and `allPlayers` is an array
pub fn is_valid_snapshot(value: &Value) -> bool {
    check_structure(value).is_ok()
}

/// Check the structure of `value` and decode it into a typed snapshot
pub fn validate_snapshot(value: &Value) -> Result<RawSnapshot, ValidationError> {
    check_structure(value)?;
    RawSnapshot::deserialize(value).map_err(|e| ValidationError::Malformed(e.to_string()))
}

fn check_structure(value: &Value) -> Result<(), ValidationError> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) => return Err(ValidationError::MissingField(field)),
            Some(_) => {}
        }
    }

    if !object["allPlayers"].is_array() {
        return Err(ValidationError::NotASequence("allPlayers"));
    }

    Ok(())
}
