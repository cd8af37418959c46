//! Crate error type

use crate::types::ReasonCode;

/// Errors raised by the store, the shop and configuration loading.
///
/// Score computation and reward draws never fail on input; only the
/// surrounding persistence and affordability checks produce errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("checksum mismatch in {kind} store")]
    Corrupt { kind: String },

    #[error("insufficient points: need {needed}, have {available}")]
    InsufficientPoints { needed: u64, available: u64 },

    #[error("unknown loot box: {0}")]
    UnknownLootBox(String),

    #[error("invalid reward table: {0}")]
    InvalidTable(String),
}

impl Error {
    /// Domain reason code, if the error is a player-facing refusal
    pub fn reason_code(&self) -> Option<ReasonCode> {
        match self {
            Error::InsufficientPoints { .. } => Some(ReasonCode::R203_INSUFFICIENT_POINTS),
            Error::UnknownLootBox(_) => Some(ReasonCode::R204_UNKNOWN_LOOT_BOX),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
