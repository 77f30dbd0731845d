use thiserror::Error;

/// Why a player action was rejected. A rejected action changes nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown id `{0}`")]
    InvalidId(String),
    #[error("cannot afford `{0}`")]
    Unaffordable(String),
    #[error("`{0}` is already owned")]
    AlreadyOwned(String),
    #[error("`{0}` is already active")]
    AlreadyActive(String),
    #[error("not enough free believers for `{id}` (need {needed}, have {available})")]
    InsufficientBelievers {
        id: String,
        needed: u64,
        available: u64,
    },
    #[error("`{0}` requires `{1}` first")]
    PrerequisiteMissing(String, String),
    #[error("not eligible: {0}")]
    NotEligible(&'static str),
    #[error("nothing to claim")]
    NothingToClaim,
}
