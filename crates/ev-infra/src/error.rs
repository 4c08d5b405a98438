use ev_core::ChargerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("infrastructure parse error: {0}")]
    Parse(String),

    #[error("charger {charger} declares {plugs} plugs; at least 1 is required")]
    InvalidPlugCount { charger: ChargerId, plugs: usize },

    #[error("charger {0} appears more than once")]
    DuplicateCharger(ChargerId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InfraResult<T> = Result<T, InfraError>;
