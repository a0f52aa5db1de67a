//! Error types for the parking lot tracker.

use thiserror::Error;

/// Result type alias for operations that touch persisted state.
pub type Result<T> = std::result::Result<T, LotError>;

/// Errors that abort an operation.
///
/// Malformed records and bad user input never end up here; only failures of
/// the underlying storage do.
#[derive(Error, Debug)]
pub enum LotError {
    /// Failed to read or write the data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Too many command-line arguments
    #[error("Unexpected argument '{0}'. Usage: parking-lots [data.csv]")]
    UnexpectedArgument(String),
}

/// Why a reservation or cancellation was refused.
///
/// A rejection leaves the collection untouched. Messages are user-facing and
/// follow the language of the menu.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// 0-based position is outside `[0, len)`
    #[error("índice inválido, no existe el parqueo {} (hay {len})", .index.saturating_add(1))]
    InvalidIndex { index: usize, len: usize },

    /// 1-based lot number typed by the user that maps to no position (zero)
    #[error("índice inválido, no existe el parqueo {number} (hay {len})")]
    InvalidLotNumber { number: usize, len: usize },

    /// The lot has no free spaces left
    #[error("{name} no tiene espacios libres")]
    NoFreeSpaces { name: String },

    /// The lot has no reservations to cancel
    #[error("{name} no tiene reservas para cancelar")]
    NoReservations { name: String },
}
