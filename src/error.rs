use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetWorthError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No account at position {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("A snapshot for {0} already exists")]
    SnapshotExists(String),

    #[error("History month {month} must come after {last}")]
    HistoryOrder { month: String, last: String },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, NetWorthError>;
