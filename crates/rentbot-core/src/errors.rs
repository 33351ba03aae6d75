use std::path::PathBuf;

/// Core error type for the bot.
///
/// Domain failures (`UnrecognizedMonth`, `MalformedCommand`, `FileNotFound`)
/// are turned into user-facing replies by the command router. Adapter crates
/// map their own failures into `External`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("unrecognized month: {0}")]
    UnrecognizedMonth(String),

    #[error("malformed command: {0}")]
    MalformedCommand(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
