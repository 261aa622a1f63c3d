use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubedError {
    #[error("no .env credential store found (searched {} and its parents)", .0.display())]
    StoreNotFound(PathBuf),

    #[error("VAULT_TOKEN not set in the environment or the credential store")]
    TokenMissing,

    #[error("cluster map not found; searched:\n{searched}")]
    MapNotFound { searched: String },

    #[error("invalid cluster map {}: {source}", .path.display())]
    MapParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("cluster '{name}' not found. Available: {available}")]
    ClusterNotFound { name: String, available: String },

    #[error("cannot read inventory {}: {source}", .path.display())]
    InventoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid inventory {}: {source}", .path.display())]
    InventoryParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("cannot determine home directory")]
    HomeMissing,

    #[error("missing directory {}", .0.display())]
    WorkdirMissing(PathBuf),

    #[error("sign-on script not found: {}", .0.display())]
    ScriptMissing(PathBuf),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("cannot run {} on {platform}", .script.display())]
    UnsupportedScript { script: PathBuf, platform: String },

    #[error("no clipboard mechanism available ({0})")]
    ClipboardUnavailable(String),

    #[error("clipboard read failed: {0}")]
    ClipboardRead(String),

    #[error("vault token key not in clipboard")]
    TokenMarkerMissing,

    #[error("sign-on script exited with {0}")]
    SignOnFailed(i32),

    #[error("sign-on script terminated by signal")]
    SignOnKilled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KubedError>;
