use thiserror::Error;

pub type StashRiverResult<T> = Result<T, StashRiverError>;

#[derive(Debug, Error)]
pub enum StashRiverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Errors from reading process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?} ({msg})")]
    InvalidVar {
        name: &'static str,
        value: String,
        msg: String,
    },
}

/// Errors talking to the upstream stash-tab feed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to upstream feed failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to document store failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("document store returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to (de)serialize document store payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to compress bulk request body: {0}")]
    Compression(#[from] std::io::Error),
}

/// Errors parsing a clipboard-format item.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no rarity line found")]
    MissingRarity,

    #[error("unrecognized rarity: {0:?}")]
    UnknownRarity(String),

    #[error("malformed item level: {0:?}")]
    InvalidItemLevel(String),

    #[error("clipboard text had no sections")]
    Empty,
}

/// Errors surfaced by a pipeline stage worker.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("stage worker panicked: {0}")]
    WorkerPanic(String),

    #[error("stage channel closed unexpectedly")]
    ChannelClosed,
}

/// Errors from a single expensive-sold alert tick. Never fatal to the
/// process — the side-car just logs and retries next interval.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("failed to query document store: {0}")]
    Store(#[from] StoreError),

    #[error("discord webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("discord webhook returned status {status}: {body}")]
    WebhookRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to serialize discord payload: {0}")]
    Json(#[from] serde_json::Error),
}
