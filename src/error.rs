// Error types shared by the resolver and the upload client. Every
// failure inside the library is terminal for the current run: there is
// no retry and no fallback server, so each variant simply records what
// went wrong for the caller to display.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered, but with a body we cannot make sense of
    /// (non-JSON, or a schema the API is not supposed to produce).
    #[error("unexpected response from server: {0}")]
    Protocol(String),

    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid caller-supplied input, e.g. a malformed mime override.
    #[error("invalid argument: {0}")]
    Argument(String),
}
