use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SubcueError {
    #[error("no subtitle source was configured")]
    Configuration,
    #[error("failed to read subtitle source '{path}'")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse SRT data:\n{0}")]
    Parse(String),
    #[error("malformed timestamp: '{timestamp}'")]
    MalformedTimestamp { timestamp: String },
}

impl SubcueError {
    /// The message handed back to whoever configured the run. The cause
    /// itself only goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubcueError::Configuration => "No subtitle file configured.",
            SubcueError::SourceRead { .. } | SubcueError::Parse(_) => {
                "Failed to load subtitle file."
            }
            SubcueError::MalformedTimestamp { .. } => {
                "Subtitle file contains an invalid timestamp."
            }
        }
    }
}
