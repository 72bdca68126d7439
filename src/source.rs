use crate::error::SubcueError;

use std::io::{self, Read};
use std::path::PathBuf;

/// Reads the configured subtitle source. `-` means standard input.
pub fn load_source(source: Option<&str>) -> Result<String, SubcueError> {
    let source = match source.map(str::trim) {
        None | Some("") => return Err(SubcueError::Configuration),
        Some(source) => source,
    };

    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| SubcueError::SourceRead {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(buffer);
    }

    tracing::debug!(path = source, "reading subtitle file");
    std::fs::read_to_string(source).map_err(|err| SubcueError::SourceRead {
        path: PathBuf::from(source),
        source: err,
    })
}
