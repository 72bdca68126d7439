use crate::error::SubcueError;
use crate::parser::Parser;
use crate::sequencer::{self, Instruction, MalformedPolicy};
use crate::source;
use crate::style::StyleParameters;

use std::error::Error;

use serde::Serialize;

/// Overall outcome of one run, in the shape the executor expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Instruction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RunResult {
    pub fn succeeded(effects: Vec<Instruction>) -> Self {
        Self {
            success: true,
            effects: Some(effects),
            error_message: None,
        }
    }

    pub fn failed(err: &SubcueError) -> Self {
        Self {
            success: false,
            effects: None,
            error_message: Some(err.user_message().to_string()),
        }
    }
}

pub struct Request<'a> {
    pub source: Option<&'a str>,
    pub style: &'a StyleParameters,
    pub on_malformed: MalformedPolicy,
}

/// Loads, parses and sequences the configured source. Failures are logged
/// with their cause and reduced to a generic message.
pub fn generate(request: &Request) -> RunResult {
    match try_generate(request) {
        Ok(effects) => {
            tracing::info!(instructions = effects.len(), "generated effects");
            RunResult::succeeded(effects)
        }
        Err(err) => {
            log_error(&err);
            RunResult::failed(&err)
        }
    }
}

fn try_generate(request: &Request) -> Result<Vec<Instruction>, SubcueError> {
    let data = source::load_source(request.source)?;
    let cues = Parser::new().parse(&data)?;
    sequencer::sequence(&cues, request.style, request.on_malformed)
}

fn log_error(err: &SubcueError) {
    let mut cause = err.source();
    let mut chain = Vec::new();
    while let Some(inner) = cause {
        chain.push(inner.to_string());
        cause = inner.source();
    }
    tracing::error!(error = %err, causes = ?chain, "failed to generate effects");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn srt_file(data: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.as_bytes()).unwrap();
        file
    }

    fn generate_from(source: Option<&str>) -> RunResult {
        let style = StyleParameters::default();
        generate(&Request {
            source,
            style: &style,
            on_malformed: MalformedPolicy::Abort,
        })
    }

    #[test]
    fn end_to_end_from_file() {
        let file = srt_file(
            "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:04,000 --> 00:00:05,000\nWorld\n",
        );

        let result = generate_from(file.path().to_str());

        assert!(result.success);
        assert!(result.error_message.is_none());
        let effects = result.effects.unwrap();
        assert_eq!(effects.len(), 6);
        assert_eq!(effects[0], Instruction::Wait { delay_seconds: 1.0 });
        assert_eq!(effects[3], Instruction::Wait { delay_seconds: 1.0 });
    }

    #[test]
    fn empty_file_succeeds_with_no_effects() {
        let file = srt_file("");

        let result = generate_from(file.path().to_str());

        assert_eq!(result, RunResult::succeeded(vec![]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "effects": []}));
    }

    #[test]
    fn missing_source_fails_without_effects() {
        let result = generate_from(None);

        assert!(!result.success);
        assert!(result.effects.is_none());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "errorMessage": "No subtitle file configured."})
        );
    }

    #[test]
    fn unreadable_source_reports_generic_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.srt");

        let result = generate_from(path.to_str());

        assert!(!result.success);
        assert!(result.effects.is_none());
        assert_eq!(
            result.error_message.as_deref(),
            Some("Failed to load subtitle file.")
        );
    }

    #[test]
    fn malformed_srt_reports_generic_message() {
        let file = srt_file("not subtitles at all\n");

        let result = generate_from(file.path().to_str());

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Failed to load subtitle file.")
        );
    }
}
