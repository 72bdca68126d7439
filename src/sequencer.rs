use crate::error::SubcueError;
use crate::srt::Cue;
use crate::style::{ResolvedStyle, StyleParameters};
use crate::timestamp::to_seconds;

use std::collections::VecDeque;

use clap::ValueEnum;
use serde::Serialize;

pub const POSITION: &str = "Bottom Middle";

/// Gaps up to this many seconds are treated as back-to-back cues.
const GAP_TOLERANCE: f64 = 0.05;

/// One step for a strictly sequential executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Instruction {
    #[serde(rename_all = "camelCase")]
    Wait { delay_seconds: f64 },
    #[serde(rename_all = "camelCase")]
    ShowText {
        html: String,
        duration_seconds: f64,
        position: String,
        width_px: u32,
        drop_shadow: bool,
    },
}

/// What to do with a cue whose timestamps cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MalformedPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Drop the cue and carry on.
    Skip,
}

/// Lazily turns cues into instructions, tracking the playhead as it goes.
pub struct Sequencer<I> {
    cues: I,
    style: ResolvedStyle,
    policy: MalformedPolicy,
    playhead: f64,
    pending: VecDeque<Instruction>,
    failed: bool,
}

impl<'a, I> Sequencer<I>
where
    I: Iterator<Item = &'a Cue>,
{
    pub fn new(cues: I, style: &StyleParameters, policy: MalformedPolicy) -> Self {
        Self {
            cues,
            style: style.resolve(),
            policy,
            playhead: 0.0,
            pending: VecDeque::with_capacity(3),
            failed: false,
        }
    }

    fn advance(&mut self, cue: &Cue) -> Result<(), SubcueError> {
        let start = to_seconds(&cue.start_time)?;
        let end = to_seconds(&cue.end_time)?;
        let duration = snap(end - start);
        let gap = snap(start - self.playhead);

        if gap > GAP_TOLERANCE {
            self.pending.push_back(Instruction::Wait { delay_seconds: gap });
        }

        if duration > 0.0 {
            self.pending.push_back(Instruction::ShowText {
                html: self.style.render(&cue.text),
                duration_seconds: duration,
                position: POSITION.to_string(),
                width_px: self.style.container_width,
                drop_shadow: false,
            });
            self.pending.push_back(Instruction::Wait {
                delay_seconds: duration,
            });
        } else {
            tracing::debug!(
                cue = ?cue.sequence_number,
                duration,
                "cue has no positive duration, not shown"
            );
        }

        self.playhead = end;
        Ok(())
    }
}

impl<'a, I> Iterator for Sequencer<I>
where
    I: Iterator<Item = &'a Cue>,
{
    type Item = Result<Instruction, SubcueError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(instruction) = self.pending.pop_front() {
                return Some(Ok(instruction));
            }
            if self.failed {
                return None;
            }
            let cue = self.cues.next()?;
            match self.advance(cue) {
                Ok(()) => (),
                Err(err) => match self.policy {
                    MalformedPolicy::Abort => {
                        self.failed = true;
                        return Some(Err(err));
                    }
                    MalformedPolicy::Skip => {
                        tracing::warn!(
                            cue = ?cue.sequence_number,
                            error = %err,
                            "skipping cue"
                        );
                    }
                },
            }
        }
    }
}

/// Turns an ordered list of cues into the full instruction list.
pub fn sequence(
    cues: &[Cue],
    style: &StyleParameters,
    policy: MalformedPolicy,
) -> Result<Vec<Instruction>, SubcueError> {
    Sequencer::new(cues.iter(), style, policy).collect()
}

// Offsets are differences of two floats; SRT only resolves milliseconds.
fn snap(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
