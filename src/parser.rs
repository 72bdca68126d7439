use crate::error::SubcueError;
use crate::srt::Cue;

use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::character::complete::{
    char, digit0, digit1, line_ending, multispace0, multispace1, one_of, space0, space1,
};
use nom::combinator::{map_res, opt, recognize};
use nom::error::{convert_error, ErrorKind, VerboseError};
use nom::multi::many_till;
use nom::sequence::{terminated, tuple};
use nom::{branch::alt, error_position, Err, IResult};

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Parses SRT data into cues, keeping the order they appear in.
    pub fn parse(&mut self, input: &str) -> Result<Vec<Cue>, SubcueError> {
        match srt_file(input) {
            Ok((_, cues)) => {
                tracing::debug!(count = cues.len(), "parsed cues");
                Ok(cues)
            }
            Err(Err::Error(err)) | Err(Err::Failure(err)) => {
                Err(SubcueError::Parse(convert_error(input, err)))
            }
            Err(Err::Incomplete(_)) => {
                unreachable!("Incomplete data received by non-streaming parser.")
            }
        }
    }
}

fn optional_bom(input: &str) -> IResult<&str, Option<&str>, VerboseError<&str>> {
    opt(tag("\u{FEFF}"))(input)
}

fn srt_file(input: &str) -> IResult<&str, Vec<Cue>, VerboseError<&str>> {
    let (input, _) = optional_bom(input)?;
    let (input, _) = multispace0(input)?;
    let (input, cues) = all_cues(input)?;
    let (input, _) = end_of_file(input)?;
    Ok((input, cues))
}

fn all_cues(input: &str) -> IResult<&str, Vec<Cue>, VerboseError<&str>> {
    let mut parsed_cues = Vec::new();
    let mut input = input;
    loop {
        match cue(input) {
            Ok((rem_input, cue)) => {
                parsed_cues.push(cue);
                let (rem_input, _) = multispace0(rem_input)?;
                input = rem_input;
            }
            Err(err) => {
                if input.is_empty() {
                    return Ok((input, parsed_cues));
                } else {
                    return Err(err);
                }
            }
        }
    }
}

fn cue(input: &str) -> IResult<&str, Cue, VerboseError<&str>> {
    let (input, _) = multispace0(input)?;
    let (input, sequence_number) = terminated(seq_num, multispace1)(input)?;
    let (input, (start_time, end_time)) =
        terminated(show_hide, alt((line_ending, end_of_file)))(input)?;
    let (input, text) = cue_text(input)?;

    Ok((
        input,
        Cue {
            sequence_number: Some(sequence_number),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            text: text.join("\n"),
        },
    ))
}

fn end_of_file(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    if input.is_empty() {
        Ok((input, input))
    } else {
        std::result::Result::Err(Err::Error(error_position!(input, ErrorKind::Eof)))
    }
}

fn cue_text(input: &str) -> IResult<&str, Vec<&str>, VerboseError<&str>> {
    let line = terminated(
        take_while1(|c: char| c != '\n' && c != '\r'),
        alt((line_ending, end_of_file)),
    );

    let (input, (lines, _)) = many_till(line, alt((line_ending, end_of_file)))(input)?;

    Ok((input, lines))
}

fn show_hide(input: &str) -> IResult<&str, (&str, &str), VerboseError<&str>> {
    let (input, show_at) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, hide_at) = timestamp(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (show_at, hide_at)))
}

/// Recognises a timestamp without interpreting it. Hour, minute and second
/// fields may be one or two digits (hours more), and the fraction may use
/// either `,` or `.` as its separator.
fn timestamp(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let hms = || take_while_m_n(1, 2, |c: char| c.is_ascii_digit());

    recognize(tuple((
        digit1,
        char(':'),
        hms(),
        char(':'),
        hms(),
        opt(tuple((one_of(",."), digit0))),
    )))(input)
}

fn seq_num(input: &str) -> IResult<&str, usize, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}
