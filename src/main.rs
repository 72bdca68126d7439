mod effects;
mod error;
mod parser;
mod sequencer;
mod serialiser;
mod source;
mod srt;
mod style;
mod timestamp;

use crate::effects::Request;
use crate::sequencer::MalformedPolicy;
use crate::style::StyleParameters;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subcue=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(2);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Turn SRT subtitles into timed overlay instructions", version)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The subtitle file to read from. Use '-' to read from standard input."
    )]
    input: Option<String>,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write the instructions to. If not supplied, they will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "A JSON file with style parameters. Flags below override its values."
    )]
    style: Option<String>,
    #[arg(long, value_name = "PX", help = "Font size in pixels [default: 48]")]
    font_size: Option<u32>,
    #[arg(long, value_name = "HEX", help = "Text colour [default: #FFFFFF]")]
    text_color: Option<String>,
    #[arg(long, value_name = "BOOL", help = "Draw an outline around the text [default: true]")]
    outline: Option<bool>,
    #[arg(long, value_name = "PX", help = "Outline width in pixels [default: 2]")]
    outline_width: Option<u32>,
    #[arg(long, value_name = "HEX", help = "Outline colour [default: #222222]")]
    outline_color: Option<String>,
    #[arg(long, value_name = "PX", help = "Width of the text container [default: 1200]")]
    container_width: Option<u32>,
    #[arg(
        long,
        value_enum,
        default_value_t = MalformedPolicy::Abort,
        help = "What to do with a cue whose timestamps cannot be read."
    )]
    on_malformed: MalformedPolicy,
}

impl Cli {
    fn style_overrides(&self) -> StyleParameters {
        StyleParameters {
            font_size: self.font_size,
            text_color: self.text_color.clone(),
            outline: self.outline,
            outline_width: self.outline_width,
            outline_color: self.outline_color.clone(),
            container_width: self.container_width,
        }
    }
}

fn load_style_file(path: &Path) -> Result<StyleParameters> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open style file: '{}'", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse style file: '{}'", path.display()))
}

/// Returns whether the instructions were generated successfully.
fn run() -> Result<bool> {
    let cli = Cli::parse();

    let base = match &cli.style {
        Some(path) => load_style_file(Path::new(path))?,
        None => StyleParameters::default(),
    };
    let style = base.merge(cli.style_overrides());
    tracing::debug!(?style, "using style parameters");

    let result = effects::generate(&Request {
        source: cli.input.as_deref(),
        style: &style,
        on_malformed: cli.on_malformed,
    });

    serialiser::serialise(&result, &cli.output)?;

    Ok(result.success)
}
