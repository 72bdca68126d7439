use crate::effects::RunResult;

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Writes the result as JSON to `output`, or to stdout when `output` is `-`.
pub fn serialise<P: AsRef<Path>>(result: &RunResult, output: P) -> Result<()> {
    let output = output.as_ref();
    if output == Path::new("-") {
        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_result(&mut writer, result).context("Failed to write to stdout.")?;
        writer.flush().context("Failed to write to stdout.")?;
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("Failed to create output file: '{}'", output.display()))?;
        let mut writer = BufWriter::new(file);
        write_result(&mut writer, result).context("Failed to write to output file.")?;
        writer.flush().context("Failed to write to output file.")?;
    }
    Ok(())
}

fn write_result<W: Write>(buf: &mut W, result: &RunResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *buf, result)?;
    writeln!(buf)?;
    Ok(())
}
