mod cli;

use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressState, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{debug, info, trace, warn};

use bytesum_lib::{Checksum, CHUNK_SIZE};

use crate::cli::{Cli, Command};

fn main() -> Result<ExitCode> {
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();

    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger)
        .try_init()
        .context("Failed to initialize logger.")?;

    let args = Cli::parse();
    match args.command {
        Command::Calculate { files } => {
            calculate(&multi, &files)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { file, expected } => {
            if verify(&multi, &file, expected)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn calculate(multi: &MultiProgress, files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        let value = checksum_stdin()?;
        println!("{:#04x}  -", value);
        return Ok(());
    }

    for path in files {
        let value = if path.as_os_str() == "-" {
            checksum_stdin()?
        } else {
            checksum_file(multi, path)?
        };
        println!("{:#04x}  {}", value, path.display());
    }
    Ok(())
}

fn verify(multi: &MultiProgress, path: &Path, expected: u8) -> Result<bool> {
    let value = checksum_file(multi, path)?;
    if value == expected {
        println!("OK({:#04x})", value);
        Ok(true)
    } else {
        warn!("Checksum mismatch for {}.", path.display());
        println!("MISMATCH(expected {:#04x}, got {:#04x})", expected, value);
        Ok(false)
    }
}

fn checksum_stdin() -> Result<u8> {
    debug!("Reading stdin.");
    checksum_reader(io::stdin().lock(), &ProgressBar::hidden()).context("Failed to read stdin")
}

fn checksum_file(multi: &MultiProgress, path: &Path) -> Result<u8> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    info!("Checksumming {} ({} bytes).", path.display(), size);

    let progress = if size > CHUNK_SIZE as u64 {
        multi.add(progress_bar(size))
    } else {
        ProgressBar::hidden()
    };
    let value = checksum_reader(BufReader::new(file), &progress)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !progress.is_hidden() {
        progress.finish();
        multi.remove(&progress);
    }

    debug!("{}: {:#04x}", path.display(), value);
    Ok(value)
}

fn progress_bar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:60.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
        let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
    })
    .progress_chars("#>-");
    ProgressBar::new(len).with_style(style)
}

/// Feeds `reader` through one [`Checksum`] in `CHUNK_SIZE` blocks.
fn checksum_reader<R: Read>(mut reader: R, progress: &ProgressBar) -> io::Result<u8> {
    let mut checksum = Checksum::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        checksum.add_bytes(Some(&chunk), n);
        total += n as u64;
        progress.inc(n as u64);
    }
    trace!("Read {} bytes.", total);
    Ok(checksum.value())
}
