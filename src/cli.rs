use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bytesum",
    version,
    about = "8-bit additive checksum ((0xFF + sum of bytes) mod 256). Not a CRC."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the checksum of each input ('-' or nothing reads stdin)
    Calculate {
        files: Vec<PathBuf>,
    },
    /// Check a file against an expected checksum; exits with 1 on mismatch
    Verify {
        file: PathBuf,
        /// Expected checksum, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_expected)]
        expected: u8,
    },
}

pub fn parse_expected(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("'{}' is not a byte value: {}", s, e))
}
