//! Emit edge mask test vectors for the HDL testbench.
//!
//! One vector per line: `AAAA BBBB DDDDDDDD MMMM` in hex, where A and B are
//! the 16-bit edge deltas, D the 32-bit corner value and M the expected
//! 16-bit mask.
//!
//! Usage: `gen_edge_mask_test_vectors [--count N] [--seed 0xHEX]`

use std::io::{self, BufWriter, Write};

use clap::Parser;
use nz_edge::edge_mask;
use nz_twin_core::rng::XorShift64;

#[derive(Parser, Debug)]
#[command(name = "gen_edge_mask_test_vectors")]
#[command(about = "Emit edge mask test vectors for the HDL testbench", long_about = None)]
struct Cli {
    /// Random vectors to emit after the fixed corner cases
    #[arg(short, long, default_value_t = 1000)]
    count: u64,

    /// Generator seed, decimal or 0x-prefixed hex
    #[arg(short, long, value_parser = parse_seed, default_value = "0x5EED1234ABCD0001")]
    seed: u64,
}

fn parse_seed(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("'{s}' is not a 64-bit seed: {e}"))
}

/// Corner cases every run includes.
const FIXED: &[(i16, i16, i32)] = &[
    (0, 0, 0),
    (0, 0, -1),
    (1, 0, -3),
    (0, -1, -2),
    (4, 0, -1),
    (-4, 4, 16),
    (0, -4, -1),
    (i16::MAX, i16::MIN, i32::MAX),
    (i16::MIN, i16::MAX, i32::MIN),
];

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let mut rng = XorShift64::new(cli.seed);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let random = (0..cli.count).map(|_| {
        let r = rng.next_u64();
        // Small deltas and corner values near zero exercise the boundary.
        let a = (r as i16) >> 6;
        let b = ((r >> 16) as i16) >> 6;
        let d = ((r >> 32) as i32) >> 12;
        (a, b, d)
    });

    for (a, b, d) in FIXED.iter().copied().chain(random) {
        let mask = edge_mask(a, b, d);
        writeln!(out, "{:04x} {:04x} {:08x} {:04x}", a as u16, b as u16, d as u32, mask.0)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_accepts_hex_and_decimal() {
        assert_eq!(parse_seed("0x5EED_0001"), Ok(0x5EED_0001));
        assert_eq!(parse_seed("1234"), Ok(1234));
        assert!(parse_seed("0xZZ").is_err());
    }

    #[test]
    fn malformed_count_is_an_error() {
        assert!(Cli::try_parse_from(["gen", "--count", "12x"]).is_err());
        assert!(Cli::try_parse_from(["gen", "--seed", "12x"]).is_err());
        let cli = Cli::try_parse_from(["gen", "-c", "12", "-s", "0x10"]).unwrap();
        assert_eq!((cli.count, cli.seed), (12, 16));
    }
}
