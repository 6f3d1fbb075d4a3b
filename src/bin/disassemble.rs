// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Little program to disassemble the given binary file for the specified range.
//!
//! Usage: disassemble <input file> [-o <output file>] [-b <beginning pos>] [-e <ending position>] [-a <base address>] [--hex] [--raw]
//!
//! Set `RUST_LOG=debug` to see why words are emitted as `DATA`.

use m68000_disasm::{Disassembler, Instruction};

use anyhow::{bail, Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Disassembles the instructions in the given input binary file, starting and ending at the given locations.
///
/// Outputs the instructions in the given output file, or on the standard output if the output file is not supplied.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Big-endian 68000 binary file.
    input: PathBuf,
    /// Output file.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Offset of the first byte to disassemble in the input file.
    #[arg(short, long, default_value_t = 0, value_parser = parse_number::<usize>)]
    begin: usize,
    /// Offset of the end of the range in the input file (exclusive).
    #[arg(short, long, value_parser = parse_number::<usize>)]
    end: Option<usize>,
    /// Address of the first byte of the range.
    #[arg(short = 'a', long, default_value_t = 0, value_parser = parse_number::<u32>)]
    base: u32,
    /// Write immediate data in hexadecimal.
    #[arg(long)]
    hex: bool,
    /// Write the raw words of each instruction.
    #[arg(long)]
    raw: bool,
}

/// Parses a decimal number or a hexadecimal number starting with `0x`.
fn parse_number<T: TryFrom<u64>>(s: &str) -> Result<T, String> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }.map_err(|e| format!("invalid number \"{}\": {}", s, e))?;

    T::try_from(value).map_err(|_| format!("number {} is out of range", s))
}

fn write_instruction(out: &mut impl Write, inst: &Instruction, args: &Args) -> std::io::Result<()> {
    write!(out, "{:#X}  ", inst.address)?;

    if args.raw {
        let raw = inst.raw_words.iter().map(|w| format!("{:04X}", w)).collect::<Vec<_>>().join(" ");
        write!(out, "{:<24}  ", raw)?;
    }

    if args.hex {
        writeln!(out, "{:X}", inst)
    } else {
        writeln!(out, "{}", inst)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read input file \"{}\"", args.input.display()))?;

    let end = args.end.unwrap_or(data.len()).min(data.len());
    let begin = args.begin & !1;
    if begin > end {
        bail!("Beginning position {:#X} is after the ending position {:#X}", begin, end);
    }

    let mut range = &data[begin..end];
    if range.len() % 2 != 0 {
        log::warn!("Ignoring the last byte of the odd-length range");
        range = &range[..range.len() - 1];
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)
            .with_context(|| format!("Failed to create output file \"{}\"", path.display()))?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    for inst in Disassembler::new(range, args.base)? {
        write_instruction(&mut out, &inst, &args)?;
    }

    out.flush()?;
    Ok(())
}
