use anyhow::{anyhow, bail, Result};
use clap::{builder::PossibleValue, Parser, ValueEnum};
use format_num::NumberFormat;
use libsparsa::{ssa_builder::SparseSuffixArray, ssa_file, types::SsaBuilderArgs};
use log::{debug, info};
use std::{fs, time::Instant};

// --------------------------------------------------
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Sparseness factor: sample every Nth suffix
    #[arg(short, long, value_name = "SPARSENESS")]
    pub sparseness: usize,

    /// Input is DNA; protein otherwise, which folds L onto I
    #[arg(short('d'), long("dna"))]
    pub is_dna: bool,

    /// Bitpack the output suffix array
    #[arg(short, long)]
    pub compressed: bool,

    /// Build the full suffix array and subsample it instead of packing;
    /// a slow reference mode for testing
    #[arg(short, long)]
    pub unoptimized: bool,

    /// Verify suffix order after building
    #[arg(long)]
    pub check: bool,

    /// Log level
    #[arg(short, long)]
    pub log: Option<LogLevel>,

    /// Log file
    #[arg(long)]
    pub log_file: Option<String>,

    /// Input file of raw sequence bytes
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    pub output: String,
}

// --------------------------------------------------
#[derive(Debug, Clone)]
pub enum LogLevel {
    Info,
    Debug,
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[LogLevel::Info, LogLevel::Debug]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            LogLevel::Info => PossibleValue::new("info"),
            LogLevel::Debug => PossibleValue::new("debug"),
        })
    }
}

// --------------------------------------------------
pub fn run(args: Cli) -> Result<()> {
    let num_fmt = NumberFormat::new();

    let now = Instant::now();
    let text = fs::read(&args.input).map_err(|e| anyhow!("{}: {e}", args.input))?;
    info!(
        "Read input of len {} in {:?}",
        num_fmt.format(",.0", text.len() as f64),
        now.elapsed()
    );
    debug!("Raw input {:?}", String::from_utf8_lossy(&text));

    let now = Instant::now();
    let ssa = SparseSuffixArray::new(SsaBuilderArgs {
        text,
        sparseness: args.sparseness,
        is_dna: args.is_dna,
        optimized: !args.unoptimized,
    })?;
    info!(
        "Sampled {} suffix{} in {:?}",
        num_fmt.format(",.0", ssa.suffix_array.len() as f64),
        if ssa.suffix_array.len() == 1 { "" } else { "es" },
        now.elapsed()
    );

    if args.check {
        let now = Instant::now();
        let errors = ssa.check_order();
        if !errors.is_empty() {
            bail!(
                "Found {} suffix{} out of order",
                errors.len(),
                if errors.len() == 1 { "" } else { "es" }
            );
        }
        info!("Checked order, found 0 errors in {:?}", now.elapsed());
    }

    let now = Instant::now();
    let bytes_out = if args.compressed {
        ssa_file::write_compressed(&args.output, &ssa)?
    } else {
        ssa_file::write_uncompressed(&args.output, &ssa)?
    };
    info!(
        "Wrote {} byte{} to '{}' in {:?}",
        num_fmt.format(",.0", bytes_out as f64),
        if bytes_out == 1 { "" } else { "s" },
        args.output,
        now.elapsed()
    );

    Ok(())
}
