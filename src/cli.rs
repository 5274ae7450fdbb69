// src/cli.rs
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "metmap", author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(help_template = "\
{before-help}{name} v{version}
{author-with-newline}{about-with-newline}
{usage-heading}
{usage}

{all-args}{after-help}
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Seed for the random number generator.
    ///
    /// The same seed and inputs always produce the same cassettes.
    /// Omit for a fresh design on every run.
    #[arg(short = 's', long, global = true, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Design methyltransferase target cassettes from a motif list.
    #[command(visible_alias = "run")]
    Design {
        /// Motif list, one 'MOTIF,RULE' pair per line
        #[arg(value_name = "MOTIF_FILE")]
        input: String,

        /// Output FASTA file
        #[arg(short, long, default_value = "cassettes.fasta", value_name = "OUT_FILE")]
        output: String,

        /// Copies of every variant of a rule 1 motif
        #[arg(long, default_value_t = 10, value_name = "N",
              value_parser = clap::value_parser!(u32).range(1..))]
        copy_rule1: u32,

        /// Total copies of a rule 2 motif, spread over its variants
        #[arg(long, default_value_t = 12, value_name = "N",
              value_parser = clap::value_parser!(u32).range(1..))]
        copy_rule2: u32,

        /// Random bases placed before each motif
        #[arg(short, long, default_value_t = 1, value_name = "LEN")]
        linker: usize,

        /// Number of distinct cassettes to generate
        #[arg(short = 'n', long, default_value_t = 1, value_name = "N",
              value_parser = clap::value_parser!(u32).range(1..))]
        results: u32,

        /// Give up on a shuffle after this many permutations
        #[arg(long, default_value_t = 10_000, value_name = "N")]
        max_shuffle_attempts: usize,

        /// Give up on unique sampling after this many random draws
        #[arg(long, default_value_t = 1_000_000, value_name = "N")]
        max_sample_draws: usize,

        /// Give up after this many shuffles in a row repeat a known order
        #[arg(long, default_value_t = 1_000, value_name = "N")]
        max_stale_orderings: usize,
    },

    /// List the concrete variants of an ambiguous motif.
    #[command(visible_alias = "exp")]
    Expand {
        /// Motif in IUPAC notation
        #[arg(value_name = "MOTIF")]
        motif: String,

        /// Pick N distinct variants at random instead of listing all
        #[arg(short, long, value_name = "N")]
        random: Option<usize>,

        /// Draw budget for --random
        #[arg(long, default_value_t = 1_000_000, value_name = "N")]
        max_sample_draws: usize,
    },

    /// Count the concrete variants of one or more motifs.
    Count {
        /// Motifs in IUPAC notation
        #[arg(value_name = "MOTIF", required = true)]
        motifs: Vec<String>,
    },
}
