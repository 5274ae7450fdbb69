// src/main.rs
// METMAP: Methyltransferase Motif Cassette Designer
// Entry point for the Command Line Interface.
// Handles motif file I/O, RNG seeding, and console reporting around the engine.

mod cli;

use metmap::assembler::{AssemblyParams, CassetteAssembler};
use metmap::composer::{CassetteComposer, Notice};
use metmap::expander::Expander;
use metmap::iupac::Iupac;
use metmap::motif_file::MotifReader;
use metmap::sampler::UniqueSampler;
use metmap::Budget;
use crate::cli::{Cli, Commands};

use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use anyhow::{Result, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Refuse to list expansions larger than this; use `expand --random` instead.
const MAX_LISTED_VARIANTS: u64 = 1 << 20;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // One generator for the whole run
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match &cli.command {
        // COMMAND: DESIGN (Full Pipeline)
        Commands::Design {
            input, output, copy_rule1, copy_rule2, linker, results,
            max_shuffle_attempts, max_sample_draws, max_stale_orderings,
        } => {
            println!("[*] Reading motifs from {}...", input);
            let input_file = File::open(input).context(format!("Failed to open motif file: {}", input))?;
            let specs = MotifReader::new(BufReader::new(input_file))
                .read_all()
                .context(format!("Failed to parse motif file: {}", input))?;

            if specs.is_empty() {
                anyhow::bail!("[✘] No motifs found in {}.", input);
            }

            let params = AssemblyParams {
                copy_rule1: *copy_rule1 as usize,
                copy_rule2: *copy_rule2 as usize,
                linker_len: *linker,
                nresults: *results as usize,
            };
            let budget = Budget {
                shuffle_attempts: *max_shuffle_attempts,
                sample_draws: *max_sample_draws,
                stale_orderings: *max_stale_orderings,
            };
            println!("[i] {} motifs | Copies: rule1={} rule2={} | Linker: {} bp | Results: {}",
                     specs.len(), params.copy_rule1, params.copy_rule2, params.linker_len, params.nresults);
            if let Some(seed) = cli.seed {
                println!("[i] Seed: {}", seed);
            }

            // Report per-motif notices before arranging, so they survive a failed shuffle
            let composition = CassetteComposer::build_multiset(
                &specs, params.copy_rule1, params.copy_rule2, &budget, &mut rng,
            )
            .context("[✘] Motif composition failed")?;

            for notice in &composition.notices {
                match notice {
                    Notice::Summary { .. } => println!("    -> {}", notice),
                    Notice::LargeExpansion { .. }
                    | Notice::InvalidRule { .. }
                    | Notice::UnresolvedParts { .. } => println!("[!] {}", notice),
                }
            }

            println!("[*] Arranging {} motif instances...", composition.parts.len());
            let report = CassetteAssembler::arrange(composition, &params, &budget, &mut rng)
                .context("[✘] Cassette design failed")?;

            let output_file = File::create(output).context(format!("Failed to create output: {}", output))?;
            let mut writer = BufWriter::new(output_file);
            for result in &report.results {
                writer.write_all(result.fasta_entry().as_bytes())?;
            }
            writer.flush()?;

            let cassette_len = report.results.first().map(|r| r.sequence.len()).unwrap_or(0);

            println!("\n[✔] Design Finished.");
            println!("--------------------------------------------------");
            println!("    Motif Instances: {} per cassette", report.parts);
            println!("    Cassette Length: {} bp", cassette_len);
            println!("    Cassettes:       {}", report.results.len());
            println!("    Shuffles:        {} ({} permutations tried)", report.orderings_drawn, report.shuffle_attempts);
            println!("    Output File:     {}", output);
            println!("--------------------------------------------------");
        }

        // COMMAND: EXPAND (De-ambiguate one motif)
        Commands::Expand { motif, random, max_sample_draws } => {
            let count = Iupac::count_variants(motif);
            println!("[i] {}: {} variants", motif.to_ascii_uppercase(), count);

            let variants: Vec<String> = match random {
                Some(n) => UniqueSampler::sample_unique(motif, *n, *max_sample_draws, &mut rng)?
                    .into_iter()
                    .collect(),
                None => {
                    if count > MAX_LISTED_VARIANTS {
                        anyhow::bail!("[✘] Refusing to list {} variants. Use --random N to sample.", count);
                    }
                    Expander::all_variants(motif)
                }
            };

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for variant in variants {
                writeln!(out, "{}", variant)?;
            }
        }

        // COMMAND: COUNT
        Commands::Count { motifs } => {
            for motif in motifs {
                let count = Iupac::count_variants(motif);
                if count == u64::MAX {
                    println!("{}\t>= {}", motif.to_ascii_uppercase(), count);
                } else {
                    println!("{}\t{}", motif.to_ascii_uppercase(), count);
                }
            }
        }
    }
    Ok(())
}
