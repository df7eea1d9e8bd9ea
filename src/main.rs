use std::process;

use clap::Parser;
use colored::Colorize;
use ktally::{cli::Args, config::Config, run};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(&args).unwrap_or_else(|e| {
        eprintln!(
            "{}\n {}",
            "Problem with arguments:".blue().bold(),
            e.to_string().blue()
        );
        process::exit(1);
    });

    if !args.quiet {
        println!("{}: {}", "k-length".bold(), args.k.to_string().blue().bold());
        println!(
            "{}: {}",
            "data".bold(),
            args.path.display().to_string().underline().bold().blue()
        );
        println!(
            "{}: {}",
            "min-count".bold(),
            args.min_count.to_string().blue().bold()
        );
        println!(
            "{}: {}",
            "workers".bold(),
            args.threads
                .map_or_else(|| "all cores".to_string(), |n| n.to_string())
                .blue()
                .bold()
        );
        println!();
    }

    match run::run(&config) {
        Ok(outcome) => {
            if !args.quiet {
                println!(
                    "{}: {}",
                    "format".bold(),
                    outcome.format.to_string().blue().bold()
                );
                println!(
                    "{}: {}",
                    "sequences".bold(),
                    outcome.sequences.to_string().blue().bold()
                );
                println!(
                    "{}: {}",
                    "chunks".bold(),
                    outcome.chunks.to_string().blue().bold()
                );
                println!(
                    "{}: {}",
                    format!("significant {}-mers", args.k).bold(),
                    outcome.significant_kmers.to_string().blue().bold()
                );
                println!(
                    "{}: {}",
                    "summary".bold(),
                    outcome.summary_path.display().to_string().underline().bold().blue()
                );
            }
        }
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Application error:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        }
    }
}
