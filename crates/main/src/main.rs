/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use classifier::{
    corpus::Corpus,
    validation::{CrossValidator, ValidationReport},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(name = "spam-classifier")]
struct Cli {
    /// Base directory holding the part1..partN message folders
    corpus: PathBuf,
    /// Number of corpus partitions to cross-validate over
    #[clap(short, long, default_value_t = 10)]
    folds: usize,
    /// Emit the full report as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("spam-classifier: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = Corpus::load(&args.corpus, args.folds)?;
    tracing::info!(
        partitions = corpus.partitions.len(),
        documents = corpus.len(),
        "corpus loaded"
    );

    let report = CrossValidator::new().run(&corpus)?;
    tracing::info!(elapsed = ?report.elapsed, "cross-validation finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    println!("fold   tested  accuracy  spam-precision  spam-recall     train  classify");
    for fold in &report.folds {
        println!(
            "{:>4}  {:>7}  {:>8}  {:>14}  {:>11}  {:>8}  {:>8}",
            fold.fold,
            fold.documents_tested,
            percent(fold.accuracy),
            percent(fold.spam_precision),
            percent(fold.spam_recall),
            format!("{:.2?}", fold.training_time),
            format!("{:.2?}", fold.testing_time),
        );
    }

    let aggregate = &report.aggregate;
    println!();
    println!("averages over {} folds:", report.folds.len());
    println!(
        "  accuracy        {}{}",
        percent(aggregate.mean_accuracy),
        undefined_note(aggregate.undefined_accuracy_folds),
    );
    println!(
        "  spam precision  {}{}",
        percent(aggregate.mean_spam_precision),
        undefined_note(aggregate.undefined_spam_precision_folds),
    );
    println!(
        "  spam recall     {}{}",
        percent(aggregate.mean_spam_recall),
        undefined_note(aggregate.undefined_spam_recall_folds),
    );
    println!("  total time      {:.2?}", report.elapsed);
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}%", value * 100.0),
        None => "n/a".to_string(),
    }
}

fn undefined_note(folds: usize) -> String {
    if folds > 0 {
        format!("  (undefined in {folds} folds)")
    } else {
        String::new()
    }
}
