/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use anyhow::{Context, Result, bail};
use clap::Parser as clap_parser;
use colored::Colorize;
use lc3asm::assemble;
use lc3asm::errors::{Diagnostic, Severity};
use lc3asm::file_reader::{AsmFileReader, FileReader};
use lc3asm::word_sink::ObjectImage;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(clap_parser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    #[clap(short, long)]
    input: PathBuf,
    #[clap(short, long)]
    output: PathBuf,
    /// Also write the symbol table as JSON to the given path
    #[clap(short, long)]
    symbols: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let reader = AsmFileReader;
    let source = reader
        .read_to_string(&opts.input)
        .with_context(|| format!("Failed to read input file: {}", opts.input.display()))?;

    let mut image = ObjectImage::new();
    let summary = match assemble(&source, &mut image) {
        Ok(summary) => summary,
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                report(diagnostic);
            }
            bail!("assembly failed with {} error(s)", diagnostics.len());
        }
    };

    for warning in &summary.warnings {
        report(warning);
    }

    fs::write(&opts.output, image.as_bytes())
        .with_context(|| format!("Failed to write output file: {}", opts.output.display()))?;

    if let Some(path) = &opts.symbols {
        // sorted so the artifact is stable across runs
        let sorted: BTreeMap<_, _> = summary.symbol_table.iter().collect();
        let json = serde_json::to_string_pretty(&sorted)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write symbol file: {}", path.display()))?;
    }

    println!(
        "Successfully assembled {} to {} ({} words at x{:04X})",
        opts.input.display(),
        opts.output.display(),
        summary.words_emitted,
        summary.origin
    );

    Ok(())
}

fn report(diagnostic: &Diagnostic) {
    let tag = match diagnostic.severity {
        Severity::Error => "error:".red().bold(),
        Severity::Warning => "warning:".yellow().bold(),
    };
    eprintln!("{} line {}: {}", tag, diagnostic.line, diagnostic.error);
}
