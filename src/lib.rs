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

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod file_reader;
pub mod parser;
pub mod word_sink;

use assembler::symbol_table::SymbolTable;
use errors::Diagnostic;
use word_sink::WordSink;

extern crate pest;
extern crate pest_derive;

/// What a successful assembly run produced.
#[derive(Debug)]
pub struct Summary {
    /// Load address from `.ORIG`, also the first word handed to the sink.
    pub origin: u16,
    /// Program words emitted, the origin header word excluded.
    pub words_emitted: usize,
    pub symbol_table: SymbolTable,
    pub warnings: Vec<Diagnostic>,
}

/// Assemble LC-3 source text. Phases run in order — lex/classify, pass 1
/// (symbol resolution), pass 2 (encoding) — and each later phase only runs
/// if the previous one accumulated no errors. The sink receives the origin
/// word followed by the program words in address order, and receives
/// nothing at all on failure.
pub fn assemble<S: WordSink>(source: &str, sink: &mut S) -> Result<Summary, Vec<Diagnostic>> {
    let lines = parser::parse_source(source)?;
    let first_pass = assembler::build_symbol_table(&lines)?;
    let words = assembler::encoder::encode_program(
        &lines,
        &first_pass.symbol_table,
        first_pass.origin,
    )?;

    sink.write_word(first_pass.origin);
    for word in &words {
        sink.write_word(*word);
    }

    Ok(Summary {
        origin: first_pass.origin,
        words_emitted: words.len(),
        symbol_table: first_pass.symbol_table,
        warnings: first_pass.warnings,
    })
}
