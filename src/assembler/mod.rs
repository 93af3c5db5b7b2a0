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

pub mod encoder;
pub mod symbol_table;

use crate::ast::{AssemblyLine, Directive};
use crate::errors::{AssemblyError, Diagnostic};
use symbol_table::{Symbol, SymbolTable};

/// Everything pass 1 learns: the load address, the fully-populated symbol
/// table, and any warning-class diagnostics.
#[derive(Debug)]
pub struct FirstPass {
    pub origin: u16,
    pub symbol_table: SymbolTable,
    pub warnings: Vec<Diagnostic>,
}

/// Pass 1: walk every line, keep the location counter honest, and record
/// each label at the address of the next emitted word. Errors accumulate
/// per line; the pass fails at completion if any accumulated.
pub fn build_symbol_table(lines: &[AssemblyLine]) -> Result<FirstPass, Vec<Diagnostic>> {
    let mut symbol_table = SymbolTable::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut warnings: Vec<Diagnostic> = Vec::new();
    let mut origin: Option<u16> = None;
    let mut missing_orig_reported = false;
    let mut overflow_reported = false;
    let mut ended = false;
    let mut last_line = 0;
    // One wider than an address so an exact fit up to xFFFF is still legal.
    let mut lc: u32 = 0;

    for line in lines {
        last_line = line.line_number;

        if let Some(Directive::Orig(addr)) = &line.directive {
            if origin.is_none() {
                // A label ahead of .ORIG is content before the origin.
                if line.label.is_some() && !missing_orig_reported {
                    diagnostics.push(Diagnostic::error(
                        line.line_number,
                        AssemblyError::MissingOrig,
                    ));
                    missing_orig_reported = true;
                }
                origin = Some(*addr);
                lc = *addr as u32;
            } else {
                diagnostics.push(Diagnostic::error(
                    line.line_number,
                    AssemblyError::DuplicateOrig,
                ));
            }
            continue;
        }

        if origin.is_none() {
            if !missing_orig_reported {
                diagnostics.push(Diagnostic::error(
                    line.line_number,
                    AssemblyError::MissingOrig,
                ));
                missing_orig_reported = true;
            }
            continue;
        }

        if let Some(label) = &line.label {
            match symbol_table.get(label) {
                Some(existing) => diagnostics.push(Diagnostic::error(
                    line.line_number,
                    AssemblyError::DuplicateLabel {
                        name: label.clone(),
                        first_line: existing.line,
                        second_line: line.line_number,
                    },
                )),
                None => {
                    symbol_table.insert(
                        label.clone(),
                        Symbol {
                            address: lc as u16,
                            line: line.line_number,
                        },
                    );
                }
            }
        }

        if line.directive == Some(Directive::End) {
            ended = true;
            break;
        }

        lc += line.word_count();
        if lc > 0x1_0000 {
            if !overflow_reported {
                diagnostics.push(Diagnostic::error(
                    line.line_number,
                    AssemblyError::LabelOverflow,
                ));
                overflow_reported = true;
            }
            lc = 0x1_0000;
        }
    }

    // An empty program has no .ORIG either.
    if origin.is_none() && !missing_orig_reported {
        diagnostics.push(Diagnostic::error(1, AssemblyError::MissingOrig));
    }

    if !ended {
        warnings.push(Diagnostic::warning(
            last_line.max(1),
            AssemblyError::MissingEnd,
        ));
    }

    match origin {
        Some(origin) if diagnostics.is_empty() => Ok(FirstPass {
            origin,
            symbol_table,
            warnings,
        }),
        _ => Err(diagnostics),
    }
}

// ------------- unit tests -------------
