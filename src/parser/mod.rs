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

mod ast_builder;

use crate::ast::AssemblyLine;
use crate::errors::{AssemblyError, Diagnostic};
use ast_builder::AstBuilder;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

// Derive the lexer from our grammar file.
#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct Lc3Parser;

/// Lex and classify the whole source, one physical line at a time.
/// Diagnostics accumulate per line so a single run reports every bad line;
/// the phase as a whole fails if any line failed.
pub fn parse_source(source: &str) -> Result<Vec<AssemblyLine>, Vec<Diagnostic>> {
    let mut lines = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line_number = index + 1;
        match parse_line(text, line_number) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => {}
            Err(error) => diagnostics.push(Diagnostic::error(line_number, error)),
        }
    }

    if diagnostics.is_empty() {
        Ok(lines)
    } else {
        Err(diagnostics)
    }
}

// Blank and comment-only lines come back as None; they consume no location
// counter and carry nothing worth keeping.
fn parse_line(text: &str, line_number: usize) -> Result<Option<AssemblyLine>, AssemblyError> {
    let mut parsed = Lc3Parser::parse(Rule::line, text).map_err(lex_error)?;
    let tokens: Vec<Pair<Rule>> = match parsed.next() {
        Some(line) => line
            .into_inner()
            .filter(|pair| pair.as_rule() != Rule::EOI)
            .collect(),
        None => Vec::new(),
    };

    if tokens.is_empty() {
        return Ok(None);
    }

    let mut line = AssemblyLine {
        line_number,
        ..AssemblyLine::default()
    };
    let mut tokens = tokens.into_iter().peekable();

    // A leading token is a label definition iff it carries an explicit
    // colon, or it is a bareword that no mnemonic claims.
    if let Some(first) = tokens.peek() {
        match first.as_rule() {
            Rule::label_def => {
                let name = first.as_str().trim_end_matches(':').to_string();
                if ast_builder::is_reserved(&name) {
                    return Err(AssemblyError::ReservedLabel { name });
                }
                line.label = Some(name);
                tokens.next();
            }
            Rule::word if !ast_builder::is_mnemonic(first.as_str()) => {
                let name = first.as_str().to_string();
                if ast_builder::is_reserved(&name) {
                    return Err(AssemblyError::ReservedLabel { name });
                }
                line.label = Some(name);
                tokens.next();
            }
            _ => {}
        }
    }

    match tokens.next() {
        None => Ok(Some(line)),
        Some(token) => match token.as_rule() {
            Rule::word => {
                let mnemonic = token.as_str();
                if !ast_builder::is_mnemonic(mnemonic) {
                    return Err(AssemblyError::UnknownMnemonic {
                        text: mnemonic.to_string(),
                    });
                }
                let builder = AstBuilder::new(mnemonic, tokens)?;
                line.instruction = Some(builder.build_instruction()?);
                Ok(Some(line))
            }
            Rule::directive_name => {
                let builder = AstBuilder::new(token.as_str(), tokens)?;
                line.directive = Some(builder.build_directive()?);
                Ok(Some(line))
            }
            _ => Err(AssemblyError::UnknownMnemonic {
                text: token.as_str().to_string(),
            }),
        },
    }
}

fn lex_error(error: pest::error::Error<Rule>) -> AssemblyError {
    let col = match error.line_col {
        pest::error::LineColLocation::Pos((_, col)) => col,
        pest::error::LineColLocation::Span((_, col), _) => col,
    };
    AssemblyError::Lex {
        col,
        message: error.variant.message().into_owned(),
    }
}

// ------------- unit tests -------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CondCodes, Directive, FillValue, Imm, Instruction, Radix, Register};

    fn one_line(source: &str) -> AssemblyLine {
        let lines = parse_source(source).unwrap();
        assert_eq!(lines.len(), 1);
        lines.into_iter().next().unwrap()
    }

    fn one_error(source: &str) -> Diagnostic {
        let errors = parse_source(source).unwrap_err();
        assert_eq!(errors.len(), 1);
        errors.into_iter().next().unwrap()
    }

    #[test]
    fn test_parse_add_register_form() {
        let line = one_line("ADD R1, R2, R3\n");
        assert_eq!(
            line.instruction,
            Some(Instruction::AddReg(
                Register::R1,
                Register::R2,
                Register::R3
            ))
        );
        assert_eq!(line.label, None);
    }

    #[test]
    fn test_parse_add_immediate_form() {
        let line = one_line("ADD R1, R1, #-1\n");
        assert_eq!(
            line.instruction,
            Some(Instruction::AddImm(
                Register::R1,
                Register::R1,
                Imm {
                    value: -1,
                    radix: Radix::Dec
                }
            ))
        );
    }

    #[test]
    fn test_parse_and_hex_immediate() {
        let line = one_line("AND R0, R0, x1F\n");
        assert_eq!(
            line.instruction,
            Some(Instruction::AndImm(
                Register::R0,
                Register::R0,
                Imm {
                    value: 0x1F,
                    radix: Radix::Hex
                }
            ))
        );
    }

    #[test]
    fn test_parse_not() {
        let line = one_line("NOT R4, R5\n");
        assert_eq!(
            line.instruction,
            Some(Instruction::Not(Register::R4, Register::R5))
        );
    }

    #[test]
    fn test_parse_bare_br_is_unconditional() {
        let line = one_line("BR LOOP\n");
        assert_eq!(
            line.instruction,
            Some(Instruction::Br(CondCodes::ALL, "LOOP".to_string()))
        );
    }

    #[test]
    fn test_parse_brnp_flags() {
        let line = one_line("BRnp DONE\n");
        assert_eq!(
            line.instruction,
            Some(Instruction::Br(
                CondCodes {
                    n: true,
                    z: false,
                    p: true
                },
                "DONE".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_duplicate_br_flags_rejected() {
        let error = one_error("BRnn LOOP\n");
        assert_eq!(
            error.error,
            AssemblyError::BadCondCodes {
                text: "BRnn".to_string()
            }
        );
    }

    #[test]
    fn test_parse_label_with_colon() {
        let line = one_line("LOOP: ADD R1, R1, #-1\n");
        assert_eq!(line.label, Some("LOOP".to_string()));
        assert!(line.instruction.is_some());
    }

    #[test]
    fn test_parse_label_without_colon() {
        let line = one_line("LOOP ADD R1, R1, #-1\n");
        assert_eq!(line.label, Some("LOOP".to_string()));
        assert!(line.instruction.is_some());
    }

    #[test]
    fn test_parse_label_only_line() {
        let line = one_line("WAIT\n");
        assert_eq!(line.label, Some("WAIT".to_string()));
        assert_eq!(line.instruction, None);
        assert_eq!(line.directive, None);
    }

    #[test]
    fn test_parse_comment_only_line_is_skipped() {
        let lines = parse_source("; nothing to see here\n\n").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_parse_trailing_comment_is_stripped() {
        let line = one_line("ADD R1, R2, R3 ; increment\n");
        assert!(line.instruction.is_some());
    }

    #[test]
    fn test_parse_orig_directive() {
        let line = one_line(".ORIG x3000\n");
        assert_eq!(line.directive, Some(Directive::Orig(0x3000)));
    }

    #[test]
    fn test_parse_fill_with_label_operand() {
        let line = one_line("PTR .FILL TARGET\n");
        assert_eq!(line.label, Some("PTR".to_string()));
        assert_eq!(
            line.directive,
            Some(Directive::Fill(FillValue::Label("TARGET".to_string())))
        );
    }

    #[test]
    fn test_parse_blkw_bare_count() {
        let line = one_line("BUF .BLKW 4\n");
        assert_eq!(line.directive, Some(Directive::Blkw(4)));
    }

    #[test]
    fn test_parse_stringz_with_escape() {
        let line = one_line(".STRINGZ \"hi\\n\"\n");
        assert_eq!(line.directive, Some(Directive::Stringz("hi\n".to_string())));
    }

    #[test]
    fn test_parse_unknown_mnemonic_after_label() {
        let error = one_error("FOO BAZ R1\n");
        assert_eq!(
            error.error,
            AssemblyError::UnknownMnemonic {
                text: "BAZ".to_string()
            }
        );
    }

    #[test]
    fn test_parse_reserved_label_rejected() {
        let error = one_error("ADD: .FILL x0\n");
        assert_eq!(
            error.error,
            AssemblyError::ReservedLabel {
                name: "ADD".to_string()
            }
        );
    }

    #[test]
    fn test_parse_register_name_label_rejected() {
        let error = one_error("R0: .FILL x1\n");
        assert_eq!(
            error.error,
            AssemblyError::ReservedLabel {
                name: "R0".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bad_character_reports_column() {
        let error = one_error("ADD R1, R2, @\n");
        assert!(matches!(error.error, AssemblyError::Lex { col: 13, .. }));
    }

    #[test]
    fn test_parse_lowercase_mnemonic_is_not_recognized() {
        // Mnemonics are case-sensitive; a lowercase spelling reads as a
        // label definition and the rest of the line fails to classify.
        let error = one_error("add R1, R2, R3\n");
        assert_eq!(
            error.error,
            AssemblyError::UnknownMnemonic {
                text: "R1".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bad_operand_count() {
        let error = one_error("ADD R1, R2\n");
        assert_eq!(
            error.error,
            AssemblyError::BadOperandCount {
                mnemonic: "ADD".to_string(),
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_parse_bad_operand_kind() {
        let error = one_error("NOT R1, #4\n");
        assert_eq!(
            error.error,
            AssemblyError::BadOperandKind {
                mnemonic: "NOT".to_string(),
                position: 2,
                expected: "a register (R0-R7)",
                got: "#4".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors_accumulate_across_lines() {
        let errors = parse_source("FOO BAZ R1\nADD R1, R2\n").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[1].line, 2);
    }

    #[test]
    fn test_parse_trap_aliases() {
        assert_eq!(one_line("HALT\n").instruction, Some(Instruction::Halt));
        assert_eq!(one_line("PUTS\n").instruction, Some(Instruction::Puts));
    }

    #[test]
    fn test_parse_ret_takes_no_operands() {
        let error = one_error("RET R7\n");
        assert_eq!(
            error.error,
            AssemblyError::BadOperandCount {
                mnemonic: "RET".to_string(),
                expected: 0,
                got: 1
            }
        );
    }
}
