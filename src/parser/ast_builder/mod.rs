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

mod control_flow;
mod data_movement;
mod directive;
mod operand_builders;
mod operate;
mod validators;

use crate::ast::{Directive, Instruction, Operand};
use crate::errors::AssemblyError;
use crate::parser::Rule;
use operand_builders::build_operand;
use pest::iterators::Pair;

// Every bareword outside this set (and the BR family) is a label.
const MNEMONICS: &[&str] = &[
    "ADD", "AND", "NOT", "LD", "LDI", "LDR", "LEA", "ST", "STI", "STR", "JMP", "JSR", "JSRR",
    "RET", "RTI", "TRAP", "GETC", "OUT", "PUTS", "IN", "PUTSP", "HALT",
];

pub fn is_mnemonic(text: &str) -> bool {
    MNEMONICS.contains(&text) || is_branch(text)
}

/// Identifiers a label may not use: mnemonics, the BR family, and register
/// names.
pub fn is_reserved(text: &str) -> bool {
    is_mnemonic(text) || is_register_name(text)
}

fn is_register_name(text: &str) -> bool {
    matches!(
        text,
        "R0" | "R1" | "R2" | "R3" | "R4" | "R5" | "R6" | "R7"
    )
}

// `BR` followed by any run of n/z/p flag letters, including none. A word
// with duplicated flags still classifies as a branch so it can be reported
// as BadCondCodes instead of turning into a label.
pub fn is_branch(text: &str) -> bool {
    match text.strip_prefix("BR") {
        Some(flags) => flags.chars().all(|ch| matches!(ch, 'n' | 'z' | 'p')),
        None => false,
    }
}

pub struct AstBuilder {
    mnemonic: String,
    operands: Vec<Operand>,
}

impl AstBuilder {
    /// Eagerly builds the operand list; the mnemonic string is kept for
    /// diagnostics and for BR flag parsing.
    pub fn new<'a>(
        mnemonic: &str,
        tokens: impl Iterator<Item = Pair<'a, Rule>>,
    ) -> Result<Self, AssemblyError> {
        let mut operands = Vec::new();
        for (index, pair) in tokens.enumerate() {
            operands.push(build_operand(mnemonic, index + 1, pair)?);
        }
        Ok(AstBuilder {
            mnemonic: mnemonic.to_string(),
            operands,
        })
    }

    pub fn build_instruction(self) -> Result<Instruction, AssemblyError> {
        match self.mnemonic.as_str() {
            "ADD" => self.build_add(),
            "AND" => self.build_and(),
            "NOT" => self.build_not(),
            "LD" => self.build_ld(),
            "LDI" => self.build_ldi(),
            "LDR" => self.build_ldr(),
            "LEA" => self.build_lea(),
            "ST" => self.build_st(),
            "STI" => self.build_sti(),
            "STR" => self.build_str(),
            "JMP" => self.build_jmp(),
            "JSR" => self.build_jsr(),
            "JSRR" => self.build_jsrr(),
            "RET" => self.build_no_operand(Instruction::Ret),
            "RTI" => self.build_no_operand(Instruction::Rti),
            "TRAP" => self.build_trap(),
            "GETC" => self.build_no_operand(Instruction::Getc),
            "OUT" => self.build_no_operand(Instruction::Out),
            "PUTS" => self.build_no_operand(Instruction::Puts),
            "IN" => self.build_no_operand(Instruction::In),
            "PUTSP" => self.build_no_operand(Instruction::Putsp),
            "HALT" => self.build_no_operand(Instruction::Halt),
            _ => self.build_br(),
        }
    }

    pub fn build_directive(self) -> Result<Directive, AssemblyError> {
        match self.mnemonic.as_str() {
            ".ORIG" => self.build_orig(),
            ".FILL" => self.build_fill(),
            ".BLKW" => self.build_blkw(),
            ".STRINGZ" => self.build_stringz(),
            ".END" => self.build_end(),
            _ => Err(AssemblyError::BadDirective {
                name: self.mnemonic,
            }),
        }
    }
}
