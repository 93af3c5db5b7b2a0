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

mod constants;
mod fields;

use crate::assembler::symbol_table::{SymbolTable, get_symbol};
use crate::ast::{AssemblyLine, Directive, FillValue, Instruction};
use crate::errors::{AssemblyError, Diagnostic};
use constants::*;
use fields::*;

/// Pass 2: lay every line out as 16-bit words, with the symbol table held
/// as a read-only view. A failing line reports its diagnostic and emits
/// placeholder words so every later address stays truthful; the pass as a
/// whole fails at completion if anything accumulated.
pub fn encode_program(
    lines: &[AssemblyLine],
    symbol_table: &SymbolTable,
    origin: u16,
) -> Result<Vec<u16>, Vec<Diagnostic>> {
    let mut encoder = Encoder::new(symbol_table, origin);
    for line in lines {
        if !encoder.encode_line(line) {
            break;
        }
    }
    encoder.finish()
}

struct Encoder<'a> {
    symbol_table: &'a SymbolTable,
    lc: u16,
    words: Vec<u16>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Encoder<'a> {
    fn new(symbol_table: &'a SymbolTable, origin: u16) -> Self {
        Encoder {
            symbol_table,
            lc: origin,
            words: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> Result<Vec<u16>, Vec<Diagnostic>> {
        if self.diagnostics.is_empty() {
            Ok(self.words)
        } else {
            Err(self.diagnostics)
        }
    }

    // Returns false on .END to stop the walk.
    fn encode_line(&mut self, line: &AssemblyLine) -> bool {
        if let Some(directive) = &line.directive {
            match directive {
                Directive::Orig(_) => {} // consumed by pass 1
                Directive::End => return false,
                Directive::Fill(value) => {
                    let word = self.fill_value(value).unwrap_or_else(|error| {
                        self.report(line, error);
                        0
                    });
                    self.emit(word);
                }
                Directive::Blkw(count) => {
                    for _ in 0..*count {
                        self.emit(0);
                    }
                }
                Directive::Stringz(text) => {
                    for ch in text.chars() {
                        self.emit(ch as u16);
                    }
                    self.emit(0);
                }
            }
        }

        if let Some(instruction) = &line.instruction {
            let word = self.encode_instruction(instruction).unwrap_or_else(|error| {
                self.report(line, error);
                0
            });
            self.emit(word);
        }

        true
    }

    // One 16-bit word per variant, fields laid out MSB first per the ISA.
    fn encode_instruction(&self, instruction: &Instruction) -> Result<u16, AssemblyError> {
        match instruction {
            Instruction::AddReg(dr, sr1, sr2) => {
                Ok((OP_ADD << 12) | (dr.index() << 9) | (sr1.index() << 6) | sr2.index())
            }
            Instruction::AddImm(dr, sr1, imm) => Ok((OP_ADD << 12)
                | (dr.index() << 9)
                | (sr1.index() << 6)
                | (1 << 5)
                | immediate_field(*imm, 5)?),
            Instruction::AndReg(dr, sr1, sr2) => {
                Ok((OP_AND << 12) | (dr.index() << 9) | (sr1.index() << 6) | sr2.index())
            }
            Instruction::AndImm(dr, sr1, imm) => Ok((OP_AND << 12)
                | (dr.index() << 9)
                | (sr1.index() << 6)
                | (1 << 5)
                | immediate_field(*imm, 5)?),
            Instruction::Not(dr, sr) => {
                Ok((OP_NOT << 12) | (dr.index() << 9) | (sr.index() << 6) | 0b111111)
            }

            Instruction::Ld(dr, label) => {
                Ok((OP_LD << 12) | (dr.index() << 9) | self.pc_offset(label, 9)?)
            }
            Instruction::Ldi(dr, label) => {
                Ok((OP_LDI << 12) | (dr.index() << 9) | self.pc_offset(label, 9)?)
            }
            Instruction::Lea(dr, label) => {
                Ok((OP_LEA << 12) | (dr.index() << 9) | self.pc_offset(label, 9)?)
            }
            Instruction::St(sr, label) => {
                Ok((OP_ST << 12) | (sr.index() << 9) | self.pc_offset(label, 9)?)
            }
            Instruction::Sti(sr, label) => {
                Ok((OP_STI << 12) | (sr.index() << 9) | self.pc_offset(label, 9)?)
            }
            Instruction::Ldr(dr, base, offset) => Ok((OP_LDR << 12)
                | (dr.index() << 9)
                | (base.index() << 6)
                | immediate_field(*offset, 6)?),
            Instruction::Str(sr, base, offset) => Ok((OP_STR << 12)
                | (sr.index() << 9)
                | (base.index() << 6)
                | immediate_field(*offset, 6)?),

            Instruction::Br(codes, label) => {
                Ok((OP_BR << 12) | (codes.bits() << 9) | self.pc_offset(label, 9)?)
            }
            Instruction::Jmp(base) => Ok((OP_JMP << 12) | (base.index() << 6)),
            Instruction::Jsr(label) => {
                Ok((OP_JSR << 12) | (1 << 11) | self.pc_offset(label, 11)?)
            }
            Instruction::Jsrr(base) => Ok((OP_JSR << 12) | (base.index() << 6)),
            Instruction::Ret => Ok((OP_JMP << 12) | (7 << 6)),
            Instruction::Rti => Ok(OP_RTI << 12),

            Instruction::Trap(vector) => Ok((OP_TRAP << 12) | trap_vector(*vector)?),
            Instruction::Getc => Ok(TRAP_GETC),
            Instruction::Out => Ok(TRAP_OUT),
            Instruction::Puts => Ok(TRAP_PUTS),
            Instruction::In => Ok(TRAP_IN),
            Instruction::Putsp => Ok(TRAP_PUTSP),
            Instruction::Halt => Ok(TRAP_HALT),
        }
    }

    // self.lc is the address of the instruction being encoded; the word has
    // not been emitted yet.
    fn pc_offset(&self, label: &str, width: u8) -> Result<u16, AssemblyError> {
        let symbol = get_symbol(self.symbol_table, label)?;
        offset_field(self.lc, symbol.address, width)
    }

    fn fill_value(&self, value: &FillValue) -> Result<u16, AssemblyError> {
        match value {
            FillValue::Immediate(imm) => fill_word(*imm),
            FillValue::Label(name) => Ok(get_symbol(self.symbol_table, name)?.address),
        }
    }

    fn report(&mut self, line: &AssemblyLine, error: AssemblyError) {
        self.diagnostics
            .push(Diagnostic::error(line.line_number, error));
    }

    fn emit(&mut self, word: u16) {
        self.words.push(word);
        self.lc = self.lc.wrapping_add(1);
    }
}

// ------------- unit tests -------------
