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

use crate::ast::{Imm, Operand, Radix, Register};
use crate::errors::AssemblyError;
use crate::parser::ast_builder::AstBuilder;

impl AstBuilder {
    // The operand count is checked before any shape, so a wrong arity is
    // reported as such and not as a missing operand of some kind.
    pub(crate) fn expect_count(&self, expected: usize) -> Result<(), AssemblyError> {
        if self.operands.len() == expected {
            Ok(())
        } else {
            Err(AssemblyError::BadOperandCount {
                mnemonic: self.mnemonic.clone(),
                expected,
                got: self.operands.len(),
            })
        }
    }

    pub(crate) fn bad_kind(
        &self,
        position: usize,
        expected: &'static str,
        got: &Operand,
    ) -> AssemblyError {
        AssemblyError::BadOperandKind {
            mnemonic: self.mnemonic.clone(),
            position,
            expected,
            got: operand_text(got),
        }
    }

    pub(crate) fn register_at(&self, index: usize) -> Result<Register, AssemblyError> {
        match &self.operands[index] {
            Operand::Register(register) => Ok(*register),
            other => Err(self.bad_kind(index + 1, "a register (R0-R7)", other)),
        }
    }

    pub(crate) fn label_at(&self, index: usize) -> Result<String, AssemblyError> {
        match &self.operands[index] {
            Operand::Label(name) => Ok(name.clone()),
            other => Err(self.bad_kind(index + 1, "a label", other)),
        }
    }

    // Instruction immediates must be spelled #n or xNN.
    pub(crate) fn immediate_at(&self, index: usize) -> Result<Imm, AssemblyError> {
        match &self.operands[index] {
            Operand::Immediate(imm) if imm.radix != Radix::Bare => Ok(*imm),
            other => Err(self.bad_kind(index + 1, "an immediate (#n or xNN)", other)),
        }
    }

    /// Any numeric spelling, including a bare decimal count.
    pub(crate) fn count_at(&self, index: usize) -> Result<Imm, AssemblyError> {
        match &self.operands[index] {
            Operand::Immediate(imm) => Ok(*imm),
            other => Err(self.bad_kind(index + 1, "a number", other)),
        }
    }

    pub(crate) fn string_at(&self, index: usize) -> Result<String, AssemblyError> {
        match &self.operands[index] {
            Operand::String(text) => Ok(text.clone()),
            other => Err(self.bad_kind(index + 1, "a quoted string", other)),
        }
    }
}

// Echo an operand back the way the programmer spelled it, near enough.
pub(crate) fn operand_text(operand: &Operand) -> String {
    match operand {
        Operand::Register(register) => format!("R{}", register.index()),
        Operand::Immediate(imm) => match imm.radix {
            Radix::Dec => format!("#{}", imm.value),
            Radix::Hex => format!("x{:X}", imm.value),
            Radix::Bare => imm.value.to_string(),
        },
        Operand::Label(name) => name.clone(),
        Operand::String(text) => format!("\"{}\"", text),
    }
}
