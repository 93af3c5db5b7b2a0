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

use crate::ast::{Instruction, Register};
use crate::errors::AssemblyError;
use crate::parser::ast_builder::AstBuilder;

impl AstBuilder {
    // Shared shape of LD/LDI/LEA/ST/STI: a register and a label reference.
    fn register_and_label(&self) -> Result<(Register, String), AssemblyError> {
        self.expect_count(2)?;
        Ok((self.register_at(0)?, self.label_at(1)?))
    }

    pub(crate) fn build_ld(self) -> Result<Instruction, AssemblyError> {
        let (dr, label) = self.register_and_label()?;
        Ok(Instruction::Ld(dr, label))
    }

    pub(crate) fn build_ldi(self) -> Result<Instruction, AssemblyError> {
        let (dr, label) = self.register_and_label()?;
        Ok(Instruction::Ldi(dr, label))
    }

    pub(crate) fn build_lea(self) -> Result<Instruction, AssemblyError> {
        let (dr, label) = self.register_and_label()?;
        Ok(Instruction::Lea(dr, label))
    }

    pub(crate) fn build_st(self) -> Result<Instruction, AssemblyError> {
        let (sr, label) = self.register_and_label()?;
        Ok(Instruction::St(sr, label))
    }

    pub(crate) fn build_sti(self) -> Result<Instruction, AssemblyError> {
        let (sr, label) = self.register_and_label()?;
        Ok(Instruction::Sti(sr, label))
    }

    // LDR DR, BaseR, offset6
    pub(crate) fn build_ldr(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(3)?;
        Ok(Instruction::Ldr(
            self.register_at(0)?,
            self.register_at(1)?,
            self.immediate_at(2)?,
        ))
    }

    // STR SR, BaseR, offset6
    pub(crate) fn build_str(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(3)?;
        Ok(Instruction::Str(
            self.register_at(0)?,
            self.register_at(1)?,
            self.immediate_at(2)?,
        ))
    }
}
