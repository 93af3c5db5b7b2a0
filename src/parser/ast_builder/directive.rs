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

use crate::ast::{Directive, FillValue, Operand};
use crate::errors::AssemblyError;
use crate::parser::ast_builder::AstBuilder;

impl AstBuilder {
    // .ORIG addr16 — an unsigned load address in any numeric spelling.
    pub(crate) fn build_orig(self) -> Result<Directive, AssemblyError> {
        self.expect_count(1)?;
        let imm = self.count_at(0)?;
        if imm.value < 0 || imm.value > u16::MAX as i32 {
            return Err(AssemblyError::ImmediateOutOfRange {
                value: imm.value,
                width: 16,
            });
        }
        Ok(Directive::Orig(imm.value as u16))
    }

    // .FILL value16 | .FILL LABEL; the 16-bit range check happens at
    // encode time like every other immediate.
    pub(crate) fn build_fill(self) -> Result<Directive, AssemblyError> {
        self.expect_count(1)?;
        match &self.operands[0] {
            Operand::Immediate(imm) => Ok(Directive::Fill(FillValue::Immediate(*imm))),
            Operand::Label(name) => Ok(Directive::Fill(FillValue::Label(name.clone()))),
            other => Err(self.bad_kind(1, "an immediate or a label", other)),
        }
    }

    // .BLKW count — reserves count zeroed words.
    pub(crate) fn build_blkw(self) -> Result<Directive, AssemblyError> {
        self.expect_count(1)?;
        let imm = self.count_at(0)?;
        if imm.value < 0 || imm.value > u16::MAX as i32 {
            return Err(AssemblyError::ImmediateOutOfRange {
                value: imm.value,
                width: 16,
            });
        }
        Ok(Directive::Blkw(imm.value as u16))
    }

    pub(crate) fn build_stringz(self) -> Result<Directive, AssemblyError> {
        self.expect_count(1)?;
        Ok(Directive::Stringz(self.string_at(0)?))
    }

    pub(crate) fn build_end(self) -> Result<Directive, AssemblyError> {
        self.expect_count(0)?;
        Ok(Directive::End)
    }
}
