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

use crate::ast::{Instruction, Operand, Radix};
use crate::errors::AssemblyError;
use crate::parser::ast_builder::AstBuilder;

impl AstBuilder {
    // ADD DR, SR1, SR2 | ADD DR, SR1, imm5
    pub(crate) fn build_add(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(3)?;
        let dr = self.register_at(0)?;
        let sr1 = self.register_at(1)?;
        match &self.operands[2] {
            Operand::Register(sr2) => Ok(Instruction::AddReg(dr, sr1, *sr2)),
            Operand::Immediate(imm) if imm.radix != Radix::Bare => {
                Ok(Instruction::AddImm(dr, sr1, *imm))
            }
            other => Err(self.bad_kind(3, "a register or an immediate", other)),
        }
    }

    // AND DR, SR1, SR2 | AND DR, SR1, imm5
    pub(crate) fn build_and(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(3)?;
        let dr = self.register_at(0)?;
        let sr1 = self.register_at(1)?;
        match &self.operands[2] {
            Operand::Register(sr2) => Ok(Instruction::AndReg(dr, sr1, *sr2)),
            Operand::Immediate(imm) if imm.radix != Radix::Bare => {
                Ok(Instruction::AndImm(dr, sr1, *imm))
            }
            other => Err(self.bad_kind(3, "a register or an immediate", other)),
        }
    }

    // NOT DR, SR
    pub(crate) fn build_not(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(2)?;
        Ok(Instruction::Not(self.register_at(0)?, self.register_at(1)?))
    }
}
