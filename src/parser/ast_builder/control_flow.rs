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

use crate::ast::{CondCodes, Instruction};
use crate::errors::AssemblyError;
use crate::parser::ast_builder::AstBuilder;

impl AstBuilder {
    // BR[nzp] LABEL. The flags ride in the mnemonic itself.
    pub(crate) fn build_br(self) -> Result<Instruction, AssemblyError> {
        let codes = parse_cond_codes(&self.mnemonic)?;
        self.expect_count(1)?;
        Ok(Instruction::Br(codes, self.label_at(0)?))
    }

    pub(crate) fn build_jmp(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(1)?;
        Ok(Instruction::Jmp(self.register_at(0)?))
    }

    pub(crate) fn build_jsr(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(1)?;
        Ok(Instruction::Jsr(self.label_at(0)?))
    }

    pub(crate) fn build_jsrr(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(1)?;
        Ok(Instruction::Jsrr(self.register_at(0)?))
    }

    // TRAP trapvect8; the vector range is checked at encode time.
    pub(crate) fn build_trap(self) -> Result<Instruction, AssemblyError> {
        self.expect_count(1)?;
        Ok(Instruction::Trap(self.immediate_at(0)?))
    }

    // RET, RTI and the TRAP aliases.
    pub(crate) fn build_no_operand(
        self,
        instruction: Instruction,
    ) -> Result<Instruction, AssemblyError> {
        self.expect_count(0)?;
        Ok(instruction)
    }
}

// Bare BR is an unconditional branch. Each flag may appear once, in any
// order.
fn parse_cond_codes(mnemonic: &str) -> Result<CondCodes, AssemblyError> {
    let flags = mnemonic.strip_prefix("BR").unwrap_or("");
    if flags.is_empty() {
        return Ok(CondCodes::ALL);
    }

    let mut codes = CondCodes::default();
    for ch in flags.chars() {
        let slot = match ch {
            'n' => &mut codes.n,
            'z' => &mut codes.z,
            'p' => &mut codes.p,
            _ => {
                return Err(AssemblyError::BadCondCodes {
                    text: mnemonic.to_string(),
                });
            }
        };
        if *slot {
            return Err(AssemblyError::BadCondCodes {
                text: mnemonic.to_string(),
            });
        }
        *slot = true;
    }
    Ok(codes)
}
