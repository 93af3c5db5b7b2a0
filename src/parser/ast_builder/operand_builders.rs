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
use crate::parser::Rule;
use pest::iterators::Pair;

// Helper to build an Operand from a lexed token.
pub fn build_operand(
    mnemonic: &str,
    position: usize,
    pair: Pair<Rule>,
) -> Result<Operand, AssemblyError> {
    match pair.as_rule() {
        Rule::register => Ok(Operand::Register(build_register(pair.as_str()))),
        Rule::dec_literal => build_decimal(pair.as_str()),
        Rule::hex_literal => build_hex(pair.as_str()),
        Rule::uint_literal => build_bare(pair.as_str()),
        Rule::word => Ok(Operand::Label(pair.as_str().to_string())),
        Rule::string_literal => build_string(pair),
        _ => Err(AssemblyError::BadOperandKind {
            mnemonic: mnemonic.to_string(),
            position,
            expected: "an operand",
            got: pair.as_str().to_string(),
        }),
    }
}

fn build_register(text: &str) -> Register {
    match text {
        "R0" => Register::R0,
        "R1" => Register::R1,
        "R2" => Register::R2,
        "R3" => Register::R3,
        "R4" => Register::R4,
        "R5" => Register::R5,
        "R6" => Register::R6,
        "R7" => Register::R7,
        _ => unreachable!("register token out of range: {}", text),
    }
}

// `#` immediates are signed decimal. Values outside i32 can only come from
// absurdly long digit runs; report them against the widest field.
fn build_decimal(text: &str) -> Result<Operand, AssemblyError> {
    let digits = &text[1..];
    let value = match digits.parse::<i32>() {
        Ok(value) => value,
        Err(_) => {
            let clamped = if digits.starts_with('-') {
                i32::MIN
            } else {
                i32::MAX
            };
            return Err(AssemblyError::ImmediateOutOfRange {
                value: clamped,
                width: 16,
            });
        }
    };
    Ok(Operand::Immediate(Imm {
        value,
        radix: Radix::Dec,
    }))
}

// `x` immediates are unsigned bit patterns; nothing wider than 16 bits can
// ever be stored, so over-long literals are rejected here.
fn build_hex(text: &str) -> Result<Operand, AssemblyError> {
    let digits = &text[1..];
    let value = u32::from_str_radix(digits, 16).unwrap_or(u32::MAX);
    if value > u16::MAX as u32 {
        return Err(AssemblyError::ImmediateOutOfRange {
            value: value.min(i32::MAX as u32) as i32,
            width: 16,
        });
    }
    Ok(Operand::Immediate(Imm {
        value: value as i32,
        radix: Radix::Hex,
    }))
}

fn build_bare(text: &str) -> Result<Operand, AssemblyError> {
    let value = text.parse::<u32>().unwrap_or(u32::MAX);
    if value > u16::MAX as u32 {
        return Err(AssemblyError::ImmediateOutOfRange {
            value: value.min(i32::MAX as u32) as i32,
            width: 16,
        });
    }
    Ok(Operand::Immediate(Imm {
        value: value as i32,
        radix: Radix::Bare,
    }))
}

fn build_string(pair: Pair<Rule>) -> Result<Operand, AssemblyError> {
    let raw = match pair.into_inner().next() {
        Some(inner) => inner.as_str().to_string(),
        None => String::new(),
    };

    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            text.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some('0') => text.push('\0'),
            Some('\\') => text.push('\\'),
            Some('"') => text.push('"'),
            other => {
                let sequence = match other {
                    Some(ch) => format!("\\{}", ch),
                    None => "\\".to_string(),
                };
                return Err(AssemblyError::BadStringEscape { sequence });
            }
        }
    }
    Ok(Operand::String(text))
}
