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

use crate::ast::{Imm, Radix};
use crate::errors::AssemblyError;

/// Pack an immediate into `width` bits. A decimal spelling is a signed
/// two's-complement quantity; a hex spelling is an unsigned bit pattern
/// reduced modulo 2^width.
pub fn immediate_field(imm: Imm, width: u8) -> Result<u16, AssemblyError> {
    let mask = (1u32 << width) - 1;
    match imm.radix {
        Radix::Dec => {
            let min = -(1i32 << (width - 1));
            let max = (1i32 << (width - 1)) - 1;
            if imm.value < min || imm.value > max {
                return Err(AssemblyError::ImmediateOutOfRange {
                    value: imm.value,
                    width,
                });
            }
            Ok((imm.value as u32 & mask) as u16)
        }
        Radix::Hex | Radix::Bare => {
            if imm.value < 0 || imm.value as u32 > mask {
                return Err(AssemblyError::ImmediateOutOfRange {
                    value: imm.value,
                    width,
                });
            }
            Ok(imm.value as u16)
        }
    }
}

/// PC-relative field: `to − (from + 1)`, two's-complement in `width` bits.
/// At run time the processor adds the field to the incremented PC.
pub fn offset_field(from: u16, to: u16, width: u8) -> Result<u16, AssemblyError> {
    let offset = to as i32 - (from as i32 + 1);
    let min = -(1i32 << (width - 1));
    let max = (1i32 << (width - 1)) - 1;
    if offset < min || offset > max {
        return Err(AssemblyError::OffsetOutOfRange { from, to, width });
    }
    let mask = (1u32 << width) - 1;
    Ok((offset as u32 & mask) as u16)
}

// Trap vectors are unsigned indexes whatever their spelling.
pub fn trap_vector(imm: Imm) -> Result<u16, AssemblyError> {
    if imm.value < 0 || imm.value > 0xFF {
        return Err(AssemblyError::ImmediateOutOfRange {
            value: imm.value,
            width: 8,
        });
    }
    Ok(imm.value as u16)
}

/// A `.FILL` cell carries the full word.
pub fn fill_word(imm: Imm) -> Result<u16, AssemblyError> {
    match imm.radix {
        Radix::Dec => {
            if imm.value < i16::MIN as i32 || imm.value > i16::MAX as i32 {
                return Err(AssemblyError::ImmediateOutOfRange {
                    value: imm.value,
                    width: 16,
                });
            }
            Ok(imm.value as i16 as u16)
        }
        Radix::Hex | Radix::Bare => {
            if imm.value < 0 || imm.value > u16::MAX as i32 {
                return Err(AssemblyError::ImmediateOutOfRange {
                    value: imm.value,
                    width: 16,
                });
            }
            Ok(imm.value as u16)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i32) -> Imm {
        Imm {
            value,
            radix: Radix::Dec,
        }
    }

    fn hex(value: i32) -> Imm {
        Imm {
            value,
            radix: Radix::Hex,
        }
    }

    #[test]
    fn test_immediate_field_decimal_bounds() {
        assert_eq!(immediate_field(dec(-16), 5).unwrap(), 0b10000);
        assert_eq!(immediate_field(dec(15), 5).unwrap(), 0b01111);
        assert_eq!(immediate_field(dec(-1), 5).unwrap(), 0b11111);
        assert_eq!(
            immediate_field(dec(16), 5),
            Err(AssemblyError::ImmediateOutOfRange {
                value: 16,
                width: 5
            })
        );
        assert_eq!(
            immediate_field(dec(-17), 5),
            Err(AssemblyError::ImmediateOutOfRange {
                value: -17,
                width: 5
            })
        );
    }

    #[test]
    fn test_immediate_field_hex_is_unsigned() {
        assert_eq!(immediate_field(hex(0x1F), 5).unwrap(), 0b11111);
        assert_eq!(
            immediate_field(hex(0x20), 5),
            Err(AssemblyError::ImmediateOutOfRange {
                value: 0x20,
                width: 5
            })
        );
    }

    #[test]
    fn test_offset_field_nine_bit_bounds() {
        assert_eq!(offset_field(0x3001, 0x3000, 9).unwrap(), 0x1FE);
        assert_eq!(offset_field(0x3000, 0x3100, 9).unwrap(), 0x0FF);
        assert_eq!(offset_field(0x3100, 0x3001, 9).unwrap(), 0x100);
        assert_eq!(
            offset_field(0x3000, 0x3101, 9),
            Err(AssemblyError::OffsetOutOfRange {
                from: 0x3000,
                to: 0x3101,
                width: 9
            })
        );
        assert_eq!(
            offset_field(0x3101, 0x3001, 9),
            Err(AssemblyError::OffsetOutOfRange {
                from: 0x3101,
                to: 0x3001,
                width: 9
            })
        );
    }

    #[test]
    fn test_offset_field_next_instruction_is_zero() {
        assert_eq!(offset_field(0x3000, 0x3001, 9).unwrap(), 0);
    }

    #[test]
    fn test_trap_vector_range() {
        assert_eq!(trap_vector(hex(0x25)).unwrap(), 0x25);
        assert_eq!(
            trap_vector(hex(0x100)),
            Err(AssemblyError::ImmediateOutOfRange {
                value: 0x100,
                width: 8
            })
        );
    }

    #[test]
    fn test_fill_word_round_trip() {
        assert_eq!(fill_word(dec(-32768)).unwrap(), 0x8000);
        assert_eq!(fill_word(dec(32767)).unwrap(), 0x7FFF);
        assert_eq!(fill_word(dec(-1)).unwrap(), 0xFFFF);
        assert_eq!(fill_word(hex(0xABCD)).unwrap(), 0xABCD);
        assert_eq!(
            fill_word(dec(32768)),
            Err(AssemblyError::ImmediateOutOfRange {
                value: 32768,
                width: 16
            })
        );
    }
}
