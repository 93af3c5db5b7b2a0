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

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("syntax error at column {col}: {message}")]
    Lex { col: usize, message: String },

    #[error("program must begin with .ORIG")]
    MissingOrig,

    #[error(".ORIG appears more than once")]
    DuplicateOrig,

    #[error("unknown mnemonic \"{text}\"")]
    UnknownMnemonic { text: String },

    #[error("{mnemonic} expects {expected} operand(s), got {got}")]
    BadOperandCount {
        mnemonic: String,
        expected: usize,
        got: usize,
    },

    #[error("{mnemonic} operand {position}: expected {expected}, got \"{got}\"")]
    BadOperandKind {
        mnemonic: String,
        position: usize,
        expected: &'static str,
        got: String,
    },

    #[error("immediate {value} does not fit in {width} bits")]
    ImmediateOutOfRange { value: i32, width: u8 },

    #[error("target x{to:04X} is out of range of x{from:04X} ({width}-bit offset)")]
    OffsetOutOfRange { from: u16, to: u16, width: u8 },

    #[error("undefined label \"{name}\"")]
    UndefinedLabel { name: String },

    #[error("duplicate label \"{name}\" on line {second_line} (first defined on line {first_line})")]
    DuplicateLabel {
        name: String,
        first_line: usize,
        second_line: usize,
    },

    #[error("invalid condition codes in \"{text}\"")]
    BadCondCodes { text: String },

    #[error("unknown directive \"{name}\"")]
    BadDirective { name: String },

    #[error("\"{name}\" is a reserved word and cannot be a label")]
    ReservedLabel { name: String },

    #[error("invalid escape sequence \"{sequence}\" in string literal")]
    BadStringEscape { sequence: String },

    #[error("program does not fit below x10000")]
    LabelOverflow,

    #[error("missing .END directive")]
    MissingEnd,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

// A source-line-tagged error or warning. Phases accumulate these and keep
// going, so a single run reports every diagnostic in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub error: AssemblyError,
}

impl Diagnostic {
    pub fn error(line: usize, error: AssemblyError) -> Self {
        Diagnostic {
            line,
            severity: Severity::Error,
            error,
        }
    }

    pub fn warning(line: usize, error: AssemblyError) -> Self {
        Diagnostic {
            line,
            severity: Severity::Warning,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{} on line {}: {}", tag, self.line, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::error(
            4,
            AssemblyError::ImmediateOutOfRange {
                value: 16,
                width: 5,
            },
        );
        assert_eq!(
            diagnostic.to_string(),
            "error on line 4: immediate 16 does not fit in 5 bits"
        );
    }

    #[test]
    fn test_warning_is_not_an_error() {
        let warning = Diagnostic::warning(9, AssemblyError::MissingEnd);
        assert!(!warning.is_error());
        assert_eq!(warning.to_string(), "warning on line 9: missing .END directive");
    }
}
