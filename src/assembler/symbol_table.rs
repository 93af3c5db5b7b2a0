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

use crate::errors::AssemblyError;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Address the label binds to: the location counter at its definition.
    pub address: u16,
    /// Source line of the definition, kept for duplicate reporting.
    pub line: usize,
}

// The symbol table stores label names and their calculated addresses. It is
// fully populated by pass 1 and read-only from then on.
pub type SymbolTable = HashMap<String, Symbol>;

pub fn get_symbol<'a>(
    symbol_table: &'a SymbolTable,
    label_name: &str,
) -> Result<&'a Symbol, AssemblyError> {
    symbol_table
        .get(label_name)
        .ok_or_else(|| AssemblyError::UndefinedLabel {
            name: label_name.to_string(),
        })
}
