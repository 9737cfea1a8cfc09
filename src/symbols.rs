//! Registry of declared variables and constants.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    String,
    IntegerConst,
    FloatConst,
    StringConst,
    Identifier,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            DataType::Integer => "Int",
            DataType::Float => "Float",
            DataType::String => "String",
            DataType::IntegerConst => "INT_CTE",
            DataType::FloatConst => "FLOAT_CTE",
            DataType::StringConst => "STRING_CTE",
            DataType::Identifier => "IDENTIFIER",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(DataType::Integer),
            "float" => Ok(DataType::Float),
            "string" => Ok(DataType::String),
            "int_const" | "int_cte" => Ok(DataType::IntegerConst),
            "float_const" | "float_cte" => Ok(DataType::FloatConst),
            "string_const" | "string_cte" => Ok(DataType::StringConst),
            "id" | "identifier" => Ok(DataType::Identifier),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub data_type: Option<DataType>,
    pub value: Option<String>,
    pub length: Option<usize>,
}

impl SymbolEntry {
    pub fn new(name: &str) -> Self {
        SymbolEntry {
            name: name.to_string(),
            data_type: None,
            value: None,
            length: None,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Sets the literal value; the length follows the value.
    pub fn with_value(mut self, value: &str) -> Self {
        self.length = Some(value.chars().count());
        self.value = Some(value.to_string());
        self
    }

    /// Declared type, with an unset type read as `Float`.
    pub fn data_type(&self) -> DataType {
        self.data_type.unwrap_or(DataType::Float)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: BTreeMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts or replaces an entry under its normalized name.
    pub fn insert(&mut self, mut entry: SymbolEntry) {
        let key = normalize_name(&entry.name);
        entry.name = key.clone();
        self.entries.insert(key, entry);
    }

    pub fn set_type(&mut self, name: &str, data_type: DataType) -> bool {
        match self.entries.get_mut(&normalize_name(name)) {
            Some(entry) => {
                entry.data_type = Some(data_type);
                true
            }
            None => false,
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(&normalize_name(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<SymbolEntry> {
        self.entries.remove(&normalize_name(name))
    }

    /// Entries in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
