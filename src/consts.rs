//! The table of numeric values used by [`Expr::approximate`](crate::expr::Expr::approximate).
//!
//! The table is an explicit value type rather than ambient global state, so
//! callers can supply their own substitutions; a lazily-built default covers
//! the usual mathematical constants.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The default table: `e` and the three spellings of pi (`pi`, `\pi`, `π`).
///
/// Pure integers (atoms with an empty constant name) never consult the table;
/// their symbolic part is structurally 1.
pub static DEFAULT_CONSTANTS: Lazy<ConstantTable> = Lazy::new(ConstantTable::default);

/// Maps constant names to their floating-point values.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTable {
    entries: HashMap<String, f64>,
}

impl ConstantTable {
    /// Creates an empty table. Approximating any named constant against an empty
    /// table fails with
    /// [`UnknownConstant`](crate::error::AlgebraError::UnknownConstant).
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Registers a value for the given constant name, replacing any previous
    /// entry.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Looks up the value registered for the given constant name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }
}

impl Default for ConstantTable {
    fn default() -> Self {
        let mut table = Self::new();
        table.insert("e", std::f64::consts::E);
        table.insert("pi", std::f64::consts::PI);
        table.insert("\\pi", std::f64::consts::PI);
        table.insert("\u{03c0}", std::f64::consts::PI);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entries() {
        assert_eq!(DEFAULT_CONSTANTS.get("e"), Some(std::f64::consts::E));
        assert_eq!(DEFAULT_CONSTANTS.get("pi"), Some(std::f64::consts::PI));
        assert_eq!(DEFAULT_CONSTANTS.get("\\pi"), Some(std::f64::consts::PI));
        assert_eq!(DEFAULT_CONSTANTS.get("π"), Some(std::f64::consts::PI));
        assert_eq!(DEFAULT_CONSTANTS.get("phi"), None);
    }

    #[test]
    fn insert_overrides() {
        let mut table = ConstantTable::default();
        table.insert("pi", 3.0);
        assert_eq!(table.get("pi"), Some(3.0));
    }
}
