//! Atoms: an integer coefficient times an optional named constant.
//!
//! Atoms are the leaves of every expression. A pure integer is an atom whose
//! constant name is empty, and the zero atom (`coefficient == 0`, empty name)
//! is the unique representation of zero; [`Atom::new`] erases the constant
//! whenever the coefficient is zero so `0x` cannot exist.

use super::{Exponential, Expr, Product, Sum};
use crate::consts::ConstantTable;
use crate::error::{AlgebraError, Result};
use crate::primitive::int;
use rug::Integer;

#[derive(Debug, Clone)]
pub struct Atom {
    /// The integer multiplier.
    pub coefficient: Integer,

    /// The constant name, or the empty string for a pure integer.
    pub constant: String,
}

impl Atom {
    /// Creates an atom, normalizing zero: a zero coefficient always produces
    /// the bare atom `0` regardless of the constant passed in.
    pub fn new(coefficient: Integer, constant: impl Into<String>) -> Atom {
        if coefficient == 0 {
            return Atom { coefficient, constant: String::new() };
        }
        Atom { coefficient, constant: constant.into() }
    }

    /// Adds two atoms. Same constant merges coefficients; different constants
    /// form a sum.
    pub fn add(&self, rhs: &Atom) -> Expr {
        if self.constant == rhs.constant {
            let coefficient = Integer::from(&self.coefficient + &rhs.coefficient);
            return Expr::Atom(Atom::new(coefficient, self.constant.clone()));
        }
        Sum::new(int(1), vec![Expr::Atom(self.clone()), Expr::Atom(rhs.clone())])
    }

    /// Multiplies two atoms. A pure integer scales the other side, the same
    /// constant squares into an exponential, and different constants form a
    /// product.
    pub fn mul(&self, rhs: &Atom) -> Expr {
        let coefficient = Integer::from(&self.coefficient * &rhs.coefficient);
        if self.constant.is_empty() {
            return Expr::Atom(Atom::new(coefficient, rhs.constant.clone()));
        }
        if rhs.constant.is_empty() {
            return Expr::Atom(Atom::new(coefficient, self.constant.clone()));
        }
        if self.constant == rhs.constant {
            return Exponential::new(
                coefficient,
                Expr::constant(self.constant.clone()),
                Expr::int(2),
            );
        }
        Product::new(
            coefficient,
            vec![
                Expr::constant(self.constant.clone()),
                Expr::constant(rhs.constant.clone()),
            ],
        )
    }

    /// Approximates the atom. Pure integers never consult the table; named
    /// constants fail with [`AlgebraError::UnknownConstant`] when missing.
    pub fn approximate_with(&self, table: &ConstantTable) -> Result<f64> {
        if self.constant.is_empty() {
            return Ok(self.coefficient.to_f64());
        }
        match table.get(&self.constant) {
            Some(value) => Ok(self.coefficient.to_f64() * value),
            None => Err(AlgebraError::UnknownConstant(self.constant.clone())),
        }
    }
}
