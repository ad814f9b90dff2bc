//! Exponentials: a coefficient times a base raised to an exponent.
//!
//! [`Exponential::new`] is where power normalization happens: trivial exponents
//! collapse (`b^0 == 1`, `b^1 == b`), pure integer powers of integers are
//! evaluated outright (`2^3 == 8`), a base coefficient distributes through a
//! pure integer exponent (`(2x)^3 == 8x^3`), and a negative exponent moves the
//! whole power into a fraction's denominator (`x^-2 == 1/x^2`), so no reachable
//! exponential carries a negative exponent.

use super::{Atom, Expr, Fraction, Product, Sum};
use crate::primitive::int;
use rug::ops::Pow;
use rug::Integer;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Exponential {
    /// The integer multiplier.
    pub coefficient: Integer,

    /// The base. Never `0` or `1` in a reachable value.
    pub base: Box<Expr>,

    /// The exponent. Never `0` or `1`, and its coefficient is never negative.
    pub exponent: Box<Expr>,
}

impl Exponential {
    /// Creates `coefficient * base ^ exponent` in canonical form. The result is
    /// not necessarily an [`Expr::Exponential`]; see the module docs for the
    /// collapses applied.
    pub fn new(coefficient: Integer, base: Expr, exponent: Expr) -> Expr {
        if coefficient == 0 || base.is_zero() {
            return Expr::zero();
        }
        if exponent.is_zero() {
            return Expr::Atom(Atom::new(coefficient, ""));
        }
        if exponent.is_one() {
            return base.scaled(&coefficient);
        }
        if exponent.coefficient().cmp0() == Ordering::Less {
            let flipped = Exponential::new(int(1), base, exponent.negated());
            return Fraction {
                coefficient,
                numerator: Box::new(Expr::one()),
                denominator: Box::new(flipped),
            }
            .reduce();
        }

        let mut coefficient = coefficient;
        let mut base = base;
        if let Some(power) = exponent.as_integer().and_then(Integer::to_u32) {
            if *base.coefficient() != 1 {
                coefficient *= Integer::from(base.coefficient().pow(power));
                base = base.with_coefficient(int(1));
            }
        }
        if base.is_one() {
            return Expr::Atom(Atom::new(coefficient, ""));
        }

        Expr::Exponential(Exponential {
            coefficient,
            base: Box::new(base),
            exponent: Box::new(exponent),
        })
    }

    /// Adds an expression to this exponential, merging when the two are like.
    pub fn add(&self, rhs: &Expr) -> Expr {
        let lhs = Expr::Exponential(self.clone());
        if lhs.like(rhs) {
            let coefficient = Integer::from(&self.coefficient + rhs.coefficient());
            return lhs.with_coefficient(coefficient);
        }
        Sum::new(int(1), vec![lhs, rhs.clone()])
    }

    /// Multiplies this exponential by an atom or another exponential. Equal
    /// bases add their exponents, a matching constant bumps the exponent by
    /// one, and a pure integer just scales the coefficient.
    pub fn mul(&self, rhs: &Expr) -> Expr {
        match rhs {
            Expr::Exponential(r) if self.base == r.base => Exponential::new(
                Integer::from(&self.coefficient * &r.coefficient),
                (*self.base).clone(),
                self.exponent.add(&r.exponent),
            ),
            Expr::Atom(a) if a.constant.is_empty() => {
                Expr::Exponential(self.clone()).scaled(&a.coefficient)
            }
            Expr::Atom(a)
                if matches!(
                    &*self.base,
                    Expr::Atom(b) if b.coefficient == 1 && b.constant == a.constant
                ) =>
            {
                Exponential::new(
                    Integer::from(&self.coefficient * &a.coefficient),
                    (*self.base).clone(),
                    self.exponent.add(&Expr::one()),
                )
            }
            _ => Product::new(int(1), vec![Expr::Exponential(self.clone()), rhs.clone()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn x() -> Expr {
        Expr::constant("x")
    }

    #[test]
    fn trivial_exponents_collapse() {
        assert_eq!(Exponential::new(int(3), x(), Expr::int(0)), Expr::int(3));
        assert_eq!(Exponential::new(int(3), x(), Expr::int(1)), Expr::atom(3, "x"));
        assert_eq!(Exponential::new(int(3), Expr::one(), x()), Expr::int(3));
        assert_eq!(Exponential::new(int(3), Expr::zero(), x()), Expr::zero());
    }

    #[test]
    fn integer_powers_evaluate() {
        assert_eq!(Exponential::new(int(1), Expr::int(2), Expr::int(3)), Expr::int(8));
        assert_eq!(Exponential::new(int(5), Expr::int(-2), Expr::int(3)), Expr::int(-40));
    }

    #[test]
    fn base_coefficients_distribute_through_integer_exponents() {
        // (2x)^3 == 8x^3
        let cube = Exponential::new(int(1), Expr::atom(2, "x"), Expr::int(3));
        assert_eq!(cube, Exponential::new(int(8), x(), Expr::int(3)));
        assert_eq!(cube.to_string(), "8x^3");
    }

    #[test]
    fn negative_exponents_become_fractions() {
        // x^-2 == 1/x^2
        let inverse = Exponential::new(int(1), x(), Expr::int(-2));
        let expected = Expr::one()
            .div(&Exponential::new(int(1), x(), Expr::int(2)))
            .unwrap();
        assert_eq!(inverse, expected);
        assert_eq!(inverse.to_string(), "1/x^2");
    }

    #[test]
    fn equal_bases_add_exponents() {
        let x2 = Exponential::new(int(2), x(), Expr::int(2));
        let x3 = Exponential::new(int(3), x(), Expr::int(3));
        assert_eq!(x2.mul(&x3), Exponential::new(int(6), x(), Expr::int(5)));
    }

    #[test]
    fn matching_constant_bumps_the_exponent() {
        let x2 = x().mul(&x());
        assert_eq!(x2.mul(&x()), Exponential::new(int(1), x(), Expr::int(3)));
    }

    #[test]
    fn like_powers_merge_on_addition() {
        let x2 = Exponential::new(int(2), x(), Expr::int(2));
        let x2_more = Exponential::new(int(5), x(), Expr::int(2));
        assert_eq!(x2.add(&x2_more), Exponential::new(int(7), x(), Expr::int(2)));
        assert_eq!(x2.add(&x2.negated()), Expr::zero());
    }

    #[test]
    fn symbolic_exponents_stay_symbolic() {
        let xy = Exponential::new(int(1), x(), Expr::constant("y"));
        assert_eq!(xy.to_string(), "x^y");
        assert_eq!(
            xy.mul(&xy),
            Exponential::new(int(1), x(), Expr::atom(2, "y"))
        );
    }
}
