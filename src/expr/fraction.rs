//! Fractions: a coefficient times a numerator over a denominator.
//!
//! [`Fraction::reduce`] is the heart of cancellation. It tears both sides down
//! into a single signed-power ledger (numerator exponents positive,
//! denominator exponents negative), letting shared content cancel exactly,
//! then rebuilds the two sides and normalizes the integer part: the
//! coefficient ends up coprime with the denominator's, the denominator's
//! coefficient positive, and a denominator of `1` collapses the fraction
//! entirely. Sums are factored through [`Sum::factor`] before entering the
//! ledger so `(2x + 2)/(x + 1)` can cancel down to `2`.

use super::{Expr, Product, Sum};
use crate::consts::ConstantTable;
use crate::error::{AlgebraError, Result};
use crate::primitive::{gcd, int};
use rug::Integer;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Fraction {
    /// The integer multiplier, coprime with the denominator's coefficient.
    pub coefficient: Integer,

    /// The numerator, always with coefficient 1.
    pub numerator: Box<Expr>,

    /// The denominator, never `0` or `1`, with a positive coefficient.
    pub denominator: Box<Expr>,
}

impl Fraction {
    /// Views any expression as a fraction: a non-fraction becomes itself over
    /// 1, with its coefficient hoisted out front.
    pub fn promote(expr: &Expr) -> Fraction {
        match expr {
            Expr::Fraction(f) => f.clone(),
            other => Fraction {
                coefficient: other.coefficient().clone(),
                numerator: Box::new(other.with_coefficient(int(1))),
                denominator: Box::new(Expr::one()),
            },
        }
    }

    /// The multiplicative inverse. The caller must rule out a zero value
    /// first; division does so before ever building a reciprocal.
    pub fn reciprocal(&self) -> Fraction {
        Fraction {
            coefficient: self.denominator.coefficient().clone(),
            numerator: Box::new(self.denominator.with_coefficient(int(1))),
            denominator: Box::new(self.numerator.with_coefficient(self.coefficient.clone())),
        }
    }

    /// Adds an expression by bringing both operands over a common denominator
    /// and reducing.
    pub fn add(&self, rhs: &Expr) -> Expr {
        let rhs = Fraction::promote(rhs);
        if self.denominator == rhs.denominator {
            let numerator = self
                .numerator
                .scaled(&self.coefficient)
                .add(&rhs.numerator.scaled(&rhs.coefficient));
            return Fraction {
                coefficient: int(1),
                numerator: Box::new(numerator),
                denominator: self.denominator.clone(),
            }
            .reduce();
        }
        let numerator = self
            .numerator
            .scaled(&self.coefficient)
            .mul(&rhs.denominator)
            .add(&rhs.numerator.scaled(&rhs.coefficient).mul(&self.denominator));
        let denominator = self.denominator.mul(&rhs.denominator);
        Fraction {
            coefficient: int(1),
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }
        .reduce()
    }

    /// Multiplies componentwise and reduces.
    pub fn mul(&self, rhs: &Expr) -> Expr {
        self.mul_fraction(&Fraction::promote(rhs))
    }

    pub(crate) fn mul_fraction(&self, rhs: &Fraction) -> Expr {
        Fraction {
            coefficient: Integer::from(&self.coefficient * &rhs.coefficient),
            numerator: Box::new(self.numerator.mul(&rhs.numerator)),
            denominator: Box::new(self.denominator.mul(&rhs.denominator)),
        }
        .reduce()
    }

    /// Rebuilds this fraction in canonical form, cancelling everything the two
    /// sides share. The denominator must not be zero; every operator that can
    /// produce one checks before construction.
    pub fn reduce(self) -> Expr {
        let mut num_coeff = self.coefficient;
        let mut den_coeff = int(1);
        let mut powers: Vec<(Expr, Expr)> = Vec::new();
        Self::split(&mut powers, &mut num_coeff, &mut den_coeff, *self.numerator, false);
        Self::split(&mut powers, &mut num_coeff, &mut den_coeff, *self.denominator, true);

        if num_coeff == 0 {
            return Expr::zero();
        }

        let mut numerator_powers = Vec::new();
        let mut denominator_powers = Vec::new();
        for (base, exponent) in powers {
            match exponent.coefficient().cmp0() {
                Ordering::Less => denominator_powers.push((base, exponent.negated())),
                _ => numerator_powers.push((base, exponent)),
            }
        }
        let mut numerator = Self::assemble(numerator_powers);
        let mut denominator = Self::assemble(denominator_powers);

        // assembling powers can surface fresh integer content, e.g. 2^2 -> 4
        num_coeff *= numerator.coefficient();
        numerator = numerator.with_coefficient(int(1));
        den_coeff *= denominator.coefficient();
        denominator = denominator.with_coefficient(int(1));

        if den_coeff.cmp0() == Ordering::Less {
            den_coeff = -den_coeff;
            num_coeff = -num_coeff;
        }
        let g = gcd(&num_coeff, &den_coeff);
        num_coeff /= &g;
        den_coeff /= &g;

        let denominator = denominator.scaled(&den_coeff);
        if denominator.is_one() {
            return numerator.scaled(&num_coeff);
        }
        Expr::Fraction(Fraction {
            coefficient: num_coeff,
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        })
    }

    /// Tears `expr` into the shared power ledger. `invert` marks denominator
    /// content: its exponents enter negated and its integer part accumulates
    /// on the denominator side.
    fn split(
        powers: &mut Vec<(Expr, Expr)>,
        num_coeff: &mut Integer,
        den_coeff: &mut Integer,
        expr: Expr,
        invert: bool,
    ) {
        let exponent_of = |exponent: Expr| if invert { exponent.negated() } else { exponent };
        match expr {
            Expr::Atom(a) => {
                if invert {
                    *den_coeff *= &a.coefficient;
                } else {
                    *num_coeff *= &a.coefficient;
                }
                if !a.constant.is_empty() {
                    Product::bump(powers, Expr::constant(a.constant), exponent_of(Expr::one()));
                }
            }
            Expr::Product(p) => {
                if invert {
                    *den_coeff *= p.coefficient;
                } else {
                    *num_coeff *= p.coefficient;
                }
                for factor in p.factors {
                    Self::split(powers, num_coeff, den_coeff, factor, invert);
                }
            }
            Expr::Exponential(e) => {
                if invert {
                    *den_coeff *= e.coefficient;
                } else {
                    *num_coeff *= e.coefficient;
                }
                Product::bump(powers, *e.base, exponent_of(*e.exponent));
            }
            Expr::Sum(s) => {
                let (common, remaining) = s.factor();
                if !common.is_one() {
                    Self::split(powers, num_coeff, den_coeff, common, invert);
                }
                match remaining {
                    Expr::Sum(remaining) => {
                        if invert {
                            *den_coeff *= remaining.coefficient;
                        } else {
                            *num_coeff *= remaining.coefficient;
                        }
                        let base = Expr::Sum(Sum { coefficient: int(1), terms: remaining.terms });
                        Product::bump(powers, base, exponent_of(Expr::one()));
                    }
                    other => Self::split(powers, num_coeff, den_coeff, other, invert),
                }
            }
            Expr::Fraction(f) => {
                if invert {
                    *den_coeff *= f.coefficient;
                } else {
                    *num_coeff *= f.coefficient;
                }
                Self::split(powers, num_coeff, den_coeff, *f.numerator, invert);
                Self::split(powers, num_coeff, den_coeff, *f.denominator, !invert);
            }
        }
    }

    fn assemble(entries: Vec<(Expr, Expr)>) -> Expr {
        let mut factors = Vec::with_capacity(entries.len());
        for (base, exponent) in entries {
            factors.push(if exponent.is_one() {
                base
            } else {
                super::Exponential::new(int(1), base, exponent)
            });
        }
        match factors.len() {
            0 => Expr::one(),
            1 => factors.remove(0),
            _ => Product::new(int(1), factors),
        }
    }

    /// Approximates numerator over denominator, failing with
    /// [`AlgebraError::DivisionByZero`] when the denominator's numeric value
    /// is exactly zero.
    pub fn approximate_with(&self, table: &ConstantTable) -> Result<f64> {
        let denominator = self.denominator.approximate_with(table)?;
        if denominator == 0.0 {
            return Err(AlgebraError::DivisionByZero);
        }
        let numerator = self.numerator.approximate_with(table)?;
        Ok(self.coefficient.to_f64() * numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn x() -> Expr {
        Expr::constant("x")
    }

    fn y() -> Expr {
        Expr::constant("y")
    }

    #[test]
    fn integer_fractions_reduce() {
        assert_eq!(Expr::int(8).div(&Expr::int(4)).unwrap(), Expr::int(2));
        assert_eq!(
            Expr::int(4).div(&Expr::int(6)).unwrap().to_string(),
            "2/3"
        );
        assert_eq!(Expr::int(0).div(&Expr::int(5)).unwrap(), Expr::zero());
    }

    #[test]
    fn unit_denominators_collapse() {
        assert_eq!(x().div(&Expr::int(1)).unwrap(), x());
        assert_eq!(Expr::fraction(3, x(), Expr::one()).unwrap(), Expr::atom(3, "x"));
    }

    #[test]
    fn negative_denominators_normalize() {
        let f = Expr::int(1).div(&Expr::int(-2)).unwrap();
        assert_eq!(f.to_string(), "-1/2");
        assert_eq!(f, Expr::fraction(-1, Expr::one(), Expr::int(2)).unwrap());
    }

    #[test]
    fn rational_arithmetic() {
        let half = Expr::int(1).div(&Expr::int(2)).unwrap();
        let third = Expr::int(1).div(&Expr::int(3)).unwrap();
        assert_eq!(half.add(&third).to_string(), "5/6");
        assert_eq!(half.mul(&third).to_string(), "1/6");
        assert_eq!(half.add(&half), Expr::one());
        assert_eq!(half.sub(&half), Expr::zero());
    }

    #[test]
    fn symbolic_cancellation() {
        let ratio = x().div(&y()).unwrap();
        let inverse = y().div(&x()).unwrap();
        assert_eq!(ratio.mul(&inverse), Expr::one());

        let x_plus_1 = x().add(&Expr::int(1));
        assert_eq!(x_plus_1.div(&x_plus_1).unwrap(), Expr::one());
    }

    #[test]
    fn shared_sum_content_cancels() {
        // (2x + 2)/(x + 1) == 2
        let numerator = Expr::atom(2, "x").add(&Expr::int(2));
        let denominator = x().add(&Expr::int(1));
        assert_eq!(numerator.div(&denominator).unwrap(), Expr::int(2));

        // (x^2 + x)/x == x + 1
        let numerator = x().mul(&x()).add(&x());
        assert_eq!(numerator.div(&x()).unwrap(), x().add(&Expr::int(1)));
    }

    #[test]
    fn powers_cancel_across_the_bar() {
        let x2 = x().mul(&x());
        assert_eq!(x2.div(&x()).unwrap(), x());
        assert_eq!(x().div(&x2).unwrap().to_string(), "1/x");
    }

    #[test]
    fn like_fractions_merge_through_sums() {
        // 5x + 4x/7 == 39x/7
        let merged = Expr::atom(5, "x").add(&Expr::fraction(4, x(), Expr::int(7)).unwrap());
        assert_eq!(merged, Expr::fraction(39, x(), Expr::int(7)).unwrap());
        assert_eq!(merged.to_string(), "39x/7");
    }

    #[test]
    fn reciprocal_round_trip() {
        let f = Fraction::promote(&Expr::fraction(3, x(), y()).unwrap());
        let back = f.mul_fraction(&f.reciprocal());
        assert_eq!(back, Expr::one());
    }

    #[test]
    fn approximation_guards_zero_denominators() {
        let f = Fraction::promote(&Expr::fraction(1, Expr::one(), x()).unwrap());
        let mut table = ConstantTable::new();
        table.insert("x", 0.0);
        assert_eq!(f.approximate_with(&table), Err(AlgebraError::DivisionByZero));
        table.insert("x", 4.0);
        assert_eq!(f.approximate_with(&table), Ok(0.25));
    }
}
