//! Products: a coefficient times factors over pairwise-distinct bases.
//!
//! [`Product::new`] is the funnel every multiplication eventually reaches. It
//! flattens nested products, folds pure integers and stray factor coefficients
//! into the product coefficient, and merges factors over the same base by
//! adding exponents, so `2 * x * 3 * x^2 * y` always lands as `6x^3*y`. Factors
//! are sorted under the canonical order and each carries coefficient 1.

use super::{Atom, Exponential, Expr, Fraction, Sum};
use crate::primitive::int;
use rug::Integer;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Product {
    /// The integer multiplier.
    pub coefficient: Integer,

    /// At least two factors, sorted, pairwise unlike, each with coefficient 1
    /// and none a pure integer or a nested product.
    pub factors: Vec<Expr>,
}

impl Product {
    /// Creates `coefficient * factors[0] * factors[1] * ...` in canonical form.
    /// The result collapses to an atom, exponential, or single factor when the
    /// normalized factor list runs short, and to a fraction when division
    /// hides among the factors.
    pub fn new(coefficient: Integer, factors: Vec<Expr>) -> Expr {
        // Fractional factors need common-denominator treatment, which the
        // fraction reducer already owns.
        if factors.iter().any(|f| matches!(f, Expr::Fraction(_))) {
            return factors
                .iter()
                .fold(Expr::Atom(Atom::new(coefficient, "")), |acc, f| acc.mul(f));
        }

        let mut coeff = coefficient;
        let mut powers: Vec<(Expr, Expr)> = Vec::new();
        let mut stack = factors;
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Atom(a) if a.constant.is_empty() => coeff *= a.coefficient,
                Expr::Atom(a) => {
                    coeff *= &a.coefficient;
                    Self::bump(&mut powers, Expr::constant(a.constant), Expr::one());
                }
                Expr::Product(p) => {
                    coeff *= p.coefficient;
                    stack.extend(p.factors);
                }
                Expr::Exponential(e) => {
                    coeff *= e.coefficient;
                    Self::bump(&mut powers, *e.base, *e.exponent);
                }
                // sums (and anything else) participate as opaque bases
                other => {
                    coeff *= other.coefficient();
                    Self::bump(&mut powers, other.with_coefficient(int(1)), Expr::one());
                }
            }
            if coeff == 0 {
                return Expr::zero();
            }
        }

        // exponents that went negative while merging belong in a denominator
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for (base, exponent) in powers {
            match exponent.coefficient().cmp0() {
                Ordering::Less => denominator.push((base, exponent.negated())),
                _ => numerator.push((base, exponent)),
            }
        }
        if !denominator.is_empty() {
            return Fraction {
                coefficient: coeff,
                numerator: Box::new(Self::assemble(numerator)),
                denominator: Box::new(Self::assemble(denominator)),
            }
            .reduce();
        }

        let mut factors = Vec::with_capacity(numerator.len());
        for (base, exponent) in numerator {
            let mut factor = if exponent.is_one() {
                base
            } else {
                Exponential::new(int(1), base, exponent)
            };
            // merged powers can collapse back to integers, e.g. 2 * 2 -> 4
            if let Some(n) = factor.as_integer() {
                coeff *= n;
                continue;
            }
            if *factor.coefficient() != 1 {
                coeff *= factor.coefficient();
                factor = factor.with_coefficient(int(1));
            }
            factors.push(factor);
        }
        if coeff == 0 {
            return Expr::zero();
        }

        factors.sort_by(|a, b| a.canonical_cmp(b));
        match factors.len() {
            0 => Expr::Atom(Atom::new(coeff, "")),
            1 => factors.remove(0).scaled(&coeff),
            _ => Expr::Product(Product { coefficient: coeff, factors }),
        }
    }

    /// Records `base ^ exponent`, merging with an existing entry over an equal
    /// base by adding exponents. Entries whose exponent cancels to zero drop
    /// out entirely.
    pub(crate) fn bump(powers: &mut Vec<(Expr, Expr)>, base: Expr, exponent: Expr) {
        if exponent.is_zero() {
            return;
        }
        if let Some(position) = powers.iter().position(|(b, _)| *b == base) {
            let merged = powers[position].1.add(&exponent);
            if merged.is_zero() {
                powers.remove(position);
            } else {
                powers[position].1 = merged;
            }
            return;
        }
        powers.push((base, exponent));
    }

    fn assemble(entries: Vec<(Expr, Expr)>) -> Expr {
        let mut factors = Vec::with_capacity(entries.len());
        for (base, exponent) in entries {
            factors.push(if exponent.is_one() {
                base
            } else {
                Exponential::new(int(1), base, exponent)
            });
        }
        match factors.len() {
            0 => Expr::one(),
            1 => factors.remove(0),
            _ => Product::new(int(1), factors),
        }
    }

    /// Adds an expression to this product, merging when the two are like.
    pub fn add(&self, rhs: &Expr) -> Expr {
        let lhs = Expr::Product(self.clone());
        if lhs.like(rhs) {
            let coefficient = Integer::from(&self.coefficient + rhs.coefficient());
            return lhs.with_coefficient(coefficient);
        }
        Sum::new(int(1), vec![lhs, rhs.clone()])
    }

    /// Multiplies by pushing `rhs` through the normalizing constructor.
    pub fn mul(&self, rhs: &Expr) -> Expr {
        let mut factors = self.factors.clone();
        factors.push(rhs.clone());
        Product::new(self.coefficient.clone(), factors)
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
    fn integers_fold_into_the_coefficient() {
        let p = Product::new(int(2), vec![Expr::int(3), x(), Expr::int(-1)]);
        assert_eq!(p, Expr::atom(-6, "x"));
    }

    #[test]
    fn repeated_bases_merge_into_powers() {
        let p = Product::new(int(1), vec![x(), y(), x()]);
        let expected = Product::new(
            int(1),
            vec![Exponential::new(int(1), x(), Expr::int(2)), y()],
        );
        assert_eq!(p, expected);
        assert_eq!(p.to_string(), "x^2*y");
    }

    #[test]
    fn nested_products_flatten() {
        let inner = x().mul(&y()).scaled(&int(3));
        let p = Product::new(int(2), vec![inner, x()]);
        assert_eq!(p.to_string(), "6x^2*y");
        p.check_canonical().unwrap();
    }

    #[test]
    fn zero_annihilates() {
        assert_eq!(Product::new(int(1), vec![x(), Expr::zero(), y()]), Expr::zero());
        assert_eq!(Product::new(int(0), vec![x(), y()]), Expr::zero());
    }

    #[test]
    fn single_survivor_collapses() {
        assert_eq!(Product::new(int(4), vec![x()]), Expr::atom(4, "x"));
        assert_eq!(Product::new(int(4), vec![]), Expr::int(4));
    }

    #[test]
    fn cancelling_exponents_leave_a_fraction_free_result() {
        // x * (x^y with exponent -y folded in through a fraction)
        let x_over_y = x().div(&y()).unwrap();
        let p = Product::new(int(3), vec![x_over_y, y()]);
        assert_eq!(p, Expr::atom(3, "x"));
    }

    #[test]
    fn like_products_merge_on_addition() {
        let xy = x().mul(&y());
        assert_eq!(xy.add(&xy.scaled(&int(4))), xy.scaled(&int(5)));
        assert_eq!(xy.add(&xy.negated()), Expr::zero());
    }

    #[test]
    fn factor_order_is_insensitive_to_construction_order() {
        let a = Product::new(int(1), vec![y(), x()]);
        let b = Product::new(int(1), vec![x(), y()]);
        assert_eq!(a, b);
    }
}
