//! The canonical total order over expressions, and the like-term relation.
//!
//! Both are defined through two string keys derived from the structure:
//!
//! - [`like_key`](Expr::like_key) captures the symbolic shape with the
//!   outermost coefficient erased. Two expressions are *like* exactly when
//!   their keys match, so `5x` and `-x` are like, and so are `5x` and `4x/7`
//!   (a fraction over a pure integer denominator keys by its numerator).
//! - [`signature`](Expr::signature) captures the full form, coefficients
//!   included, and serves as the final tiebreaker.
//!
//! The order compares `(like_key, coefficient, signature)` lexicographically.
//! Its one load-bearing property is that like terms always sort adjacent, so
//! [`Sum::new`](super::Sum::new) can merge them in a single pass; beyond that
//! it only needs to be total and deterministic, which string comparison gives
//! for free.

use super::Expr;
use std::cmp::Ordering;

impl Expr {
    /// Compares two expressions under the canonical total order.
    ///
    /// Like terms differing only in coefficient sort adjacent, smaller
    /// coefficient first. The order is consistent with [`PartialEq`]: equal
    /// expressions compare [`Ordering::Equal`].
    pub fn canonical_cmp(&self, other: &Expr) -> Ordering {
        self.like_key()
            .cmp(&other.like_key())
            .then_with(|| self.coefficient().cmp(other.coefficient()))
            .then_with(|| self.signature().cmp(&other.signature()))
    }

    /// Whether two expressions are like terms, meaning they differ at most in
    /// their outermost coefficient and can be merged by adding coefficients.
    ///
    /// All zero values are like each other, and a fraction over a pure integer
    /// denominator is like its numerator's shape (`5x ~ 4x/7`).
    pub fn like(&self, other: &Expr) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        self.like_key() == other.like_key()
    }

    /// The symbolic shape with the outer coefficient erased.
    pub(crate) fn like_key(&self) -> String {
        match self {
            Expr::Atom(a) => a.constant.clone(),
            Expr::Sum(s) => {
                let terms: Vec<String> = s.terms.iter().map(Expr::signature).collect();
                format!("({})", terms.join(" + "))
            }
            Expr::Product(p) => {
                let factors: Vec<String> = p.factors.iter().map(Expr::signature).collect();
                factors.join("*")
            }
            Expr::Exponential(e) => {
                format!("{}^{}", e.base.signature(), e.exponent.signature())
            }
            Expr::Fraction(f) => {
                // an integer denominator is like 1, so the whole fraction is
                // like its numerator's shape (5x ~ 4x/7)
                if f.denominator.as_integer().is_some() {
                    f.numerator.like_key()
                } else {
                    format!("{}/{}", f.numerator.like_key(), f.denominator.like_key())
                }
            }
        }
    }

    /// The full structural form, coefficients included.
    pub(crate) fn signature(&self) -> String {
        match self {
            Expr::Atom(a) => {
                if a.constant.is_empty() {
                    a.coefficient.to_string()
                } else {
                    format!("{}{}", a.coefficient, a.constant)
                }
            }
            Expr::Sum(s) => format!("{}{}", s.coefficient, self.like_key()),
            Expr::Product(p) => format!("{}({})", p.coefficient, self.like_key()),
            Expr::Exponential(e) => format!("{}({})", e.coefficient, self.like_key()),
            Expr::Fraction(f) => format!(
                "{}({}/{})",
                f.coefficient,
                f.numerator.signature(),
                f.denominator.signature()
            ),
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

    fn y() -> Expr {
        Expr::constant("y")
    }

    #[test]
    fn atoms_are_like_up_to_coefficient() {
        assert!(x().like(&Expr::atom(5, "x")));
        assert!(x().like(&Expr::atom(-1, "x")));
        assert!(!x().like(&y()));
        assert!(!x().like(&Expr::int(5)));
    }

    #[test]
    fn integer_fractions_are_like_their_numerator() {
        // 5x ~ 4x/7
        let frac = Expr::fraction(4, x(), Expr::int(7)).unwrap();
        assert!(Expr::atom(5, "x").like(&frac));
        // 5 ~ 4/7
        let pure = Expr::fraction(4, Expr::one(), Expr::int(7)).unwrap();
        assert!(Expr::int(5).like(&pure));
        // but x/y is only like other multiples of x/y
        let symbolic = Expr::fraction(1, x(), y()).unwrap();
        assert!(!Expr::atom(5, "x").like(&symbolic));
        assert!(symbolic.like(&Expr::fraction(3, x(), y()).unwrap()));
        // denominator coefficients are ignored too
        assert!(symbolic.like(&Expr::fraction(1, x(), Expr::atom(2, "y")).unwrap()));
        assert!(!symbolic.like(&Expr::fraction(1, x(), Expr::constant("z")).unwrap()));
    }

    #[test]
    fn exponents_distinguish_powers() {
        let x2 = x().mul(&x());
        let x3 = x2.mul(&x());
        assert!(!x2.like(&x3));
        assert!(x2.like(&x2.scaled(&crate::primitive::int(7))));
        assert!(!x2.like(&x()));
    }

    #[test]
    fn like_is_an_equivalence_relation() {
        let sample = [
            x(),
            Expr::atom(5, "x"),
            Expr::atom(-1, "x"),
            Expr::fraction(4, x(), Expr::int(7)).unwrap(),
            y(),
            Expr::int(3),
            Expr::fraction(4, Expr::one(), Expr::int(7)).unwrap(),
            x().mul(&y()),
            x().mul(&y()).scaled(&crate::primitive::int(2)),
            x().mul(&x()),
            x().mul(&x()).scaled(&crate::primitive::int(7)),
            Expr::fraction(1, x(), y()).unwrap(),
            Expr::fraction(3, x(), y()).unwrap(),
            x().add(&y()),
            x().add(&y()).scaled(&crate::primitive::int(2)),
        ];
        for a in &sample {
            assert!(a.like(a), "{a} must be like itself");
            for b in &sample {
                assert_eq!(a.like(b), b.like(a), "symmetry failed for {a} ~ {b}");
                for c in &sample {
                    if a.like(b) && b.like(c) {
                        assert!(a.like(c), "transitivity failed for {a} ~ {b} ~ {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn zero_is_like_zero() {
        assert!(Expr::zero().like(&Expr::atom(0, "x")));
    }

    #[test]
    fn order_is_total_and_consistent() {
        let exprs = [
            Expr::int(3),
            x(),
            y(),
            x().mul(&y()),
            x().mul(&x()),
            Expr::fraction(1, x(), y()).unwrap(),
        ];
        for a in &exprs {
            assert_eq!(a.canonical_cmp(a), Ordering::Equal);
            for b in &exprs {
                if a != b {
                    assert_ne!(a.canonical_cmp(b), Ordering::Equal);
                    assert_eq!(a.canonical_cmp(b), b.canonical_cmp(a).reverse());
                }
            }
        }
    }

    #[test]
    fn like_terms_sort_adjacent() {
        let mut terms = [x(), Expr::int(1), Expr::atom(-3, "x"), y(), Expr::atom(2, "x")];
        terms.sort_by(|a, b| a.canonical_cmp(b));
        let spans: Vec<String> = terms.iter().map(Expr::like_key).collect();
        let mut deduped = spans.clone();
        deduped.dedup();
        // every like group is contiguous after sorting
        let mut sorted_groups = deduped.clone();
        sorted_groups.sort();
        sorted_groups.dedup();
        assert_eq!(deduped.len(), sorted_groups.len());
    }
}
