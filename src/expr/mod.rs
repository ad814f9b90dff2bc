//! The canonical expression representation and its operators.
//!
//! [`Expr`] is a closed union of exactly five shapes: [`Atom`], [`Sum`],
//! [`Product`], [`Exponential`], and [`Fraction`], every one of them carrying an
//! integer coefficient. The representation is **canonical**: no mathematical
//! value reachable through the operators has more than one structural shape.
//! There is no separate simplification pass; the reduction rules live inside the
//! constructors ([`Sum::new`], [`Product::new`], [`Exponential::new`],
//! [`Fraction::reduce`]) and every operator returns an already-reduced value.
//!
//! # Canonical form
//!
//! The invariants below hold for every reachable value:
//!
//! - No [`Sum`] has fewer than two terms and no [`Product`] has fewer than two
//!   factors; the degenerate cases collapse to the single child (or to the atoms
//!   `0` / `1` when the container empties out).
//! - No [`Fraction`] has the denominator `1`; it collapses to its numerator.
//! - A [`Product`] never holds two factors over the same base; they merge into
//!   one [`Exponential`] with summed exponents.
//! - Coefficients are fully normalized: a [`Fraction`]'s coefficient is coprime
//!   with its denominator's, the gcd of a [`Sum`]'s term coefficients is 1, and
//!   an atom whose coefficient reaches 0 is always the bare integer `0`.
//! - [`Sum`] terms and [`Product`] factors are sorted by the canonical order, so
//!   structural equality is elementwise and like-term merging only ever needs to
//!   look at neighbors.
//!
//! Because construction enforces all of this, the [`PartialEq`] implementation
//! is plain structural comparison, and two expressions built through any
//! sequence of operators compare equal exactly when they denote the same value.
//!
//! # Operator dispatch
//!
//! Binary operators dispatch on the variant pair, richer variant first
//! (Fraction, then Sum, Product, Exponential, Atom), so `atom + fraction` and
//! `fraction + atom` take the same code path. Addition, subtraction, and
//! multiplication are total; division fails with
//! [`DivisionByZero`](AlgebraError::DivisionByZero) when the divisor is the zero
//! atom.

mod atom;
mod exponential;
mod fraction;
mod ord;
mod product;
mod sum;

pub use atom::Atom;
pub use exponential::Exponential;
pub use fraction::Fraction;
pub use product::Product;
pub use sum::Sum;

use crate::consts::{ConstantTable, DEFAULT_CONSTANTS};
use crate::error::{AlgebraError, Result};
use crate::primitive::{gcd, int};
use rug::Integer;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// A symbolic expression in canonical form.
///
/// See the [module-level documentation](self) for the invariants every value of
/// this type upholds. Build values with the constructor helpers ([`Expr::int`],
/// [`Expr::constant`], [`Expr::atom`], [`Expr::fraction`]) and combine them with
/// the operators; the variant constructors ([`Sum::new`], [`Product::new`],
/// [`Exponential::new`]) are also public and always return a reduced value.
#[derive(Debug, Clone)]
pub enum Expr {
    /// An integer coefficient times an optional named constant, such as `5` or
    /// `3x`. The base case of the recursion.
    Atom(Atom),

    /// A coefficient times a sorted list of unlike terms, such as `2(x + 3y)`.
    Sum(Sum),

    /// A coefficient times a sorted list of factors over pairwise-distinct
    /// bases, such as `6x*y^2`.
    Product(Product),

    /// A coefficient times a base raised to an exponent, such as `2x^3`.
    Exponential(Exponential),

    /// A coefficient times a numerator over a denominator, fully reduced, such
    /// as `5/6` or `2x/y`.
    Fraction(Fraction),
}

impl Expr {
    /// The atom `0`.
    pub fn zero() -> Expr {
        Expr::Atom(Atom::new(int(0), ""))
    }

    /// The atom `1`.
    pub fn one() -> Expr {
        Expr::Atom(Atom::new(int(1), ""))
    }

    /// Creates a pure integer atom.
    pub fn int<T>(n: T) -> Expr
    where
        Integer: From<T>,
    {
        Expr::Atom(Atom::new(int(n), ""))
    }

    /// Creates an atom for a named constant with coefficient 1.
    pub fn constant(name: impl Into<String>) -> Expr {
        Expr::Atom(Atom::new(int(1), name))
    }

    /// Creates an atom with the given coefficient and constant name.
    pub fn atom<T>(coefficient: T, constant: impl Into<String>) -> Expr
    where
        Integer: From<T>,
    {
        Expr::Atom(Atom::new(int(coefficient), constant))
    }

    /// Creates a reduced fraction `coefficient * numerator / denominator`.
    ///
    /// Fails with [`AlgebraError::DivisionByZero`] if the denominator is the
    /// zero atom. The result is not necessarily a [`Expr::Fraction`]: `1/1`
    /// collapses to `1`, `(2x + 2)/(x + 1)` to `2`, and so on.
    pub fn fraction<T>(coefficient: T, numerator: Expr, denominator: Expr) -> Result<Expr>
    where
        Integer: From<T>,
    {
        if denominator.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(Fraction {
            coefficient: int(coefficient),
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }
        .reduce())
    }

    /// The integer coefficient carried by the outermost node.
    pub fn coefficient(&self) -> &Integer {
        match self {
            Expr::Atom(a) => &a.coefficient,
            Expr::Sum(s) => &s.coefficient,
            Expr::Product(p) => &p.coefficient,
            Expr::Exponential(e) => &e.coefficient,
            Expr::Fraction(f) => &f.coefficient,
        }
    }

    /// Returns the same symbolic shape with the outer coefficient replaced.
    ///
    /// A zero coefficient collapses to the zero atom, and a [`Fraction`] stays
    /// reduced (the new coefficient is gcd-cancelled against the denominator's).
    pub fn with_coefficient(&self, coefficient: Integer) -> Expr {
        if coefficient == 0 {
            return Expr::zero();
        }
        match self {
            Expr::Atom(a) => Expr::Atom(Atom::new(coefficient, a.constant.clone())),
            Expr::Sum(s) => Expr::Sum(Sum { coefficient, terms: s.terms.clone() }),
            Expr::Product(p) => Expr::Product(Product { coefficient, factors: p.factors.clone() }),
            Expr::Exponential(e) => Expr::Exponential(Exponential {
                coefficient,
                base: e.base.clone(),
                exponent: e.exponent.clone(),
            }),
            Expr::Fraction(f) => {
                let g = gcd(&coefficient, f.denominator.coefficient());
                let coefficient = Integer::from(&coefficient / &g);
                let den_coeff = Integer::from(f.denominator.coefficient() / &g);
                let denominator = f.denominator.with_coefficient(den_coeff);
                if denominator.is_one() {
                    return f.numerator.scaled(&coefficient);
                }
                Expr::Fraction(Fraction {
                    coefficient,
                    numerator: f.numerator.clone(),
                    denominator: Box::new(denominator),
                })
            }
        }
    }

    /// Multiplies the outer coefficient by `k`.
    pub fn scaled(&self, k: &Integer) -> Expr {
        self.with_coefficient(Integer::from(k * self.coefficient()))
    }

    /// Returns this expression with the coefficient negated.
    pub fn negated(&self) -> Expr {
        self.with_coefficient(Integer::from(-self.coefficient()))
    }

    /// Whether this is the zero atom (every variant with coefficient 0 reduces
    /// to it).
    pub fn is_zero(&self) -> bool {
        self.coefficient().cmp0() == Ordering::Equal
    }

    /// Whether this is the atom `1`.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Atom(a) if a.constant.is_empty() && a.coefficient == 1)
    }

    /// If this is a pure integer atom, returns the integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Expr::Atom(a) if a.constant.is_empty() => Some(&a.coefficient),
            _ => None,
        }
    }

    /// Adds two expressions, returning the reduced canonical result.
    pub fn add(&self, rhs: &Expr) -> Expr {
        match (self, rhs) {
            (Expr::Fraction(lhs), _) => lhs.add(rhs),
            (_, Expr::Fraction(rhs)) => rhs.add(self),
            (Expr::Sum(lhs), _) => lhs.add(rhs),
            (_, Expr::Sum(rhs)) => rhs.add(self),
            (Expr::Product(lhs), _) => lhs.add(rhs),
            (_, Expr::Product(rhs)) => rhs.add(self),
            (Expr::Exponential(lhs), _) => lhs.add(rhs),
            (_, Expr::Exponential(rhs)) => rhs.add(self),
            (Expr::Atom(lhs), Expr::Atom(rhs)) => lhs.add(rhs),
        }
    }

    /// Subtracts `rhs`, defined as addition of the negated right operand.
    pub fn sub(&self, rhs: &Expr) -> Expr {
        self.add(&rhs.negated())
    }

    /// Multiplies two expressions, returning the reduced canonical result.
    pub fn mul(&self, rhs: &Expr) -> Expr {
        match (self, rhs) {
            (Expr::Fraction(lhs), _) => lhs.mul(rhs),
            (_, Expr::Fraction(rhs)) => rhs.mul(self),
            (Expr::Sum(lhs), _) => lhs.mul(rhs),
            (_, Expr::Sum(rhs)) => rhs.mul(self),
            (Expr::Product(lhs), _) => lhs.mul(rhs),
            (_, Expr::Product(rhs)) => rhs.mul(self),
            (Expr::Exponential(lhs), _) => lhs.mul(rhs),
            (_, Expr::Exponential(rhs)) => rhs.mul(self),
            (Expr::Atom(lhs), Expr::Atom(rhs)) => lhs.mul(rhs),
        }
    }

    /// Divides by `rhs`, defined as multiplication by the reciprocal.
    ///
    /// Fails with [`AlgebraError::DivisionByZero`] when `rhs` is the zero atom;
    /// the gcd taken during reduction is undefined there, so the guard comes
    /// first.
    pub fn div(&self, rhs: &Expr) -> Result<Expr> {
        if rhs.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        let reciprocal = Fraction::promote(rhs).reciprocal();
        Ok(Fraction::promote(self).mul_fraction(&reciprocal))
    }

    /// Approximates the expression against the default constant table.
    pub fn approximate(&self) -> Result<f64> {
        self.approximate_with(&DEFAULT_CONSTANTS)
    }

    /// Approximates the expression as a floating-point value, looking up named
    /// constants in `table`.
    ///
    /// Fails with [`AlgebraError::UnknownConstant`] for any constant missing
    /// from the table, and with [`AlgebraError::DivisionByZero`] if a fraction's
    /// denominator approximates to exactly 0.
    pub fn approximate_with(&self, table: &ConstantTable) -> Result<f64> {
        match self {
            Expr::Atom(a) => a.approximate_with(table),
            Expr::Sum(s) => {
                let mut total = 0.0;
                for term in &s.terms {
                    total += term.approximate_with(table)?;
                }
                Ok(s.coefficient.to_f64() * total)
            }
            Expr::Product(p) => {
                let mut total = 1.0;
                for factor in &p.factors {
                    total *= factor.approximate_with(table)?;
                }
                Ok(p.coefficient.to_f64() * total)
            }
            Expr::Exponential(e) => {
                let base = e.base.approximate_with(table)?;
                let exponent = e.exponent.approximate_with(table)?;
                Ok(e.coefficient.to_f64() * base.powf(exponent))
            }
            Expr::Fraction(f) => f.approximate_with(table),
        }
    }

    /// Verifies that this value satisfies every canonical-form invariant,
    /// recursively. The operators uphold these by construction; this check
    /// exists for tests and for validating externally-built trees.
    pub fn check_canonical(&self) -> Result<()> {
        match self {
            Expr::Atom(a) => {
                if a.coefficient == 0 && !a.constant.is_empty() {
                    return Err(AlgebraError::InvariantViolation(format!(
                        "zero atom carries the constant '{}'",
                        a.constant
                    )));
                }
            }
            Expr::Sum(s) => {
                if s.terms.len() < 2 {
                    return Err(AlgebraError::InvariantViolation(
                        "sum with fewer than 2 terms".into(),
                    ));
                }
                let mut g = int(0);
                for pair in s.terms.windows(2) {
                    if pair[0].canonical_cmp(&pair[1]) == Ordering::Greater {
                        return Err(AlgebraError::InvariantViolation(
                            "sum terms out of canonical order".into(),
                        ));
                    }
                    if pair[0].like(&pair[1]) {
                        return Err(AlgebraError::InvariantViolation(
                            "sum holds unmerged like terms".into(),
                        ));
                    }
                }
                for term in &s.terms {
                    if term.is_zero() {
                        return Err(AlgebraError::InvariantViolation(
                            "sum holds a zero term".into(),
                        ));
                    }
                    if matches!(term, Expr::Sum(_)) {
                        return Err(AlgebraError::InvariantViolation(
                            "sum nested inside a sum".into(),
                        ));
                    }
                    g = gcd(&g, term.coefficient());
                    term.check_canonical()?;
                }
                if g != 1 {
                    return Err(AlgebraError::InvariantViolation(format!(
                        "sum term coefficients share the factor {g}"
                    )));
                }
            }
            Expr::Product(p) => {
                if p.factors.len() < 2 {
                    return Err(AlgebraError::InvariantViolation(
                        "product with fewer than 2 factors".into(),
                    ));
                }
                for pair in p.factors.windows(2) {
                    if pair[0].canonical_cmp(&pair[1]) == Ordering::Greater {
                        return Err(AlgebraError::InvariantViolation(
                            "product factors out of canonical order".into(),
                        ));
                    }
                    if pair[0].like(&pair[1]) {
                        return Err(AlgebraError::InvariantViolation(
                            "product holds two factors over one base".into(),
                        ));
                    }
                }
                for factor in &p.factors {
                    if *factor.coefficient() != 1 {
                        return Err(AlgebraError::InvariantViolation(
                            "product factor carries a coefficient".into(),
                        ));
                    }
                    if factor.as_integer().is_some() || matches!(factor, Expr::Product(_)) {
                        return Err(AlgebraError::InvariantViolation(
                            "product holds an unflattened factor".into(),
                        ));
                    }
                    factor.check_canonical()?;
                }
            }
            Expr::Exponential(e) => {
                if e.exponent.is_zero() || e.exponent.is_one() {
                    return Err(AlgebraError::InvariantViolation(
                        "exponential with trivial exponent".into(),
                    ));
                }
                if e.base.is_zero() || e.base.is_one() {
                    return Err(AlgebraError::InvariantViolation(
                        "exponential over a trivial base".into(),
                    ));
                }
                if e.exponent.coefficient().cmp0() == Ordering::Less {
                    return Err(AlgebraError::InvariantViolation(
                        "exponential with a negative exponent".into(),
                    ));
                }
                if e.exponent.as_integer().and_then(Integer::to_u32).is_some()
                    && *e.base.coefficient() != 1
                {
                    return Err(AlgebraError::InvariantViolation(
                        "exponential base carries an unfolded coefficient".into(),
                    ));
                }
                e.base.check_canonical()?;
                e.exponent.check_canonical()?;
            }
            Expr::Fraction(f) => {
                if f.denominator.is_one() {
                    return Err(AlgebraError::InvariantViolation(
                        "fraction over the denominator 1".into(),
                    ));
                }
                if f.denominator.is_zero() {
                    return Err(AlgebraError::InvariantViolation(
                        "fraction over the denominator 0".into(),
                    ));
                }
                if *f.numerator.coefficient() != 1 {
                    return Err(AlgebraError::InvariantViolation(
                        "fraction numerator carries a coefficient".into(),
                    ));
                }
                if gcd(&f.coefficient, f.denominator.coefficient()) != 1 {
                    return Err(AlgebraError::InvariantViolation(
                        "fraction coefficient shares a factor with the denominator".into(),
                    ));
                }
                f.numerator.check_canonical()?;
                f.denominator.check_canonical()?;
            }
        }
        Ok(())
    }
}

/// Structural equality. Because every reachable value is canonical, this agrees
/// with mathematical equality for operator-built expressions. The only
/// non-syntactic rule is that any two zero-coefficient values are equal.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        match (self, other) {
            (Expr::Atom(l), Expr::Atom(r)) => {
                l.coefficient == r.coefficient && l.constant == r.constant
            }
            (Expr::Sum(l), Expr::Sum(r)) => l.coefficient == r.coefficient && l.terms == r.terms,
            (Expr::Product(l), Expr::Product(r)) => {
                l.coefficient == r.coefficient && l.factors == r.factors
            }
            (Expr::Exponential(l), Expr::Exponential(r)) => {
                l.coefficient == r.coefficient && l.base == r.base && l.exponent == r.exponent
            }
            (Expr::Fraction(l), Expr::Fraction(r)) => {
                l.coefficient == r.coefficient
                    && l.numerator == r.numerator
                    && l.denominator == r.denominator
            }
            _ => false,
        }
    }
}

impl Eq for Expr {}

/// Matches the [`PartialEq`] implementation: all zero-coefficient values hash
/// alike.
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_zero() {
            return 0u8.hash(state);
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Expr::Atom(a) => {
                a.coefficient.hash(state);
                a.constant.hash(state);
            }
            Expr::Sum(s) => {
                s.coefficient.hash(state);
                s.terms.hash(state);
            }
            Expr::Product(p) => {
                p.coefficient.hash(state);
                p.factors.hash(state);
            }
            Expr::Exponential(e) => {
                e.coefficient.hash(state);
                e.base.hash(state);
                e.exponent.hash(state);
            }
            Expr::Fraction(f) => {
                f.coefficient.hash(state);
                f.numerator.hash(state);
                f.denominator.hash(state);
            }
        }
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::add(&self, &rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sub(&self, &rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul(&self, &rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.negated()
    }
}

/// Wraps `child` in parentheses when its shape would be ambiguous inside the
/// parent form.
fn fmt_child(f: &mut fmt::Formatter<'_>, child: &Expr) -> fmt::Result {
    match child {
        Expr::Atom(a) if a.constant.is_empty() || a.coefficient == 1 => write!(f, "{child}"),
        Expr::Exponential(e) if e.coefficient == 1 => write!(f, "{child}"),
        _ => write!(f, "({child})"),
    }
}

/// The minimal text form: enough to tell canonical shapes apart. Sign placement
/// and typeset output are a renderer's concern, not this crate's.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(a) => {
                if a.constant.is_empty() {
                    write!(f, "{}", a.coefficient)
                } else if a.coefficient == 1 {
                    write!(f, "{}", a.constant)
                } else {
                    write!(f, "{}{}", a.coefficient, a.constant)
                }
            }
            Expr::Sum(s) => {
                if s.coefficient != 1 {
                    write!(f, "{}(", s.coefficient)?;
                }
                let mut terms = s.terms.iter();
                if let Some(term) = terms.next() {
                    write!(f, "{term}")?;
                    for term in terms {
                        write!(f, " + {term}")?;
                    }
                }
                if s.coefficient != 1 {
                    write!(f, ")")?;
                }
                Ok(())
            }
            Expr::Product(p) => {
                if p.coefficient != 1 {
                    write!(f, "{}", p.coefficient)?;
                }
                let mut factors = p.factors.iter();
                if let Some(factor) = factors.next() {
                    fmt_child(f, factor)?;
                    for factor in factors {
                        write!(f, "*")?;
                        fmt_child(f, factor)?;
                    }
                }
                Ok(())
            }
            Expr::Exponential(e) => {
                if e.coefficient != 1 {
                    write!(f, "{}", e.coefficient)?;
                }
                match &*e.base {
                    Expr::Atom(a) if a.constant.is_empty() || a.coefficient == 1 => {
                        write!(f, "{}", e.base)?;
                    }
                    base => write!(f, "({base})")?,
                }
                write!(f, "^")?;
                fmt_child(f, &e.exponent)
            }
            Expr::Fraction(fr) => {
                if fr.numerator.is_one() {
                    write!(f, "{}/", fr.coefficient)?;
                } else {
                    let numerator = fr.numerator.scaled(&fr.coefficient);
                    match numerator {
                        Expr::Atom(_) | Expr::Exponential(_) => write!(f, "{numerator}/")?,
                        _ => write!(f, "({numerator})/")?,
                    }
                }
                fmt_child(f, &fr.denominator)
            }
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
    fn zero_values_compare_equal() {
        let a = Expr::zero();
        let b = Expr::atom(0, "x");
        assert_eq!(a, b);
    }

    #[test]
    fn dispatch_is_symmetric() {
        let third = Expr::fraction(1, Expr::one(), Expr::int(3)).unwrap();
        assert_eq!(Expr::add(&x(), &third), Expr::add(&third, &x()));
        assert_eq!(Expr::mul(&x(), &third), Expr::mul(&third, &x()));
    }

    #[test]
    fn operator_traits_delegate() {
        assert_eq!(x() + x(), Expr::atom(2, "x"));
        assert_eq!(x() - x(), Expr::zero());
        assert_eq!(-x(), Expr::atom(-1, "x"));
        assert_eq!(Expr::int(3) * x(), Expr::atom(3, "x"));
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(x().div(&Expr::int(0)), Err(AlgebraError::DivisionByZero));
        assert_eq!(Expr::int(1).div(&Expr::zero()), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn with_coefficient_keeps_fractions_reduced() {
        // 6 * (1/6) collapses all the way back to 1
        let sixth = Expr::fraction(1, Expr::one(), Expr::int(6)).unwrap();
        assert_eq!(sixth.with_coefficient(int(6)), Expr::one());
        // 3 * (x/6) = x/2
        let x_sixth = Expr::fraction(1, x(), Expr::int(6)).unwrap();
        let expected = Expr::fraction(1, x(), Expr::int(2)).unwrap();
        assert_eq!(x_sixth.scaled(&int(3)), expected);
    }

    #[test]
    fn display_distinguishes_shapes() {
        assert_eq!(Expr::atom(8, "x").to_string(), "8x");
        assert_eq!(Expr::int(-4).to_string(), "-4");
        assert_eq!(x().add(y()).to_string(), "x + y");
        assert_eq!(x().mul(y()).scaled(&int(6)).to_string(), "6x*y");
        assert_eq!(x().mul(x()).to_string(), "x^2");
        assert_eq!(
            Expr::fraction(5, Expr::one(), Expr::int(6)).unwrap().to_string(),
            "5/6"
        );
        assert_eq!(Expr::fraction(2, x(), y()).unwrap().to_string(), "2x/y");
    }

    #[test]
    fn check_canonical_accepts_operator_output() {
        let exprs = [
            x().add(y()),
            x().mul(y()).mul(x()),
            Expr::fraction(3, x(), y().mul(y())).unwrap(),
            x().add(Expr::int(1)).mul(x().add(Expr::int(1))),
        ];
        for expr in &exprs {
            expr.check_canonical().unwrap();
        }
    }

    #[test]
    fn check_canonical_rejects_singleton_sum() {
        let bad = Expr::Sum(Sum { coefficient: int(1), terms: vec![x()] });
        assert!(matches!(
            bad.check_canonical(),
            Err(AlgebraError::InvariantViolation(_))
        ));
    }

    #[test]
    fn check_canonical_rejects_negative_exponents() {
        let bad = Expr::Exponential(Exponential {
            coefficient: int(1),
            base: Box::new(x()),
            exponent: Box::new(Expr::int(-2)),
        });
        assert!(matches!(
            bad.check_canonical(),
            Err(AlgebraError::InvariantViolation(_))
        ));
    }

    #[test]
    fn check_canonical_rejects_unfolded_base_coefficients() {
        // (2x)^3 must have folded into 8x^3 at construction
        let bad = Expr::Exponential(Exponential {
            coefficient: int(1),
            base: Box::new(Expr::atom(2, "x")),
            exponent: Box::new(Expr::int(3)),
        });
        assert!(matches!(
            bad.check_canonical(),
            Err(AlgebraError::InvariantViolation(_))
        ));
        // a symbolic exponent legitimately keeps the base coefficient
        let ok = Exponential::new(int(1), Expr::atom(2, "x"), y());
        ok.check_canonical().unwrap();
    }

    #[test]
    fn check_canonical_rejects_unit_denominator() {
        let bad = Expr::Fraction(Fraction {
            coefficient: int(1),
            numerator: Box::new(x()),
            denominator: Box::new(Expr::one()),
        });
        assert!(matches!(
            bad.check_canonical(),
            Err(AlgebraError::InvariantViolation(_))
        ));
    }
}
