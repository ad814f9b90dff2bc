//! Sums: a coefficient times a sorted list of pairwise-unlike terms.
//!
//! [`Sum::new`] flattens nested sums, drops zeros, sorts, and merges like
//! terms in a single pass; what remains has the gcd of its term coefficients
//! pulled out front, so `4x + 4y` is stored as `4(x + y)`. Multiplication
//! distributes every term of one side over every term of the other.
//!
//! [`Sum::factor`] undoes distribution just far enough for cancellation: it
//! extracts the symbolic content common to every term, which is what lets a
//! fraction like `(x^2 + x)/x` reduce to `x + 1`.

use super::{Atom, Exponential, Expr, Product};
use crate::primitive::{gcd, int};
use rug::Integer;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Sum {
    /// The integer multiplier, distributed on demand.
    pub coefficient: Integer,

    /// At least two terms, sorted, pairwise unlike, none zero and none a
    /// nested sum.
    pub terms: Vec<Expr>,
}

impl Sum {
    /// Creates `coefficient * (terms[0] + terms[1] + ...)` in canonical form.
    /// The result collapses to the surviving term (or zero) when merging runs
    /// the list short.
    pub fn new(coefficient: Integer, terms: Vec<Expr>) -> Expr {
        if coefficient == 0 {
            return Expr::zero();
        }

        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Sum(s) => flat.extend(s.distribute()),
                term if term.is_zero() => {}
                term => flat.push(term),
            }
        }
        flat.sort_by(|a, b| a.canonical_cmp(b));

        // like terms are adjacent after sorting
        let mut merged: Vec<Expr> = Vec::with_capacity(flat.len());
        let mut reflatten = false;
        for term in flat {
            if matches!(merged.last(), Some(prev) if prev.like(&term)) {
                if let Some(prev) = merged.pop() {
                    let combined = prev.add(&term);
                    // like fractions can merge into a sum when their
                    // denominator cancels, e.g. (x+y)/2 + (x+y)/2
                    if matches!(combined, Expr::Sum(_)) {
                        reflatten = true;
                    }
                    if !combined.is_zero() {
                        merged.push(combined);
                    }
                }
            } else {
                merged.push(term);
            }
        }
        if reflatten {
            return Sum::new(coefficient, merged);
        }

        match merged.len() {
            0 => Expr::zero(),
            1 => merged.remove(0).scaled(&coefficient),
            _ => {
                let mut g = int(0);
                for term in &merged {
                    g = gcd(&g, term.coefficient());
                }
                let terms = merged
                    .iter()
                    .map(|term| term.with_coefficient(Integer::from(term.coefficient() / &g)))
                    .collect();
                Expr::Sum(Sum { coefficient: coefficient * g, terms })
            }
        }
    }

    /// The terms with the outer coefficient pushed into each one.
    pub fn distribute(&self) -> Vec<Expr> {
        self.terms
            .iter()
            .map(|term| term.scaled(&self.coefficient))
            .collect()
    }

    /// Adds an expression to this sum by merging it into the term list.
    pub fn add(&self, rhs: &Expr) -> Expr {
        let mut terms = self.distribute();
        match rhs {
            Expr::Sum(s) => terms.extend(s.distribute()),
            other => terms.push(other.clone()),
        }
        Sum::new(int(1), terms)
    }

    /// Multiplies by distributing every term over every term of `rhs`.
    pub fn mul(&self, rhs: &Expr) -> Expr {
        let lhs_terms = self.distribute();
        let rhs_terms = match rhs {
            Expr::Sum(s) => s.distribute(),
            other => vec![other.clone()],
        };
        let mut products = Vec::with_capacity(lhs_terms.len() * rhs_terms.len());
        for l in &lhs_terms {
            for r in &rhs_terms {
                products.push(l.mul(r));
            }
        }
        Sum::new(int(1), products)
    }

    /// Splits the sum into `(common, remaining)` with `self == common *
    /// remaining`, where `common` is the symbolic content shared by every term
    /// (integer powers only). When the terms share nothing, `common` is `1`
    /// and `remaining` is the sum itself.
    pub fn factor(&self) -> (Expr, Expr) {
        let Some(first) = self.terms.first() else {
            return (Expr::one(), Expr::Sum(self.clone()));
        };
        let mut common = Self::powers_of(first);
        for term in &self.terms[1..] {
            let powers = Self::powers_of(term);
            common.retain_mut(|(base, n)| match powers.iter().find(|(b, _)| b == base) {
                Some((_, m)) => {
                    if *m < *n {
                        *n = m.clone();
                    }
                    true
                }
                None => false,
            });
            if common.is_empty() {
                break;
            }
        }
        common.retain(|(base, _)| !base.is_one());
        if common.is_empty() {
            return (Expr::one(), Expr::Sum(self.clone()));
        }

        let parts = common
            .iter()
            .map(|(base, n)| Self::power(base.clone(), n.clone()))
            .collect();
        let factored = Product::new(int(1), parts);

        let mut rest = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            let mut residual = Vec::new();
            for (base, n) in Self::powers_of(term) {
                let shared = common
                    .iter()
                    .find(|(b, _)| *b == base)
                    .map(|(_, m)| m.clone())
                    .unwrap_or_else(|| int(0));
                let left = n - shared;
                if left > 0 {
                    residual.push(Self::power(base, left));
                }
            }
            rest.push(Product::new(term.coefficient().clone(), residual));
        }
        (factored, Sum::new(self.coefficient.clone(), rest))
    }

    /// Views a term as integer powers of coefficient-free bases. Exponentials
    /// contribute their base only for pure positive integer exponents;
    /// anything else counts as a whole base to the first power.
    fn powers_of(term: &Expr) -> Vec<(Expr, Integer)> {
        let factors = match term {
            Expr::Product(p) => p.factors.clone(),
            other => vec![other.with_coefficient(int(1))],
        };
        factors
            .into_iter()
            .map(|factor| match factor {
                Expr::Exponential(e) if e.coefficient == 1 => {
                    match e.exponent.as_integer() {
                        Some(n) if n.cmp0() == Ordering::Greater => ((*e.base).clone(), n.clone()),
                        _ => (Expr::Exponential(e), int(1)),
                    }
                }
                other => (other, int(1)),
            })
            .collect()
    }

    fn power(base: Expr, n: Integer) -> Expr {
        if n == 1 {
            base
        } else {
            Exponential::new(int(1), base, Expr::Atom(Atom::new(n, "")))
        }
    }
}
