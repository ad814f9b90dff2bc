//! A small symbolic algebra engine with one guarantee: every expression you
//! can get your hands on is already in canonical form.
//!
//! Expressions are built from integer-weighted atoms, sums, products,
//! exponentials, and fractions, and combined with the usual four operators.
//! There is no `simplify()` to call and no unreduced intermediate state to
//! observe; reduction happens inside the constructors, so structural equality
//! is mathematical equality for anything the operators return.
//!
//! ```
//! use symcanon::Expr;
//!
//! let x = Expr::constant("x");
//!
//! // like terms merge on contact
//! assert_eq!(x.clone() + Expr::atom(2, "x"), Expr::atom(3, "x"));
//!
//! // rational arithmetic stays exact and reduced
//! let half = Expr::int(1).div(&Expr::int(2))?;
//! let third = Expr::int(1).div(&Expr::int(3))?;
//! assert_eq!((half + third).to_string(), "5/6");
//!
//! // symbolic content cancels across fractions
//! let ratio = x.clone().div(&Expr::constant("y"))?;
//! let inverse = Expr::constant("y").div(&x)?;
//! assert_eq!(ratio * inverse, Expr::one());
//! # Ok::<(), symcanon::AlgebraError>(())
//! ```
//!
//! Expressions are exact; [`Expr::approximate`] converts to `f64` at the very
//! end, resolving named constants through a [`ConstantTable`].

pub mod consts;
pub mod error;
pub mod expr;
pub mod primitive;

pub use consts::{ConstantTable, DEFAULT_CONSTANTS};
pub use error::{AlgebraError, Result};
pub use expr::Expr;
