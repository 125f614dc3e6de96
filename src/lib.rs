//! A simply typed lambda calculus with structural subtyping.
//!
//! The crate decides the subtype relation between types, including joins
//! (least upper bounds) and meets (greatest lower bounds), synthesizes
//! minimal types with subsumption applied only at elimination sites,
//! reduces well-typed terms under call-by-value, and ships a random
//! generator of well-typed terms with which progress and preservation are
//! checked as executable properties rather than hand proofs.

pub mod eval;
pub mod gen;
pub mod subtype;
pub mod syntax;
pub mod typing;

#[cfg(test)]
mod testutil;

pub use crate::eval::{run, step, EvalError};
pub use crate::syntax::{Ctx, Tm, Ty};
pub use crate::typing::TypeError;
