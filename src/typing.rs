//! Type synthesis with subsumption at the elimination sites.

use thiserror::Error;

use crate::syntax::{Ctx, Tm, Ty};

/// The ways a term can fail to type check. Each variant carries the
/// offending sub-term and the types involved.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("unbound variable `{0}`")]
    UnboundVariable(String),

    #[error("`{0}` is applied to an argument, but it has type {1}, not an arrow type")]
    NotAFunction(Tm, Ty),

    #[error("argument `{0}` has type {1}, which is not a subtype of the domain {2}")]
    ArgumentTypeMismatch(Tm, Ty, Ty),

    #[error("condition `{0}` has type {1}, not Bool")]
    ConditionNotBool(Tm, Ty),

    #[error("`{0}` is projected, but it has type {1}, not a product type")]
    NotAPair(Tm, Ty),

    #[error("{0} and {1} have no greatest lower bound")]
    NoMeet(Ty, Ty),
}

impl Tm {
    /// Synthesizes the minimal type of the term under `ctx`.
    ///
    /// Subsumption is not a freely applicable rule here. The subtype
    /// machinery is consulted at exactly two places: an application may pass
    /// an argument below the declared domain, and a conditional merges its
    /// branch types with `join`. Everything else synthesizes the tightest
    /// type directly, so an arrow or product returned by synthesis is
    /// already in canonical shape and never needs decomposing through a
    /// supertype.
    pub fn type_of(&self, ctx: &Ctx) -> Result<Ty, TypeError> {
        use crate::syntax::Tm::*;
        match *self {
            Var(ref x) => ctx
                .get(x)
                .cloned()
                .ok_or_else(|| TypeError::UnboundVariable(x.clone())),
            Abs(ref x, ref ty1, ref t) => {
                let ty2 = t.type_of(&ctx.add(x, ty1.clone()))?;
                Ok(Ty::Arrow(Box::new(ty1.clone()), Box::new(ty2)))
            }
            App(ref t1, ref t2) => Tm::type_of_app(t1, t2, ctx),
            True | False => Ok(Ty::Bool),
            If(ref t1, ref t2, ref t3) => Tm::type_of_if(t1, t2, t3, ctx),
            Pair(ref t1, ref t2) => Ok(Ty::Prod(
                Box::new(t1.type_of(ctx)?),
                Box::new(t2.type_of(ctx)?),
            )),
            Fst(ref t) => match t.type_of(ctx)? {
                Ty::Prod(ty1, _) => Ok(*ty1),
                ty => Err(TypeError::NotAPair(t.as_ref().clone(), ty)),
            },
            Snd(ref t) => match t.type_of(ctx)? {
                Ty::Prod(_, ty2) => Ok(*ty2),
                ty => Err(TypeError::NotAPair(t.as_ref().clone(), ty)),
            },
            Unit => Ok(Ty::Unit),
        }
    }

    fn type_of_app(t1: &Tm, t2: &Tm, ctx: &Ctx) -> Result<Ty, TypeError> {
        let ty1 = t1.type_of(ctx)?;
        match ty1 {
            Ty::Arrow(ty11, ty12) => {
                let ty2 = t2.type_of(ctx)?;
                if ty2.subtype_of(&ty11) {
                    Ok(*ty12)
                } else {
                    Err(TypeError::ArgumentTypeMismatch(t2.clone(), ty2, *ty11))
                }
            }
            ty1 => Err(TypeError::NotAFunction(t1.clone(), ty1)),
        }
    }

    fn type_of_if(t1: &Tm, t2: &Tm, t3: &Tm, ctx: &Ctx) -> Result<Ty, TypeError> {
        let ty1 = t1.type_of(ctx)?;
        // Bool has no supertype below Top, so an exact check suffices.
        if ty1 != Ty::Bool {
            return Err(TypeError::ConditionNotBool(t1.clone(), ty1));
        }
        let ty2 = t2.type_of(ctx)?;
        let ty3 = t3.type_of(ctx)?;
        Ok(ty2.join(&ty3))
    }
}
