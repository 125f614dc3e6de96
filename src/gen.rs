//! Random construction of types, related types, and well-typed terms.
//!
//! The term generator is the driver of the soundness properties: it only
//! ever builds closed terms that synthesize a type, widening parameter
//! annotations to exercise subsumption at applications and merging branch
//! types to exercise joins at conditionals.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::syntax::{self, abs, app, fst, ite, pair, snd, var, Ctx, Tm, Ty};

const BASE_NAMES: &[&str] = &["Nat", "String", "Float"];
const LABELS: &[&str] = &["a", "b", "c", "d"];
const EXTRA_LABELS: &[&str] = &["e", "f", "g"];
const VAR_NAMES: &[&str] = &["x", "y", "z", "f", "g", "p", "q", "w"];

/// A random type of bounded depth.
pub fn ty<R: Rng>(rng: &mut R, depth: usize) -> Ty {
    if depth == 0 {
        return leaf_ty(rng);
    }
    match rng.gen_range(0, 7) {
        0 | 1 | 2 => leaf_ty(rng),
        3 => syntax::arrow(ty(rng, depth - 1), ty(rng, depth - 1)),
        4 => syntax::prod(ty(rng, depth - 1), ty(rng, depth - 1)),
        _ => record_ty(rng, depth),
    }
}

fn leaf_ty<R: Rng>(rng: &mut R) -> Ty {
    match rng.gen_range(0, 4) {
        0 => Ty::Top,
        1 => Ty::Bool,
        2 => Ty::Unit,
        _ => syntax::base(BASE_NAMES[rng.gen_range(0, BASE_NAMES.len())]),
    }
}

fn record_ty<R: Rng>(rng: &mut R, depth: usize) -> Ty {
    let mut fields = Vec::new();
    for l in LABELS {
        if rng.gen_bool(0.5) {
            fields.push((l.to_string(), ty(rng, depth - 1)));
        }
    }
    fields.shuffle(rng);
    Ty::Record(fields)
}

/// A random supertype of `t`, sound by construction: records drop fields,
/// widen the rest, and reorder; arrows narrow their domain and widen their
/// codomain; anything may widen all the way to `Top`.
pub fn widen<R: Rng>(rng: &mut R, t: &Ty) -> Ty {
    use crate::syntax::Ty::*;
    if rng.gen_bool(0.3) {
        return t.clone();
    }
    if rng.gen_bool(0.15) {
        return Top;
    }
    match *t {
        Arrow(ref t1, ref t2) => syntax::arrow(narrow(rng, t1), widen(rng, t2)),
        Prod(ref t1, ref t2) => syntax::prod(widen(rng, t1), widen(rng, t2)),
        Record(ref fields) => {
            let mut kept = Vec::new();
            for &(ref l, ref fty) in fields {
                if rng.gen_bool(0.7) {
                    kept.push((l.clone(), widen(rng, fty)));
                }
            }
            kept.shuffle(rng);
            Record(kept)
        }
        _ => t.clone(),
    }
}

/// A random subtype of `t`; the dual of [`widen`].
pub fn narrow<R: Rng>(rng: &mut R, t: &Ty) -> Ty {
    use crate::syntax::Ty::*;
    if rng.gen_bool(0.3) {
        return t.clone();
    }
    match *t {
        Top => ty(rng, 1),
        Arrow(ref t1, ref t2) => syntax::arrow(widen(rng, t1), narrow(rng, t2)),
        Prod(ref t1, ref t2) => syntax::prod(narrow(rng, t1), narrow(rng, t2)),
        Record(ref fields) => {
            let mut out: Vec<_> = fields
                .iter()
                .map(|&(ref l, ref fty)| (l.clone(), narrow(rng, fty)))
                .collect();
            for l in EXTRA_LABELS {
                if rng.gen_bool(0.3) && !out.iter().any(|p| p.0 == *l) {
                    out.push((l.to_string(), ty(rng, 1)));
                }
            }
            out.shuffle(rng);
            Record(out)
        }
        _ => t.clone(),
    }
}

/// A closed term, well typed by construction.
pub fn closed_term<R: Rng>(rng: &mut R, depth: usize) -> Tm {
    term(rng, &Ctx::new(), depth).0
}

/// A term under `ctx`, together with the type `type_of` will synthesize
/// for it.
pub fn term<R: Rng>(rng: &mut R, ctx: &Ctx, depth: usize) -> (Tm, Ty) {
    if depth == 0 {
        return leaf_term(rng, ctx);
    }
    match rng.gen_range(0, 8) {
        0 => leaf_term(rng, ctx),
        1 | 2 => {
            let x = VAR_NAMES[rng.gen_range(0, VAR_NAMES.len())];
            let ty1 = ty(rng, 2);
            let (body, ty2) = term(rng, &ctx.add(x, ty1.clone()), depth - 1);
            (abs(x, ty1.clone(), body), syntax::arrow(ty1, ty2))
        }
        3 | 4 => {
            // A redex whose parameter annotation is wider than the argument
            // type, so the application goes through subsumption.
            let (arg, ty_arg) = term(rng, ctx, depth - 1);
            let dom = widen(rng, &ty_arg);
            let x = VAR_NAMES[rng.gen_range(0, VAR_NAMES.len())];
            let (body, ty_body) = term(rng, &ctx.add(x, dom.clone()), depth - 1);
            (app(abs(x, dom, body), arg), ty_body)
        }
        5 => {
            let cond = bool_term(rng, ctx, depth - 1);
            let (t2, ty2) = term(rng, ctx, depth - 1);
            let (t3, ty3) = term(rng, ctx, depth - 1);
            (ite(cond, t2, t3), ty2.join(&ty3))
        }
        6 => {
            let (t1, ty1) = term(rng, ctx, depth - 1);
            let (t2, ty2) = term(rng, ctx, depth - 1);
            (pair(t1, t2), syntax::prod(ty1, ty2))
        }
        _ => {
            let (t1, ty1) = term(rng, ctx, depth - 1);
            let (t2, ty2) = term(rng, ctx, depth - 1);
            if rng.gen() {
                (fst(pair(t1, t2)), ty1)
            } else {
                (snd(pair(t1, t2)), ty2)
            }
        }
    }
}

fn leaf_term<R: Rng>(rng: &mut R, ctx: &Ctx) -> (Tm, Ty) {
    if rng.gen_bool(0.4) && !ctx.is_empty() {
        let names: Vec<&str> = ctx.names().collect();
        if let Some(x) = names.choose(rng) {
            if let Some(t) = ctx.get(x) {
                return (var(x), t.clone());
            }
        }
    }
    match rng.gen_range(0, 3) {
        0 => (Tm::True, Ty::Bool),
        1 => (Tm::False, Ty::Bool),
        _ => (Tm::Unit, Ty::Unit),
    }
}

fn bool_term<R: Rng>(rng: &mut R, ctx: &Ctx, depth: usize) -> Tm {
    if depth == 0 || rng.gen_bool(0.6) {
        return if rng.gen() { Tm::True } else { Tm::False };
    }
    if rng.gen_bool(0.3) {
        let bools: Vec<&str> = ctx
            .names()
            .filter(|x| ctx.get(x) == Some(&Ty::Bool))
            .collect();
        if let Some(x) = bools.choose(rng) {
            return var(x);
        }
    }
    ite(
        bool_term(rng, ctx, depth - 1),
        bool_term(rng, ctx, depth - 1),
        bool_term(rng, ctx, depth - 1),
    )
}
