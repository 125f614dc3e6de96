//! Quickcheck instances over the random generators.

use quickcheck::{empty_shrinker, single_shrinker, Arbitrary, Gen};

use crate::gen;
use crate::syntax::{Tm, Ty};

impl Arbitrary for Ty {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        gen::ty(g, 3)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use crate::syntax::Ty::*;
        match *self {
            Top | Bool | Unit => empty_shrinker(),
            Base(_) => single_shrinker(Bool),
            Arrow(ref t1, ref t2) => {
                let mut out = vec![(**t1).clone(), (**t2).clone()];
                for a in (**t1).shrink() {
                    out.push(Arrow(Box::new(a), t2.clone()));
                }
                for b in (**t2).shrink() {
                    out.push(Arrow(t1.clone(), Box::new(b)));
                }
                Box::new(out.into_iter())
            }
            Prod(ref t1, ref t2) => {
                let mut out = vec![(**t1).clone(), (**t2).clone()];
                for a in (**t1).shrink() {
                    out.push(Prod(Box::new(a), t2.clone()));
                }
                for b in (**t2).shrink() {
                    out.push(Prod(t1.clone(), Box::new(b)));
                }
                Box::new(out.into_iter())
            }
            // Shrink a record by dropping one field at a time; labels are
            // kept intact so uniqueness survives shrinking.
            Record(ref fields) => {
                let mut out = Vec::new();
                for i in 0..fields.len() {
                    let mut v = fields.clone();
                    v.remove(i);
                    out.push(Record(v));
                }
                Box::new(out.into_iter())
            }
        }
    }
}

/// A closed term which type checks under the empty context.
#[derive(Clone, Debug)]
pub struct WellTyped(pub Tm);

impl Arbitrary for WellTyped {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        WellTyped(gen::closed_term(g, 4))
    }
}

/// Three types with `S <: U <: T` by construction.
#[derive(Clone, Debug)]
pub struct SubChain(pub Ty, pub Ty, pub Ty);

impl Arbitrary for SubChain {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let s = gen::ty(g, 3);
        let u = gen::widen(g, &s);
        let t = gen::widen(g, &u);
        SubChain(s, u, t)
    }
}
