//! Types, terms, and typing contexts.

use std::collections::HashSet;
use std::fmt;

/// Represents a type.
#[derive(Clone, Debug, PartialEq)]
pub enum Ty {
    /// The universal supertype.
    Top,
    /// The type of `true` and `false`.
    Bool,
    /// The type of the unit value.
    Unit,
    /// An opaque base type, identified by its name.
    Base(String),
    /// An arrow type.
    Arrow(Box<Ty>, Box<Ty>),
    /// A product type.
    Prod(Box<Ty>, Box<Ty>),
    /// A record type: labeled fields, labels unique, written order preserved.
    ///
    /// The derived equality is syntactic, so it is order-sensitive; the
    /// subtype relation is where field order stops mattering.
    Record(Vec<(String, Ty)>),
}

/// Represents a term.
#[derive(Clone, Debug, PartialEq)]
pub enum Tm {
    Var(String),
    Abs(String, Ty, Box<Tm>),
    App(Box<Tm>, Box<Tm>),
    True,
    False,
    If(Box<Tm>, Box<Tm>, Box<Tm>),
    Pair(Box<Tm>, Box<Tm>),
    Fst(Box<Tm>),
    Snd(Box<Tm>),
    Unit,
}

pub fn arrow(ty1: Ty, ty2: Ty) -> Ty {
    Ty::Arrow(Box::new(ty1), Box::new(ty2))
}

pub fn prod(ty1: Ty, ty2: Ty) -> Ty {
    Ty::Prod(Box::new(ty1), Box::new(ty2))
}

pub fn base(name: &str) -> Ty {
    Ty::Base(name.to_string())
}

/// A record type from label-type pairs, in the written order.
pub fn record(fields: Vec<(&str, Ty)>) -> Ty {
    Ty::Record(
        fields
            .into_iter()
            .map(|(l, ty)| (l.to_string(), ty))
            .collect(),
    )
}

pub fn var(x: &str) -> Tm {
    Tm::Var(x.to_string())
}

pub fn abs(x: &str, ty: Ty, t: Tm) -> Tm {
    Tm::Abs(x.to_string(), ty, Box::new(t))
}

pub fn app(t1: Tm, t2: Tm) -> Tm {
    Tm::App(Box::new(t1), Box::new(t2))
}

pub fn ite(t1: Tm, t2: Tm, t3: Tm) -> Tm {
    Tm::If(Box::new(t1), Box::new(t2), Box::new(t3))
}

pub fn pair(t1: Tm, t2: Tm) -> Tm {
    Tm::Pair(Box::new(t1), Box::new(t2))
}

pub fn fst(t: Tm) -> Tm {
    Tm::Fst(Box::new(t))
}

pub fn snd(t: Tm) -> Tm {
    Tm::Snd(Box::new(t))
}

impl Tm {
    /// Whether the term is irreducible.
    pub fn is_value(&self) -> bool {
        use self::Tm::*;
        match *self {
            Abs(..) | True | False | Unit => true,
            Pair(ref t1, ref t2) => t1.is_value() && t2.is_value(),
            _ => false,
        }
    }

    pub fn free_vars(&self) -> HashSet<String> {
        use self::Tm::*;
        match *self {
            Var(ref x) => {
                let mut s = HashSet::new();
                s.insert(x.clone());
                s
            }
            Abs(ref x, _, ref t) => {
                let mut s = t.free_vars();
                s.remove(x);
                s
            }
            App(ref t1, ref t2) | Pair(ref t1, ref t2) => {
                let mut s = t1.free_vars();
                s.extend(t2.free_vars());
                s
            }
            If(ref t1, ref t2, ref t3) => {
                let mut s = t1.free_vars();
                s.extend(t2.free_vars());
                s.extend(t3.free_vars());
                s
            }
            Fst(ref t) | Snd(ref t) => t.free_vars(),
            True | False | Unit => HashSet::new(),
        }
    }

    /// Substitutes `v` for the free occurrences of `x`, renaming bound
    /// names which would capture a free variable of `v`.
    pub fn subst(&self, x: &str, v: &Tm) -> Tm {
        use self::Tm::*;
        match *self {
            Var(ref y) => {
                if y == x {
                    v.clone()
                } else {
                    self.clone()
                }
            }
            Abs(ref y, ref ty, ref t) => {
                if y == x {
                    self.clone()
                } else if v.free_vars().contains(y) {
                    let mut avoid = t.free_vars();
                    avoid.extend(v.free_vars());
                    avoid.insert(x.to_string());
                    let y1 = fresh_name(y, &avoid);
                    let t1 = t.subst(y, &Var(y1.clone()));
                    Abs(y1, ty.clone(), Box::new(t1.subst(x, v)))
                } else {
                    Abs(y.clone(), ty.clone(), Box::new(t.subst(x, v)))
                }
            }
            App(ref t1, ref t2) => App(Box::new(t1.subst(x, v)), Box::new(t2.subst(x, v))),
            If(ref t1, ref t2, ref t3) => If(
                Box::new(t1.subst(x, v)),
                Box::new(t2.subst(x, v)),
                Box::new(t3.subst(x, v)),
            ),
            Pair(ref t1, ref t2) => Pair(Box::new(t1.subst(x, v)), Box::new(t2.subst(x, v))),
            Fst(ref t) => Fst(Box::new(t.subst(x, v))),
            Snd(ref t) => Snd(Box::new(t.subst(x, v))),
            True | False | Unit => self.clone(),
        }
    }
}

fn fresh_name(y: &str, avoid: &HashSet<String>) -> String {
    let mut y1 = format!("{}'", y);
    while avoid.contains(&y1) {
        y1.push('\'');
    }
    y1
}

/// A typing context: a persistent mapping from variable names to types.
///
/// `add` never mutates the receiver; the innermost binding for a name
/// shadows the older ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ctx(Vec<(String, Ty)>);

impl Ctx {
    pub fn new() -> Ctx {
        Ctx(Vec::new())
    }

    pub fn add(&self, x: &str, ty: Ty) -> Ctx {
        let mut v = self.0.clone();
        v.push((x.to_string(), ty));
        Ctx(v)
    }

    pub fn get(&self, x: &str) -> Option<&Ty> {
        self.0.iter().rev().find(|p| p.0 == x).map(|p| &p.1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bound names, oldest first. Shadowed names may appear twice.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.0.as_str())
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Ty::Top => write!(f, "Top"),
            Ty::Bool => write!(f, "Bool"),
            Ty::Unit => write!(f, "Unit"),
            Ty::Base(ref s) => write!(f, "{}", s),
            Ty::Arrow(ref ty1, ref ty2) => match **ty1 {
                Ty::Arrow(..) => write!(f, "({}) -> {}", ty1, ty2),
                _ => write!(f, "{} -> {}", ty1, ty2),
            },
            Ty::Prod(ref ty1, ref ty2) => write!(f, "({} * {})", ty1, ty2),
            Ty::Record(ref fields) => {
                write!(f, "{{")?;
                for (i, &(ref l, ref ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", l, ty)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Tm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tm::Var(ref s) => write!(f, "{}", s),
            Tm::Abs(ref x, ref ty, ref t) => write!(f, "\\{}: {}. {}", x, ty, t),
            Tm::App(ref t1, ref t2) => write!(f, "({} {})", t1, t2),
            Tm::True => write!(f, "true"),
            Tm::False => write!(f, "false"),
            Tm::If(ref t1, ref t2, ref t3) => {
                write!(f, "if {} then {} else {}", t1, t2, t3)
            }
            Tm::Pair(ref t1, ref t2) => write!(f, "({}, {})", t1, t2),
            Tm::Fst(ref t) => write!(f, "{}.1", t),
            Tm::Snd(ref t) => write!(f, "{}.2", t),
            Tm::Unit => write!(f, "unit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_value() {
        assert!(Tm::True.is_value());
        assert!(Tm::Unit.is_value());
        assert!(abs("x", Ty::Bool, var("x")).is_value());
        assert!(pair(Tm::True, Tm::Unit).is_value());
        assert!(!pair(fst(pair(Tm::True, Tm::False)), Tm::Unit).is_value());
        assert!(!app(abs("x", Ty::Bool, var("x")), Tm::True).is_value());
    }

    #[test]
    fn test_ctx_shadowing() {
        let ctx = Ctx::new().add("x", Ty::Bool).add("x", Ty::Unit);
        assert_eq!(ctx.get("x"), Some(&Ty::Unit));
        assert_eq!(ctx.get("y"), None);
        assert!(Ctx::new().is_empty());
    }

    #[test]
    fn test_ctx_is_persistent() {
        let ctx = Ctx::new().add("x", Ty::Bool);
        let ctx1 = ctx.add("y", Ty::Unit);
        assert_eq!(ctx.get("y"), None);
        assert_eq!(ctx1.get("y"), Some(&Ty::Unit));
        assert_eq!(ctx1.get("x"), Some(&Ty::Bool));
    }

    #[test]
    fn test_subst() {
        let t = app(var("f"), var("x"));
        assert_eq!(t.subst("x", &Tm::True), app(var("f"), Tm::True));

        // No substitution under a binder of the same name.
        let t = abs("x", Ty::Bool, var("x"));
        assert_eq!(t.subst("x", &Tm::True), t);

        let t = abs("y", Ty::Bool, var("x"));
        assert_eq!(
            t.subst("x", &Tm::False),
            abs("y", Ty::Bool, Tm::False)
        );
    }

    #[test]
    fn test_subst_avoids_capture() {
        // (\y. x)[x := y] must not capture the free y.
        let t = abs("y", Ty::Bool, var("x"));
        let t1 = t.subst("x", &var("y"));
        assert_eq!(t1, abs("y'", Ty::Bool, var("y")));
    }

    #[test]
    fn test_free_vars() {
        let t = abs("x", Ty::Bool, app(var("x"), var("y")));
        let mut s = HashSet::new();
        s.insert("y".to_string());
        assert_eq!(t.free_vars(), s);
        assert_eq!(Tm::True.free_vars(), HashSet::new());
    }

    #[test]
    fn test_display() {
        assert_eq!(arrow(Ty::Bool, Ty::Unit).to_string(), "Bool -> Unit");
        assert_eq!(
            arrow(arrow(Ty::Bool, Ty::Bool), Ty::Top).to_string(),
            "(Bool -> Bool) -> Top"
        );
        assert_eq!(
            record(vec![("a", Ty::Bool), ("b", base("Nat"))]).to_string(),
            "{a: Bool, b: Nat}"
        );
        assert_eq!(
            ite(Tm::True, Tm::Unit, Tm::Unit).to_string(),
            "if true then unit else unit"
        );
    }
}
