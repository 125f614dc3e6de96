//! Call-by-value small-step evaluation.

use thiserror::Error;

use crate::syntax::Tm;

/// The ways a run can fail to produce a value.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    /// A non-value term matched no reduction rule. Unreachable for terms
    /// that passed `type_of`; a test suite treats this as a bug signal.
    #[error("stuck term: {0}")]
    Stuck(Tm),

    /// The step budget ran out before a value was reached.
    #[error("no value after {0} steps")]
    NonTermination(usize),
}

/// Performs one reduction, leftmost-outermost under call-by-value.
///
/// Returns `None` both for values and for stuck terms; `run` tells the two
/// apart.
pub fn step(t: &Tm) -> Option<Tm> {
    use crate::syntax::Tm::*;
    match *t {
        App(ref t1, ref t2) => {
            if !t1.is_value() {
                return Some(App(Box::new(step(t1)?), t2.clone()));
            }
            if !t2.is_value() {
                return Some(App(t1.clone(), Box::new(step(t2)?)));
            }
            match **t1 {
                Abs(ref x, _, ref body) => Some(body.subst(x, t2)),
                _ => None,
            }
        }
        If(ref t1, ref t2, ref t3) => {
            if !t1.is_value() {
                return Some(If(Box::new(step(t1)?), t2.clone(), t3.clone()));
            }
            match **t1 {
                True => Some((**t2).clone()),
                False => Some((**t3).clone()),
                _ => None,
            }
        }
        Pair(ref t1, ref t2) => {
            if !t1.is_value() {
                Some(Pair(Box::new(step(t1)?), t2.clone()))
            } else if !t2.is_value() {
                Some(Pair(t1.clone(), Box::new(step(t2)?)))
            } else {
                None
            }
        }
        Fst(ref t1) => {
            if !t1.is_value() {
                return Some(Fst(Box::new(step(t1)?)));
            }
            match **t1 {
                Pair(ref v1, _) => Some((**v1).clone()),
                _ => None,
            }
        }
        Snd(ref t1) => {
            if !t1.is_value() {
                return Some(Snd(Box::new(step(t1)?)));
            }
            match **t1 {
                Pair(_, ref v2) => Some((**v2).clone()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Iterates `step` until a value, a stuck term, or an exhausted budget.
pub fn run(t: Tm, max_steps: usize) -> Result<Tm, EvalError> {
    let mut t = t;
    for _ in 0..max_steps {
        if t.is_value() {
            return Ok(t);
        }
        match step(&t) {
            Some(t1) => t = t1,
            None => return Err(EvalError::Stuck(t)),
        }
    }
    if t.is_value() {
        Ok(t)
    } else {
        Err(EvalError::NonTermination(max_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::*;

    #[test]
    fn test_values_do_not_step() {
        assert_eq!(step(&Tm::True), None);
        assert_eq!(step(&Tm::Unit), None);
        assert_eq!(step(&abs("x", Ty::Bool, var("x"))), None);
        assert_eq!(step(&pair(Tm::True, Tm::Unit)), None);
    }

    #[test]
    fn test_beta_reduction() {
        let t = app(abs("x", Ty::Bool, var("x")), Tm::True);
        assert_eq!(step(&t), Some(Tm::True));
    }

    #[test]
    fn test_left_to_right_order() {
        let id = abs("x", Ty::Bool, var("x"));
        // The function position reduces before the argument position.
        let t = app(
            app(abs("f", arrow(Ty::Bool, Ty::Bool), var("f")), id.clone()),
            app(id.clone(), Tm::True),
        );
        assert_eq!(
            step(&t),
            Some(app(id.clone(), app(id, Tm::True)))
        );
    }

    #[test]
    fn test_if_picks_a_branch() {
        assert_eq!(step(&ite(Tm::True, Tm::Unit, Tm::False)), Some(Tm::Unit));
        assert_eq!(step(&ite(Tm::False, Tm::Unit, Tm::False)), Some(Tm::False));

        let t = ite(
            app(abs("x", Ty::Bool, var("x")), Tm::False),
            Tm::True,
            Tm::False,
        );
        assert_eq!(step(&t), Some(ite(Tm::False, Tm::True, Tm::False)));
    }

    #[test]
    fn test_projection_steps_in_one() {
        let t = fst(pair(Tm::True, Tm::Unit));
        assert_eq!(step(&t), Some(Tm::True));
        let t = snd(pair(Tm::True, Tm::Unit));
        assert_eq!(step(&t), Some(Tm::Unit));
    }

    #[test]
    fn test_pair_components_reduce_left_first() {
        let t = pair(
            fst(pair(Tm::True, Tm::False)),
            snd(pair(Tm::True, Tm::Unit)),
        );
        assert_eq!(
            step(&t),
            Some(pair(Tm::True, snd(pair(Tm::True, Tm::Unit))))
        );
    }

    #[test]
    fn test_run_to_value() {
        let not = abs("x", Ty::Bool, ite(var("x"), Tm::False, Tm::True));
        let t = app(not.clone(), app(not, Tm::True));
        assert_eq!(run(t, 100), Ok(Tm::True));
    }

    #[test]
    fn test_run_detects_stuckness() {
        // Ill-typed on purpose: true is not a function.
        let t = app(Tm::True, Tm::Unit);
        assert_eq!(run(t.clone(), 100), Err(EvalError::Stuck(t)));
    }

    #[test]
    fn test_run_exhausts_its_budget() {
        let id = abs("x", Ty::Bool, var("x"));
        let t = app(id.clone(), app(id.clone(), app(id, Tm::True)));
        assert_eq!(run(t, 2), Err(EvalError::NonTermination(2)));
    }
}
