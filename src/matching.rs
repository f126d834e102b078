//! Code-keyed dispatch over a [`Result`].

use crate::error::Err;
use crate::ok::Ok;
use crate::result::Result;
use crate::thrown::Thrown;

/// Dispatches a [`Result`] to the first handler that accepts it.
///
/// Built by [`Result::matching`]. Arms are tried in the order they are
/// added; the first arm that accepts the result runs immediately and the
/// remaining arms are skipped. [`otherwise`](Match::otherwise) runs the
/// fallback with the original result when no arm accepted it.
///
/// ```
/// use okerr::{err, Result};
///
/// #[derive(Debug, PartialEq)]
/// enum Code {
///     NotFound,
///     Denied,
///     Timeout,
/// }
///
/// fn status(result: Result<String, Code>) -> u16 {
///     result
///         .matching()
///         .ok(|_| 200)
///         .on(Code::NotFound, |_| 404)
///         .on(Code::Denied, |_| 403)
///         .otherwise(|_| 500)
/// }
///
/// assert_eq!(status(err(Code::Denied).into()), 403);
/// assert_eq!(status(err(Code::Timeout).into()), 500);
/// ```
#[must_use = "a `Match` does nothing until `otherwise` is called"]
pub struct Match<T, E, I, W, R> {
    state: State<T, E, I, W, R>,
}

enum State<T, E, I, W, R> {
    Unmatched(Result<T, E, I, W>),
    Matched(R),
}

impl<T, E, I, W, R> Match<T, E, I, W, R> {
    pub(crate) fn new(result: Result<T, E, I, W>) -> Self {
        Self {
            state: State::Unmatched(result),
        }
    }

    /// Handles an `Ok`.
    pub fn ok<F>(self, handler: F) -> Self
    where
        F: FnOnce(Ok<T, W>) -> R,
    {
        let state = match self.state {
            State::Unmatched(Result::Ok(ok)) => State::Matched(handler(ok)),
            other => other,
        };
        Self { state }
    }

    /// Handles an `Err` whose code equals `code`.
    pub fn on<C, F>(self, code: C, handler: F) -> Self
    where
        E: PartialEq<C>,
        F: FnOnce(Err<E, I>) -> R,
    {
        self.on_err_if(|err| err.matches_code(code), handler)
    }

    /// Handles an `Err` for which `accept` returns `true`.
    pub fn on_err_if<P, F>(self, accept: P, handler: F) -> Self
    where
        P: FnOnce(&Err<E, I>) -> bool,
        F: FnOnce(Err<E, I>) -> R,
    {
        let state = match self.state {
            State::Unmatched(Result::Err(err)) => {
                if accept(&err) {
                    State::Matched(handler(err))
                } else {
                    State::Unmatched(Result::Err(err))
                }
            }
            other => other,
        };
        Self { state }
    }

    /// Returns the output of the arm that accepted the result, or runs
    /// `fallback` with the unmatched result.
    pub fn otherwise<F>(self, fallback: F) -> R
    where
        F: FnOnce(Result<T, E, I, W>) -> R,
    {
        match self.state {
            State::Matched(output) => output,
            State::Unmatched(result) => fallback(result),
        }
    }
}

impl<T, I, W, R> Match<T, Thrown, I, W, R> {
    /// Handles a caught panic whose payload is of type `X`.
    pub fn on_type<X: 'static, F>(self, handler: F) -> Self
    where
        F: FnOnce(Err<Thrown, I>) -> R,
    {
        self.on_err_if(|err| err.matches_type::<X>(), handler)
    }
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::err;
    use crate::ok::ok;
    use crate::thrown::safely;
    use crate::test::Probe;
    use std::panic;

    fn describe(result: Result<u8, &'static str>) -> String {
        result
            .matching()
            .ok(|ok| format!("ok {}", ok.value()))
            .on("Missing", |_| "missing".to_string())
            .on("Denied", |err| format!("denied: {}", err.message().unwrap_or("?")))
            .otherwise(|rest| format!("other {:?}", rest.error()))
    }

    #[test]
    fn ok_arm_receives_the_ok() {
        assert_eq!(describe(ok(3).into()), "ok 3");
    }

    #[test]
    fn code_arms_are_tried_in_order() {
        assert_eq!(describe(err("Missing").into()), "missing");
        assert_eq!(
            describe(err("Denied").with_message("no token").into()),
            "denied: no token"
        );
    }

    #[test]
    fn fallback_receives_the_unmatched_result() {
        assert_eq!(describe(err("Broken").into()), "other Some(\"Broken\")");
    }

    #[test]
    fn only_the_first_accepting_arm_runs() {
        let probe = Probe::default();
        let result: Result<u8, &str> = err("Dup").into();

        let output = result
            .matching()
            .on("Dup", |_| {
                probe.hit();
                1
            })
            .on("Dup", |_| {
                probe.hit();
                2
            })
            .otherwise(|_| 0);

        assert_eq!(output, 1);
        assert_eq!(probe.hits(), 1);
    }

    #[test]
    fn on_type_matches_panic_payloads() {
        struct Overflow;

        let result = safely(|| -> u8 { panic::panic_any(Overflow) });
        let output = result
            .matching()
            .on_type::<String, _>(|_| "string")
            .on_type::<Overflow, _>(|_| "overflow")
            .otherwise(|_| "unknown");

        assert_eq!(output, "overflow");
    }
}
