//! Defines a new result type.

use crate::chain::DisplayChain;
use crate::error::Err;
use crate::matching::Match;
use crate::ok::Ok;

use std::convert::Infallible;
use std::fmt;
use std::panic;
use std::process::{ExitCode, Termination};

use tracing::error;

/*  ____                 _ _    _______   _______
 * |  _ \ ___  ___ _   _| | |_ / /_   _| | ____\ \
 * | |_) / _ \/ __| | | | | __/ /  | |   |  _|  \ \
 * |  _ <  __/\__ \ |_| | | |_\ \  | |_  | |___ / /
 * |_| \_\___||___/\__,_|_|\__|\_\ |_( ) |_____/_/
 *                                   |/
 *  FIGLET: Result<T, E>
 */

/// The outcome of a computation: an [`Ok`] or an [`Err`].
///
/// # Type Parameters
///
/// * `T`: the success value.
/// * `E`: the error code, the value callers branch on.
/// * `I`: the info payload carried by the `Err`, `()` by default.
/// * `W`: the type of the warnings carried by the `Ok`. Defaults to an
///   uninhabited `Err`, meaning "this result never has warnings".
///
/// # Discriminating
///
/// Matching on the variant is all it takes to reach the value on one side
/// and the code, info, message and cause on the other:
///
/// ```
/// use okerr::{err, ok, Result};
///
/// fn parse(input: &str) -> Result<u32, &'static str, String> {
///     match input.parse() {
///         std::result::Result::Ok(value) => ok(value).into(),
///         std::result::Result::Err(_) => err("Invalid").with_info(input.to_string()).into(),
///     }
/// }
///
/// match parse("forty") {
///     Result::Ok(ok) => println!("value: {}", ok.value()),
///     Result::Err(err) => {
///         assert!(err.matches_code("Invalid"));
///         println!("could not parse {:?}", err.info());
///     }
/// }
/// ```
///
/// # Consuming
///
/// When a fallback is acceptable, [`or`](Result::or) and
/// [`or_none`](Result::or_none) never fail:
///
/// ```
/// # use okerr::{err, ok, Result};
/// let good: Result<u32, &str> = ok(3).into();
/// let bad: Result<u32, &str> = err("Invalid").into();
///
/// assert_eq!(good.or(0), 3);
/// assert_eq!(bad.clone().or(0), 0);
/// assert_eq!(bad.or_none(), None);
/// ```
///
/// When failure is truly exceptional for the caller,
/// [`or_throw`](Result::or_throw) panics instead.
#[must_use = "this `Result` may be an `Err` variant, which should be handled"]
#[derive(Clone, PartialEq, Debug)]
pub enum Result<T, E, I = (), W = Err<Infallible>> {
    Ok(Ok<T, W>),
    Err(Err<E, I>),
}

/*  _                 _   ____                 _ _
 * (_)_ __ ___  _ __ | | |  _ \ ___  ___ _   _| | |_
 * | | '_ ` _ \| '_ \| | | |_) / _ \/ __| | | | | __|
 * | | | | | | | |_) | | |  _ <  __/\__ \ |_| | | |_
 * |_|_| |_| |_| .__/|_| |_| \_\___||___/\__,_|_|\__|
 *             |_|
 *  FIGLET: impl Result
 */

impl<T, E, I, W> Result<T, E, I, W> {
    /// Returns `true` if the result is [`Ok`].
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Result::Ok(_))
    }

    /// Returns `true` if the result is [`Err`].
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Returns the success value, if any.
    pub fn value(&self) -> Option<&T> {
        self.as_ok().map(Ok::value)
    }

    /// Returns the error code, if any.
    pub fn error(&self) -> Option<&E> {
        self.as_err().map(Err::error)
    }

    /// Returns the warnings of an `Ok`. Always `None` for an `Err`.
    pub fn warnings(&self) -> Option<&[W]> {
        self.as_ok().and_then(Ok::warnings)
    }

    pub fn as_ok(&self) -> Option<&Ok<T, W>> {
        match self {
            Result::Ok(ok) => Some(ok),
            Result::Err(_) => None,
        }
    }

    pub fn as_err(&self) -> Option<&Err<E, I>> {
        match self {
            Result::Ok(_) => None,
            Result::Err(err) => Some(err),
        }
    }

    pub fn into_ok(self) -> Option<Ok<T, W>> {
        match self {
            Result::Ok(ok) => Some(ok),
            Result::Err(_) => None,
        }
    }

    pub fn into_err(self) -> Option<Err<E, I>> {
        match self {
            Result::Ok(_) => None,
            Result::Err(err) => Some(err),
        }
    }

    /// Returns the success value, or `default` if the result is an `Err`.
    #[inline]
    pub fn or(self, default: T) -> T {
        match self {
            Result::Ok(ok) => ok.or(default),
            Result::Err(err) => err.or(default),
        }
    }

    /// Returns the success value, or `None` if the result is an `Err`.
    #[inline]
    pub fn or_none(self) -> Option<T> {
        match self {
            Result::Ok(ok) => ok.or_none(),
            Result::Err(err) => err.or_none(),
        }
    }

    /// Returns `true` if the result is an `Err` whose code equals `code`.
    pub fn matches_code<C>(&self, code: C) -> bool
    where
        E: PartialEq<C>,
    {
        match self {
            Result::Ok(_) => false,
            Result::Err(err) => err.matches_code(code),
        }
    }

    /// Maps the success value, keeping the warnings. An `Err` is returned untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, op: F) -> Result<U, E, I, W> {
        match self {
            Result::Ok(ok) => Result::Ok(ok.map(op)),
            Result::Err(err) => Result::Err(err),
        }
    }

    /// Maps the error code, keeping the info, message and cause.
    pub fn map_code<F, O: FnOnce(E) -> F>(self, op: O) -> Result<T, F, I, W> {
        match self {
            Result::Ok(ok) => Result::Ok(ok),
            Result::Err(err) => Result::Err(err.map_code(op)),
        }
    }

    /// Chains a computation that depends on the success value.
    ///
    /// Warnings of both steps are kept, in order, when the second step
    /// succeeds. When it fails, only its `Err` is returned.
    pub fn and_then<U, F>(self, op: F) -> Result<U, E, I, W>
    where
        F: FnOnce(T) -> Result<U, E, I, W>,
    {
        match self {
            Result::Ok(ok) => {
                let (value, mut warnings) = ok.into_parts();
                match op(value) {
                    Result::Ok(next) => {
                        let (value, later) = next.into_parts();
                        warnings.extend(later);
                        Result::Ok(Ok::with_warnings(value, warnings))
                    }
                    Result::Err(err) => Result::Err(err),
                }
            }
            Result::Err(err) => Result::Err(err),
        }
    }

    /// Converts into a [`std::result::Result`], dropping any warnings.
    pub fn into_std(self) -> std::result::Result<T, Err<E, I>> {
        match self {
            Result::Ok(ok) => std::result::Result::Ok(ok.into_value()),
            Result::Err(err) => std::result::Result::Err(err),
        }
    }

    /// Starts a [`Match`] on this result's code.
    pub fn matching<R>(self) -> Match<T, E, I, W, R> {
        Match::new(self)
    }

    /// Returns the success value, or panics if the result is an `Err`.
    ///
    /// The panic payload is an [`Unwrapped`] error describing the code and
    /// message, so a surrounding [`safely`][crate::safely] catches it as a
    /// [`Thrown`][crate::Thrown] that `matches_type::<Unwrapped>()`.
    #[track_caller]
    pub fn or_throw(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Result::Ok(ok) => ok.into_value(),
            Result::Err(err) => {
                let unwrapped = Unwrapped::from_err(&err);
                error!(code = %unwrapped.code, "`or_throw` called on an `Err`");
                panic::panic_any(unwrapped)
            }
        }
    }
}

impl<T, E, I, W> From<Ok<T, W>> for Result<T, E, I, W> {
    fn from(ok: Ok<T, W>) -> Self {
        Result::Ok(ok)
    }
}

impl<T, E, I, W> From<Err<E, I>> for Result<T, E, I, W> {
    fn from(err: Err<E, I>) -> Self {
        Result::Err(err)
    }
}

/// An `Err(e)` becomes [`Err::primitive(e)`](Err::primitive).
impl<T, E, W> From<std::result::Result<T, E>> for Result<T, E, (), W> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            std::result::Result::Ok(value) => Result::Ok(Ok::new(value)),
            std::result::Result::Err(e) => Result::Err(Err::primitive(e)),
        }
    }
}

/*  _   _                                             _
 * | | | |_ ____      ___ __ __ _ _ __  _ __   ___  __| |
 * | | | | '_ \ \ /\ / / '__/ _` | '_ \| '_ \ / _ \/ _` |
 * | |_| | | | \ V  V /| | | (_| | |_) | |_) |  __/ (_| |
 *  \___/|_| |_|\_/\_/ |_|  \__,_| .__/| .__/ \___|\__,_|
 *                               |_|   |_|
 *  FIGLET: Unwrapped
 */

/// The panic payload of [`Result::or_throw`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("called `or_throw` on an `Err`: {code}")]
pub struct Unwrapped {
    /// The debug rendering of the code.
    pub code: String,
    pub message: Option<String>,
}

impl Unwrapped {
    fn from_err<E: fmt::Debug, I>(err: &Err<E, I>) -> Self {
        Self {
            code: format!("{:?}", err.error()),
            message: err.message().map(str::to_string),
        }
    }
}

/*
  _                 _   _____                   _             _   _
 (_)_ __ ___  _ __ | | |_   _|__ _ __ _ __ ___ (_)_ __   __ _| |_(_) ___  _ __
 | | '_ ` _ \| '_ \| |   | |/ _ \ '__| '_ ` _ \| | '_ \ / _` | __| |/ _ \| '_ \
 | | | | | | | |_) | |   | |  __/ |  | | | | | | | | | | (_| | |_| | (_) | | | |
 |_|_| |_| |_| .__/|_|   |_|\___|_|  |_| |_| |_|_|_| |_|\__,_|\__|_|\___/|_| |_|
             |_|
 FIGLET: impl Termination
*/

/// Lets `main` return a [`Result`]. An `Err` prints its cause chain to stderr.
impl<T, E, I, W> Termination for Result<T, E, I, W>
where
    E: fmt::Debug + Send + Sync + 'static,
    I: fmt::Debug + Send + Sync + 'static,
{
    fn report(self) -> ExitCode {
        match self {
            Result::Ok(_) => ExitCode::SUCCESS,
            Result::Err(err) => {
                eprintln!("{}", report(&err));

                ExitCode::FAILURE
            }
        }
    }
}

fn report<E, I>(err: &Err<E, I>) -> String
where
    E: fmt::Debug + Send + Sync + 'static,
    I: fmt::Debug + Send + Sync + 'static,
{
    format!(
        "Error: {}\n\nCause chain: {}",
        err,
        DisplayChain(err.cause_chain())
    )
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */
