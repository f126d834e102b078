//! Defines the success variant.

use crate::error::Err;

use std::convert::Infallible;
use std::ops::Deref;

/// Construct a new [`Ok`] with the given value and no warnings.
///
/// The result has the default warning type, so it only converts into a
/// [`Result`][crate::Result] that cannot carry warnings. When the warning
/// type matters, use [`Ok::new`] (the warning type is then inferred from the
/// target) or [`Ok::with_warnings`].
///
/// # Example
///
/// ```
/// use okerr::ok;
///
/// let ok = ok(vec![1, 2, 3]);
/// assert_eq!(ok.value(), &[1, 2, 3]);
/// assert!(ok.warnings().is_none());
/// ```
#[inline]
pub fn ok<T>(value: T) -> Ok<T> {
    Ok::new(value)
}

/*   ___  _
 *  / _ \| | __
 * | | | | |/ /
 * | |_| |   <
 *  \___/|_|\_\
 *  FIGLET: Ok
 */

/// The success variant of a [`Result`][crate::Result].
///
/// An `Ok` holds the value produced by a computation, plus an ordered list of
/// non-fatal warnings that were collected while producing it. Warnings are
/// usually [`Err`] values, so that a caller can inspect the same code, info
/// and cause it would get from a hard failure:
///
/// ```
/// use okerr::{err, Err, Ok};
///
/// fn parse_all(lines: &[&str]) -> Ok<Vec<u32>, Err<&'static str, String>> {
///     let mut values = Vec::new();
///     let mut warnings = Vec::new();
///     for line in lines {
///         match line.parse() {
///             std::result::Result::Ok(v) => values.push(v),
///             std::result::Result::Err(_) => {
///                 warnings.push(err("NotANumber").with_info(line.to_string()))
///             }
///         }
///     }
///     Ok::with_warnings(values, warnings)
/// }
///
/// let parsed = parse_all(&["1", "x", "3"]);
/// assert_eq!(parsed.value(), &[1, 3]);
/// assert_eq!(parsed.warnings().unwrap().len(), 1);
/// ```
///
/// An empty warning list is the same as no warnings: [`Ok::warnings`] never
/// returns an empty slice.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Ok<T, W = Err<Infallible>> {
    value: T,
    warnings: Vec<W>,
}

/*  _                 _    ___  _
 * (_)_ __ ___  _ __ | |  / _ \| | __
 * | | '_ ` _ \| '_ \| | | | | | |/ /
 * | | | | | | | |_) | | | |_| |   <
 * |_|_| |_| |_| .__/|_|  \___/|_|\_\
 *             |_|
 *  FIGLET: impl Ok
 */

impl<T, W> Ok<T, W> {
    /// Constructs a new `Ok` without warnings.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Constructs a new `Ok` carrying the given warnings.
    ///
    /// Passing an empty vector is equivalent to [`Ok::new`].
    #[inline]
    pub fn with_warnings(value: T, warnings: Vec<W>) -> Self {
        Self { value, warnings }
    }

    /// Appends one warning, returning the updated `Ok`.
    pub fn warn(mut self, warning: W) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Returns a reference to the success value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the `Ok`, returning the success value and dropping any warnings.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Consumes the `Ok`, returning the success value and its warnings.
    pub fn into_parts(self) -> (T, Vec<W>) {
        (self.value, self.warnings)
    }

    /// Returns the warnings, or `None` if there are none.
    pub fn warnings(&self) -> Option<&[W]> {
        if self.warnings.is_empty() {
            None
        } else {
            Some(&self.warnings)
        }
    }

    /// Returns the success value. The default is never used; it exists so
    /// that `Ok` and [`Err`] can be consumed the same way.
    #[inline]
    pub fn or(self, _default: T) -> T {
        self.value
    }

    /// Returns the success value wrapped in `Some`.
    #[inline]
    pub fn or_none(self) -> Option<T> {
        Some(self.value)
    }

    /// Maps the success value, keeping the warnings.
    pub fn map<U, F: FnOnce(T) -> U>(self, op: F) -> Ok<U, W> {
        Ok {
            value: op(self.value),
            warnings: self.warnings,
        }
    }
}

impl<T, W> Deref for Ok<T, W> {
    type Target = T;

    /// Returns a reference to the success value.
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */
