//! Defines the failure variant and its causes.

use crate::chain::{CauseChain, Link};
use crate::thrown::Thrown;

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Construct a new [`Err`] with the given code and nothing else.
///
/// # Example
///
/// ```
/// use okerr::err;
///
/// let err = err("NotFound").with_message("no such user");
/// assert!(err.matches_code("NotFound"));
/// assert_eq!(err.message(), Some("no such user"));
/// ```
#[inline]
pub fn err<E>(code: E) -> Err<E> {
    Err::new(code)
}

/// Optional parts of an [`Err`], for constructing one in a single call.
///
/// ```
/// use okerr::{err, Err, ErrOptions};
///
/// let err = Err::with_options(
///     "InvalidInput",
///     ErrOptions {
///         info: ("line", 4),
///         message: Some("expected a number".to_string()),
///         cause: Some(err("Parse").into()),
///     },
/// );
/// assert_eq!(err.info(), &("line", 4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ErrOptions<I = ()> {
    pub info: I,
    pub cause: Option<Cause>,
    pub message: Option<String>,
}

/*  _____
 * | ____|_ __ _ __
 * |  _| | '__| '__|
 * | |___| |  | |
 * |_____|_|  |_|
 *  FIGLET: Err
 */

/// The failure variant of a [`Result`][crate::Result].
///
/// An `Err` is made of:
///
/// * a **code** (`E`), the discriminant callers branch on. Usually a
///   `&'static str` or a fieldless enum, but any value works, including a
///   caught panic ([`Thrown`]) or a native [`std::error::Error`];
/// * an **info** payload (`I`) with structured context, `()` when absent;
/// * an optional human-readable **message**;
/// * an optional [`Cause`]: the `Err` or native error that led to this one.
///
/// `Err` values are never changed in place. The `with_*` builders consume
/// the receiver and hand back a new `Err` with one part replaced, so an `Err`
/// that has been shared (or cloned) stays exactly as it was.
///
/// # Example
///
/// ```
/// use okerr::{err, Err};
///
/// #[derive(Debug, PartialEq)]
/// enum Code {
///     NotFound,
///     Denied,
/// }
///
/// fn open(path: &str) -> Err<Code, String> {
///     err(Code::NotFound)
///         .with_info(path.to_string())
///         .with_message("file does not exist")
///         .with_cause(err("ENOENT"))
/// }
///
/// let err = open("/tmp/x");
/// assert!(err.matches_code(Code::NotFound));
/// assert!(!err.matches_code(Code::Denied));
/// assert_eq!(err.info(), "/tmp/x");
/// assert_eq!(err.cause_chain().count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Err<E, I = ()> {
    error: E,
    info: I,
    message: Option<String>,
    cause: Option<Cause>,
}

/*  _                 _   _____
 * (_)_ __ ___  _ __ | | | ____|_ __ _ __
 * | | '_ ` _ \| '_ \| | |  _| | '__| '__|
 * | | | | | | | |_) | | | |___| |  | |
 * |_|_| |_| |_| .__/|_| |_____|_|  |_|
 *             |_|
 *  FIGLET: impl Err
 */

impl<E> Err<E> {
    /// Constructs a new `Err` with the given code, no info, no message and no cause.
    #[inline]
    pub fn new(code: E) -> Self {
        Self {
            error: code,
            info: (),
            message: None,
            cause: None,
        }
    }

    /// Constructs a new `Err` from any raw value, such as a caught panic
    /// payload or an error returned by a foreign API.
    ///
    /// This is the constructor used at the boundary with code that does not
    /// speak `okerr`; see [`safely`][crate::safely] and
    /// [`from_fallible`][crate::from_fallible].
    #[inline]
    pub fn primitive(value: E) -> Self {
        Self::new(value)
    }
}

impl<E, I> Err<E, I> {
    /// Constructs a new `Err` with the given code and optional parts.
    pub fn with_options(code: E, options: ErrOptions<I>) -> Self {
        Self {
            error: code,
            info: options.info,
            message: options.message,
            cause: options.cause,
        }
    }

    /// Returns the code.
    #[inline]
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Returns the info payload.
    #[inline]
    pub fn info(&self) -> &I {
        &self.info
    }

    /// Returns the message, if one was set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the cause, if one was set.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Consumes the `Err`, returning its code and the remaining parts.
    pub fn into_parts(self) -> (E, ErrOptions<I>) {
        let options = ErrOptions {
            info: self.info,
            cause: self.cause,
            message: self.message,
        };
        (self.error, options)
    }

    /// Returns a new `Err` with the same code, message and cause, and the given info.
    ///
    /// The info type does not have to match the previous one.
    pub fn with_info<J>(self, info: J) -> Err<E, J> {
        Err {
            error: self.error,
            info,
            message: self.message,
            cause: self.cause,
        }
    }

    /// Returns a new `Err` with the same code, info and message, and the given cause.
    pub fn with_cause<C: Into<Cause>>(self, cause: C) -> Self {
        Self {
            cause: Some(cause.into()),
            ..self
        }
    }

    /// Returns a new `Err` with the same code, info and message, and no cause.
    pub fn without_cause(self) -> Self {
        Self {
            cause: None,
            ..self
        }
    }

    /// Returns a new `Err` with the same code, info and cause, and the given message.
    pub fn with_message<M: Into<String>>(self, message: M) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Returns a new `Err` whose code is `op` applied to this code.
    pub fn map_code<F, O: FnOnce(E) -> F>(self, op: O) -> Err<F, I> {
        Err {
            error: op(self.error),
            info: self.info,
            message: self.message,
            cause: self.cause,
        }
    }

    /// Returns `default`. An `Err` has no value of its own.
    #[inline]
    pub fn or<T>(self, default: T) -> T {
        default
    }

    /// Returns `None`. An `Err` has no value of its own.
    #[inline]
    pub fn or_none<T>(self) -> Option<T> {
        None
    }

    /// Returns `true` if the code equals `code`.
    ///
    /// This compares values, so it is the check to use for string and enum
    /// codes. Use [`matches_type`](Err::matches_type) to ask what kind of
    /// native value was caught.
    pub fn matches_code<C>(&self, code: C) -> bool
    where
        E: PartialEq<C>,
    {
        self.error == code
    }
}

impl<E, I> Err<E, I>
where
    E: fmt::Debug + Send + Sync + 'static,
    I: fmt::Debug + Send + Sync + 'static,
{
    /// Walks the cause chain, starting with this `Err`.
    ///
    /// The walk follows [`Cause::Err`] links and stops after the first
    /// [`Cause::Native`] error, or when an `Err` has no cause.
    pub fn cause_chain(&self) -> CauseChain<'_> {
        CauseChain::new(self)
    }

    /// Maps every link of the cause chain through `op`, in order.
    ///
    /// ```
    /// use okerr::err;
    ///
    /// let err = err("A").with_cause(err("B").with_cause(err("C")));
    /// let codes = err.cause_chain_map(|link| link.code::<&str>().copied());
    /// assert_eq!(codes, [Some("A"), Some("B"), Some("C")]);
    /// ```
    pub fn cause_chain_map<R, F: FnMut(Link<'_>) -> R>(&self, op: F) -> Vec<R> {
        self.cause_chain().map(op).collect()
    }

    /// Renders every link of the cause chain with its `Display` form.
    pub fn cause_chain_strings(&self) -> Vec<String> {
        self.cause_chain_map(|link| link.to_string())
    }
}

impl<I> Err<Thrown, I> {
    /// Returns `true` if the caught panic payload is of type `X`.
    pub fn matches_type<X: Any>(&self) -> bool {
        self.error.is::<X>()
    }
}

impl<I> Err<Box<dyn StdError + Send + Sync>, I> {
    /// Returns `true` if the wrapped native error is of type `X`.
    pub fn matches_type<X: StdError + 'static>(&self) -> bool {
        self.error.is::<X>()
    }
}

impl<E: PartialEq, I: PartialEq> PartialEq for Err<E, I> {
    fn eq(&self, other: &Self) -> bool {
        self.error == other.error
            && self.info == other.info
            && self.message == other.message
            && self.cause == other.cause
    }
}

/// String codes are written as-is, any other code with its `Debug` form.
impl<E: fmt::Debug + 'static, I> fmt::Display for Err<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code: &dyn Any = &self.error;
        if let Some(text) = code.downcast_ref::<&'static str>() {
            f.write_str(text)?;
        } else if let Some(text) = code.downcast_ref::<String>() {
            f.write_str(text)?;
        } else {
            write!(f, "{:?}", self.error)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug + 'static, I: fmt::Debug> StdError for Err<E, I> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(Cause::as_error)
    }
}

/*     _                _____
 *    / \   _ __  _   _| ____|_ __ _ __
 *   / _ \ | '_ \| | | |  _| | '__| '__|
 *  / ___ \| | | | |_| | |___| |  | |
 * /_/   \_\_| |_|\__, |_____|_|  |_|
 *                |___/
 *  FIGLET: AnyErr
 */

/// A type-erased view of an [`Err`], used for the links of a cause chain.
///
/// Every `Err<E, I>` whose code and info are `Debug + Send + Sync + 'static`
/// implements this trait. Downcast with [`downcast_ref`](#method.downcast_ref)
/// to get the concrete `Err` back.
pub trait AnyErr: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Returns the code, for debug rendering.
    fn code(&self) -> &dyn fmt::Debug;

    /// Returns the code, for downcasting.
    fn code_any(&self) -> &dyn Any;

    /// Returns the info payload, for debug rendering.
    fn info(&self) -> &dyn fmt::Debug;

    /// Returns the info payload, for downcasting.
    fn info_any(&self) -> &dyn Any;

    fn message(&self) -> Option<&str>;

    fn cause(&self) -> Option<&Cause>;

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static);

    fn as_any(&self) -> &dyn Any;
}

impl<E, I> AnyErr for Err<E, I>
where
    E: fmt::Debug + Send + Sync + 'static,
    I: fmt::Debug + Send + Sync + 'static,
{
    fn code(&self) -> &dyn fmt::Debug {
        &self.error
    }

    fn code_any(&self) -> &dyn Any {
        &self.error
    }

    fn info(&self) -> &dyn fmt::Debug {
        &self.info
    }

    fn info_any(&self) -> &dyn Any {
        &self.info
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn AnyErr {
    /// Returns the concrete `Err` if it has code type `E` and info type `I`.
    pub fn downcast_ref<E: 'static, I: 'static>(&self) -> Option<&Err<E, I>> {
        self.as_any().downcast_ref()
    }

    /// Returns `true` if the code is of type `C` and equals `code`.
    pub fn matches_code<C: PartialEq + 'static>(&self, code: &C) -> bool {
        self.code_any().downcast_ref::<C>() == Some(code)
    }
}

/*   ____
 *  / ___|__ _ _   _ ___  ___
 * | |   / _` | | | / __|/ _ \
 * | |__| (_| | |_| \__ \  __/
 *  \____\__,_|\__,_|___/\___|
 *  FIGLET: Cause
 */

/// What led to an [`Err`]: either another `Err` or a native error.
///
/// Causes are reference counted, so cloning an `Err` never copies its chain.
/// Use [`Cause::native`] to wrap any [`std::error::Error`], or `.into()` on
/// an `Err`.
#[derive(Clone, Debug)]
pub enum Cause {
    Err(Arc<dyn AnyErr>),
    Native(Arc<dyn StdError + Send + Sync>),
}

impl Cause {
    /// Wraps a native error as a cause.
    pub fn native<X: StdError + Send + Sync + 'static>(error: X) -> Self {
        Cause::Native(Arc::new(error))
    }

    /// Returns this cause as the first link of its own chain.
    pub fn as_link(&self) -> Link<'_> {
        match self {
            Cause::Err(err) => Link::Err(err.as_ref()),
            Cause::Native(native) => Link::Native(native.as_ref()),
        }
    }

    /// Returns this cause as a [`std::error::Error`].
    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        match self {
            Cause::Err(err) => err.as_error(),
            Cause::Native(native) => native.as_ref(),
        }
    }

    /// Walks the chain starting at this cause.
    pub fn chain(&self) -> CauseChain<'_> {
        CauseChain::from_link(self.as_link())
    }
}

/// Two causes are equal when they share the same allocation.
impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cause::Err(a), Cause::Err(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            (Cause::Native(a), Cause::Native(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

impl<E, I> From<Err<E, I>> for Cause
where
    E: fmt::Debug + Send + Sync + 'static,
    I: fmt::Debug + Send + Sync + 'static,
{
    fn from(err: Err<E, I>) -> Self {
        Cause::Err(Arc::new(err))
    }
}

impl From<Thrown> for Cause {
    fn from(thrown: Thrown) -> Self {
        Cause::native(thrown)
    }
}

impl From<std::io::Error> for Cause {
    fn from(e: std::io::Error) -> Self {
        Cause::native(e)
    }
}

impl From<serde_json::Error> for Cause {
    fn from(e: serde_json::Error) -> Self {
        Cause::native(e)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Cause {
    fn from(e: Box<dyn StdError + Send + Sync>) -> Self {
        Cause::Native(Arc::from(e))
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
    use std::io;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Code {
        Invalid,
        Missing,
    }

    #[test]
    fn err_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Err<&str, String>>();
        assert_send_sync::<Err<Thrown>>();
        assert_send_sync::<Cause>();
    }

    #[test]
    fn new_err_has_only_a_code() {
        let err = err("Invalid");
        assert_eq!(*err.error(), "Invalid");
        assert_eq!(err.info(), &());
        assert_eq!(err.message(), None);
        assert!(err.cause().is_none());
    }

    #[test]
    fn primitive_keeps_the_raw_value() {
        let err = Err::primitive(io::Error::new(io::ErrorKind::Other, "disk"));
        assert_eq!(err.error().kind(), io::ErrorKind::Other);
        assert_eq!(err.error().to_string(), "disk");
    }

    #[test]
    fn with_options_sets_every_part() {
        let err = Err::with_options(
            Code::Invalid,
            ErrOptions {
                info: 7u8,
                cause: Some(err("Inner").into()),
                message: Some("bad".to_string()),
            },
        );
        assert_eq!(err.info(), &7);
        assert_eq!(err.message(), Some("bad"));
        assert!(err.cause().is_some());
    }

    #[test]
    fn builders_leave_the_original_untouched() {
        let original = err(Code::Invalid).with_message("first");

        let with_info = original.clone().with_info(vec![1, 2]);
        assert_eq!(with_info.error(), original.error());
        assert_eq!(with_info.message(), Some("first"));
        assert_eq!(with_info.info(), &[1, 2]);

        let with_message = original.clone().with_message("second");
        assert_eq!(with_message.error(), original.error());
        assert_eq!(with_message.message(), Some("second"));

        let with_cause = original.clone().with_cause(err(Code::Missing));
        assert_eq!(with_cause.error(), original.error());
        assert!(with_cause.cause().is_some());

        assert_eq!(original.message(), Some("first"));
        assert!(original.cause().is_none());
    }

    #[test]
    fn info_type_can_change_between_calls() {
        let err = err("Invalid").with_info(1u32).with_info("now a string");
        assert_eq!(*err.info(), "now a string");
    }

    #[test]
    fn without_cause_clears_the_cause() {
        let err = err("Outer").with_cause(err("Inner")).without_cause();
        assert!(err.cause().is_none());
        assert_eq!(err.cause_chain().count(), 1);
    }

    #[test]
    fn or_always_returns_the_default() {
        assert_eq!(err("Invalid").or(5), 5);
        assert_eq!(err("Invalid").or_none::<u8>(), None);
    }

    #[test]
    fn matches_code_compares_values() {
        assert!(err("FOO").matches_code("FOO"));
        assert!(!err("FOO").matches_code("BAR"));
        assert!(err(String::from("FOO")).matches_code("FOO"));
        assert!(err(Code::Missing).matches_code(Code::Missing));
        assert!(!err(Code::Missing).matches_code(Code::Invalid));
    }

    #[test]
    fn matches_type_checks_thrown_payloads() {
        let err = Err::primitive(Thrown::new(io::Error::new(io::ErrorKind::Other, "x")));
        assert!(err.matches_type::<io::Error>());
        assert!(!err.matches_type::<std::fmt::Error>());
    }

    #[test]
    fn matches_type_checks_boxed_native_errors() {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(std::fmt::Error);
        let err = Err::primitive(boxed);
        assert!(err.matches_type::<std::fmt::Error>());
        assert!(!err.matches_type::<io::Error>());
    }

    #[test]
    fn map_code_keeps_the_other_parts() {
        let err = err("Invalid")
            .with_info(3)
            .with_message("m")
            .map_code(|_| Code::Invalid);
        assert_eq!(err.error(), &Code::Invalid);
        assert_eq!(err.info(), &3);
        assert_eq!(err.message(), Some("m"));
    }

    #[test]
    fn display_shows_code_and_message() {
        assert_eq!(err(Code::Invalid).to_string(), "Invalid");
        assert_eq!(
            err(Code::Invalid).with_message("bad input").to_string(),
            "Invalid: bad input"
        );
    }

    #[test]
    fn display_writes_string_codes_without_quotes() {
        assert_eq!(err("NotFound").to_string(), "NotFound");
        assert_eq!(
            err(String::from("NotFound")).with_message("gone").to_string(),
            "NotFound: gone"
        );
        assert_eq!(err(404u16).to_string(), "404");
    }

    #[test]
    fn source_follows_the_cause() {
        let native = err("Outer").with_cause(Cause::native(std::fmt::Error));
        let source = native.source().unwrap();
        assert!(source.is::<std::fmt::Error>());

        let nested = err("Outer").with_cause(err("Inner").with_message("deep"));
        assert_eq!(nested.source().unwrap().to_string(), "Inner: deep");
    }

    #[test]
    fn clones_share_the_same_cause() {
        let outer = err("Outer").with_cause(err("Inner"));
        let copy = outer.clone();
        assert_eq!(outer.cause(), copy.cause());
        assert_eq!(outer, copy);

        let other = outer.clone().with_cause(err("Inner"));
        assert_ne!(outer.cause(), other.cause());
    }

    #[test]
    fn erased_err_downcasts_to_the_concrete_type() {
        let cause: Cause = err(Code::Missing).with_info(9u16).into();
        let erased = match &cause {
            Cause::Err(erased) => erased.as_ref(),
            Cause::Native(_) => panic!("expected an Err cause"),
        };
        assert!(erased.matches_code(&Code::Missing));
        assert!(!erased.matches_code(&"Missing"));
        assert_eq!(format!("{:?}", erased.code()), "Missing");
        assert_eq!(format!("{:?}", erased.info()), "9");

        let concrete = erased.downcast_ref::<Code, u16>().unwrap();
        assert_eq!(concrete.info(), &9);
        assert!(erased.downcast_ref::<Code, ()>().is_none());
    }
}
