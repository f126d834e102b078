//! Adapters that turn panicking code into results.
//!
//! Rust code "throws" by panicking. The adapters in this module run a
//! function (or poll a future) inside [`std::panic::catch_unwind`] and hand
//! back a [`Result`] instead: `Ok` with the normal return value, or an `Err`
//! whose code is the caught panic payload, boxed as a [`Thrown`].
//!
//! ```
//! use okerr::from_throwable;
//!
//! let checked_div = from_throwable(|(a, b): (u32, u32)| a / b);
//!
//! assert_eq!(checked_div((6, 3)).or_none(), Some(2));
//! assert!(checked_div((6, 0)).is_err());
//! ```
//!
//! The panic hook still runs before the panic is caught, so the default hook
//! prints the panic message to stderr as usual.

use crate::ok::ok;
use crate::result::Result;

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::task::{Context, Poll};

use tracing::debug;

/*  _____ _
 * |_   _| |__  _ __ _____      ___ __
 *   | | | '_ \| '__/ _ \ \ /\ / / '_ \
 *   | | | | | | | | (_) \ V  V /| | | |
 *   |_| |_| |_|_|  \___/ \_/\_/ |_| |_|
 *  FIGLET: Thrown
 */

/// The payload of a caught panic.
///
/// A panic can carry any `Send` value. `Thrown` keeps that value exactly as
/// it was thrown; use [`is`](Thrown::is) or [`downcast`](Thrown::downcast)
/// to get at it. Panics raised with `panic!` carry either a `&'static str` or a
/// `String`, depending on how the compiler lowered the format arguments;
/// [`message`](Thrown::message) reads both, so prefer it over downcasting to
/// one of them.
pub struct Thrown {
    // Behind a lock so that `Thrown` is `Sync` and can be shared as a cause.
    payload: Mutex<Box<dyn Any + Send>>,
    message: Option<String>,
}

impl Thrown {
    /// Wraps a value as if it had been thrown with [`std::panic::panic_any`].
    pub fn new<P: Any + Send>(payload: P) -> Self {
        Self::from_panic(Box::new(payload))
    }

    /// Wraps the payload returned by [`std::panic::catch_unwind`].
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            Some((*s).to_string())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Some(s.clone())
        } else {
            payload.downcast_ref::<crate::Unwrapped>().map(ToString::to_string)
        };

        Self {
            payload: Mutex::new(payload),
            message,
        }
    }

    /// Returns the panic message, when the payload was a string.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` if the payload is of type `X`.
    pub fn is<X: Any>(&self) -> bool {
        self.with_payload(|payload| payload.is::<X>())
    }

    /// Calls `op` with a reference to the payload.
    pub fn with_payload<R, F>(&self, op: F) -> R
    where
        F: FnOnce(&(dyn Any + Send)) -> R,
    {
        let payload = self.payload.lock().unwrap_or_else(PoisonError::into_inner);
        op(&**payload)
    }

    /// Returns the payload if it is of type `X`, or gives back `self`.
    pub fn downcast<X: Any>(self) -> std::result::Result<X, Self> {
        let message = self.message;
        let payload = self
            .payload
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        match payload.downcast::<X>() {
            Ok(value) => Ok(*value),
            Err(payload) => Err(Self {
                payload: Mutex::new(payload),
                message,
            }),
        }
    }

    /// Consumes `self`, returning the raw payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Panics again with the original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.into_payload())
    }
}

impl fmt::Debug for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.debug_tuple("Thrown").field(message).finish(),
            None => f.write_str("Thrown(<opaque payload>)"),
        }
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "panicked: {}", message),
            None => f.write_str("panicked with a non-string payload"),
        }
    }
}

impl StdError for Thrown {}

fn caught(payload: Box<dyn Any + Send>) -> Thrown {
    let thrown = Thrown::from_panic(payload);
    debug!(
        payload = thrown.message().unwrap_or("<opaque payload>"),
        "caught a panic, returning Err"
    );
    thrown
}

/*  ____         __      _
 * / ___|  __ _ / _| ___| |_   _
 * \___ \ / _` | |_ / _ \ | | | |
 *  ___) | (_| |  _|  __/ | |_| |
 * |____/ \__,_|_|  \___|_|\__, |
 *                         |___/
 *  FIGLET: Safely
 */

/// Runs `op` once, returning its value as `Ok` or its panic as `Err`.
///
/// ```
/// use okerr::safely;
///
/// let result = safely(|| -> u8 { panic!("no luck") });
/// assert_eq!(result.error().and_then(|e| e.message()), Some("no luck"));
/// ```
pub fn safely<R, F>(op: F) -> Result<R, Thrown>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(op))
        .map_err(caught)
        .into()
}

/// Wraps a function so that it returns a [`Result`] instead of panicking.
///
/// The wrapper calls `op` with exactly the argument it was given, once per
/// call. Pass a tuple to wrap a function of several arguments.
pub fn from_throwable<A, R, F>(op: F) -> impl Fn(A) -> Result<R, Thrown>
where
    F: Fn(A) -> R,
{
    move |arg| safely(|| op(arg))
}

/// Wraps a function that reports failure through [`std::result::Result`].
///
/// An `Err(e)` from `op` becomes [`Err::primitive(e)`][crate::Err::primitive].
/// Panics are not caught; combine with [`safely`] for that.
pub fn from_fallible<A, R, X, F>(op: F) -> impl Fn(A) -> Result<R, X>
where
    F: Fn(A) -> std::result::Result<R, X>,
{
    move |arg| op(arg).into()
}

/// Wraps a future so that it resolves to a [`Result`] instead of panicking.
pub fn safely_async<F: Future>(future: F) -> Safely<F> {
    Safely {
        state: State::Running(Box::pin(future)),
    }
}

/// Wraps a function returning a future, such as an `async fn`.
///
/// A panic while creating the future or while polling it resolves the
/// returned [`Safely`] future to an `Err`.
///
/// ```
/// use okerr::from_throwable_async;
///
/// async fn fetch(id: u32) -> String {
///     if id == 0 {
///         panic!("boom");
///     }
///     format!("item {}", id)
/// }
///
/// let fetch = from_throwable_async(fetch);
/// let result = tokio_test::block_on(fetch(0));
/// assert_eq!(result.error().and_then(|e| e.message()), Some("boom"));
/// ```
pub fn from_throwable_async<A, F, Fut>(op: F) -> impl Fn(A) -> Safely<Fut>
where
    F: Fn(A) -> Fut,
    Fut: Future,
{
    move |arg| match panic::catch_unwind(AssertUnwindSafe(|| op(arg))) {
        Ok(future) => safely_async(future),
        Err(payload) => Safely {
            state: State::Caught(Some(caught(payload))),
        },
    }
}

/// Future returned by [`safely_async`] and [`from_throwable_async`].
///
/// Dropping it abandons the wrapped future; there is no other form of
/// cancellation.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Safely<F> {
    state: State<F>,
}

enum State<F> {
    Running(Pin<Box<F>>),
    Caught(Option<Thrown>),
}

impl<F: Future> Future for Safely<F> {
    type Output = Result<F::Output, Thrown>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            State::Running(inner) => {
                let inner = inner.as_mut();
                match panic::catch_unwind(AssertUnwindSafe(|| inner.poll(cx))) {
                    Ok(Poll::Pending) => Poll::Pending,
                    Ok(Poll::Ready(value)) => Poll::Ready(Result::Ok(ok(value))),
                    Err(payload) => {
                        let thrown = caught(payload);
                        self.state = State::Caught(None);
                        Poll::Ready(Result::Err(crate::Err::primitive(thrown)))
                    }
                }
            }
            State::Caught(thrown) => match thrown.take() {
                Some(thrown) => Poll::Ready(Result::Err(crate::Err::primitive(thrown))),
                None => panic!("`Safely` polled after completion"),
            },
        }
    }
}

/*  _____     _ _ _ _     _
 * |  ___|_ _| | (_) |__ | | ___
 * | |_ / _` | | | | '_ \| |/ _ \
 * |  _| (_| | | | | |_) | |  __/
 * |_|  \__,_|_|_|_|_.__/|_|\___|
 *  FIGLET: Fallible
 */

/// Wraps a future that resolves to a [`std::result::Result`].
///
/// An `Err(e)` output becomes [`Err::primitive(e)`][crate::Err::primitive].
/// Like [`from_fallible`], panics are not caught.
pub fn fallible_async<F, R, X>(future: F) -> Fallible<F>
where
    F: Future<Output = std::result::Result<R, X>>,
{
    Fallible {
        inner: Box::pin(future),
    }
}

/// Wraps a function returning a future of a [`std::result::Result`], such
/// as an `async fn` that reports failure with `Err`.
///
/// ```
/// use okerr::from_fallible_async;
///
/// let load = from_fallible_async(|id: u32| async move {
///     if id == 0 {
///         Err("NoSuchId")
///     } else {
///         Ok(id)
///     }
/// });
/// let result = tokio_test::block_on(load(0));
/// assert!(result.matches_code("NoSuchId"));
/// ```
pub fn from_fallible_async<A, R, X, F, Fut>(op: F) -> impl Fn(A) -> Fallible<Fut>
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = std::result::Result<R, X>>,
{
    move |arg| fallible_async(op(arg))
}

/// Future returned by [`fallible_async`] and [`from_fallible_async`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Fallible<F> {
    inner: Pin<Box<F>>,
}

impl<F, R, X> Future for Fallible<F>
where
    F: Future<Output = std::result::Result<R, X>>,
{
    type Output = Result<R, X>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx).map(Result::from)
    }
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */
