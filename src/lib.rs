//! Results with error codes, info, messages and cause chains.
//!
//! This crate provides [`okerr::Result<T, E>`][crate::Result], a result type
//! for code that wants to report expected failures as values instead of
//! panicking, and wants those values to say more than "something went
//! wrong".
//!
//!
//! # Ok and Err
//!
//! A [`Result`] is either an [`Ok`] or an [`Err`]:
//!
//! * an [`Ok`] carries the success value and, optionally, a list of
//!   **warnings**: non-fatal problems met while still producing a usable
//!   value;
//! * an [`Err`] carries a **code** that callers branch on, an optional
//!   **info** payload with structured context, an optional **message**, and
//!   an optional **cause**: the `Err` or native error that led to it.
//!
//! `Err` values are immutable. The `with_*` builders return a new `Err` with
//! one part replaced:
//!
//! ```
//! use okerr::{err, ok, Result};
//!
//! #[derive(Debug, PartialEq)]
//! enum Code {
//!     Empty,
//!     TooLong,
//! }
//!
//! fn username(input: &str) -> Result<String, Code, usize> {
//!     if input.is_empty() {
//!         return err(Code::Empty).with_info(0).into();
//!     }
//!     if input.len() > 16 {
//!         return err(Code::TooLong)
//!             .with_info(input.len())
//!             .with_message("usernames are at most 16 bytes")
//!             .into();
//!     }
//!     ok(input.to_string()).into()
//! }
//!
//! let result = username("a-very-long-username");
//! assert!(result.matches_code(Code::TooLong));
//! assert_eq!(result.as_err().map(|e| *e.info()), Some(20));
//! ```
//!
//!
//! # Cause Chains
//!
//! Any `Err` can point at what caused it, either another `Err` (of any code
//! and info type) or a native [`std::error::Error`]. Walking the chain goes
//! from the outermost error down to the root:
//!
//! ```
//! use okerr::err;
//!
//! let io = std::io::Error::from(std::io::ErrorKind::NotFound);
//! let failure = err("LoadConfig").with_cause(err("ReadFile").with_cause(io));
//!
//! for link in failure.cause_chain() {
//!     println!("{}", link);
//! }
//! // LoadConfig
//! // ReadFile
//! // entity not found
//! ```
//!
//! Because an `Err` implements [`std::error::Error`] with
//! [`source`](std::error::Error::source) following the cause, it also works
//! with any reporting tool built on the standard trait.
//!
//!
//! # Telling Errors Apart
//!
//! There are two explicit ways to ask what an `Err` is:
//!
//! * [`Err::matches_code`] compares the code by value. Use it for string
//!   and enum codes.
//! * [`Err::matches_type`] asks for the type of a caught panic payload
//!   ([`Thrown`]) or of a boxed native error.
//!
//!
//! # Panics at the Boundary
//!
//! [`safely`], [`from_throwable`] and their async counterparts run code that
//! may panic and turn the panic into an `Err` whose code is the caught
//! payload. [`from_fallible`] does the same for functions returning a
//! [`std::result::Result`], [`from_fallible_async`] for futures resolving to
//! one, and the [`json`] module does it for
//! [`serde_json`].
//!
//! ```
//! use okerr::{from_throwable, json};
//!
//! let upper = from_throwable(|s: &str| s.to_uppercase());
//! assert_eq!(upper("abc").or_none().as_deref(), Some("ABC"));
//!
//! let parsed = json::parse::<serde_json::Value>("not json");
//! assert!(parsed.is_err());
//! ```
//!
//! In the other direction, [`Result::or_throw`] panics when a failure really
//! is exceptional for the caller.
//!
//!
//! # Logging
//!
//! The crate emits [`tracing`] events at its panic boundaries: a `DEBUG`
//! event whenever a panic is converted into an `Err`, and an `ERROR` event
//! before [`Result::or_throw`] panics. Install any `tracing` subscriber to
//! see them.

pub mod chain;
pub mod error;
pub mod json;
pub mod matching;
pub mod ok;
pub mod result;
pub mod thrown;

#[doc(inline)]
pub use self::{
    chain::{CauseChain, Link},
    error::{err, AnyErr, Cause, Err, ErrOptions},
    matching::Match,
    ok::{ok, Ok},
    result::{Result, Unwrapped},
    thrown::{
        fallible_async, from_fallible, from_fallible_async, from_throwable, from_throwable_async,
        safely, safely_async, Fallible, Safely, Thrown,
    },
};

pub mod prelude {
    pub use crate::error::{err, Err};
    pub use crate::ok::{ok, Ok};
    pub use crate::result::Result;
}

#[cfg(test)]
mod test;
