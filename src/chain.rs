//! Defines types for walking cause chains.

use crate::error::{AnyErr, Cause, Err};

use std::error::Error as StdError;
use std::fmt;
use std::iter::FusedIterator;

/*  _     _       _
 * | |   (_)_ __ | | __
 * | |   | | '_ \| |/ /
 * | |___| | | | |   <
 * |_____|_|_| |_|_|\_\
 *  FIGLET: Link
 */

/// One element of a cause chain.
#[derive(Clone, Copy, Debug)]
pub enum Link<'a> {
    /// An [`Err`], with its code and info types erased.
    Err(&'a dyn AnyErr),
    /// A native error. Always the last link of a chain.
    Native(&'a (dyn StdError + Send + Sync + 'static)),
}

impl<'a> Link<'a> {
    /// Returns the code of an `Err` link if it is of type `C`.
    pub fn code<C: 'static>(&self) -> Option<&'a C> {
        match *self {
            Link::Err(err) => err.code_any().downcast_ref(),
            Link::Native(_) => None,
        }
    }

    /// Returns the info of an `Err` link if it is of type `I`.
    pub fn info<I: 'static>(&self) -> Option<&'a I> {
        match *self {
            Link::Err(err) => err.info_any().downcast_ref(),
            Link::Native(_) => None,
        }
    }

    /// Returns the message of an `Err` link.
    pub fn message(&self) -> Option<&'a str> {
        match *self {
            Link::Err(err) => err.message(),
            Link::Native(_) => None,
        }
    }

    /// Returns the concrete `Err` if it has code type `E` and info type `I`.
    pub fn downcast_err<E: 'static, I: 'static>(&self) -> Option<&'a Err<E, I>> {
        match *self {
            Link::Err(err) => err.downcast_ref(),
            Link::Native(_) => None,
        }
    }

    /// Returns the native error if it is of type `X`.
    pub fn downcast_native<X: StdError + 'static>(&self) -> Option<&'a X> {
        match *self {
            Link::Err(_) => None,
            Link::Native(native) => native.downcast_ref(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Link::Native(_))
    }

    /// Returns the link after this one.
    fn next(&self) -> Option<Link<'a>> {
        match *self {
            Link::Err(err) => err.cause().map(Cause::as_link),
            Link::Native(_) => None,
        }
    }
}

/// An `Err` link renders as its code and message, a native link as the
/// native error's own `Display`.
impl fmt::Display for Link<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Err(err) => fmt::Display::fmt(err, f),
            Link::Native(native) => fmt::Display::fmt(native, f),
        }
    }
}

/*   ____                       ____ _           _
 *  / ___|__ _ _   _ ___  ___  / ___| |__   __ _(_)_ __
 * | |   / _` | | | / __|/ _ \| |   | '_ \ / _` | | '_ \
 * | |__| (_| | |_| \__ \  __/| |___| | | | (_| | | | | |
 *  \____\__,_|\__,_|___/\___| \____|_| |_|\__,_|_|_| |_|
 *  FIGLET: CauseChain
 */

/// An iterator over the links of a cause chain, outermost first.
///
/// Returned by [`Err::cause_chain`] and [`Cause::chain`].
#[derive(Clone, Debug)]
pub struct CauseChain<'a> {
    next: Option<Link<'a>>,
}

impl<'a> CauseChain<'a> {
    pub(crate) fn new(head: &'a dyn AnyErr) -> Self {
        Self::from_link(Link::Err(head))
    }

    pub(crate) fn from_link(head: Link<'a>) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for CauseChain<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.next.take()?;
        self.next = link.next();
        Some(link)
    }
}

impl FusedIterator for CauseChain<'_> {}

/// Renders a chain one link per line, numbered from the outermost link.
pub(crate) struct DisplayChain<'a>(pub CauseChain<'a>);

impl fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, link) in self.0.clone().enumerate() {
            write!(f, "\n   {}: {}", index, link)?;
        }

        Ok(())
    }
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */
