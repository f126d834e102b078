//! Helpers for testing.

use crate::error::Err;
use std::cell::Cell;
use std::fmt;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::err;

    #[test]
    fn probe_counts_hits() {
        let probe = Probe::default();
        probe.hit();
        probe.hit();
        assert_eq!(probe.hits(), 2);
    }

    #[test]
    fn codes_skip_native_links() {
        let outer = err("A").with_cause(err("B").with_cause(std::io::Error::from(
            std::io::ErrorKind::Other,
        )));
        assert_eq!(codes(&outer), ["A", "B"]);
    }
}

/// Counts calls made from inside closures under test.
#[derive(Default)]
pub struct Probe {
    hits: Cell<usize>,
}

impl Probe {
    pub fn hit(&self) {
        self.hits.set(self.hits.get() + 1);
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }
}

/// Returns the string codes of the `Err` links in the cause chain of `err`.
pub fn codes<I>(err: &Err<&'static str, I>) -> Vec<&'static str>
where
    I: fmt::Debug + Send + Sync + 'static,
{
    err.cause_chain()
        .filter_map(|link| link.code::<&'static str>().copied())
        .collect()
}
