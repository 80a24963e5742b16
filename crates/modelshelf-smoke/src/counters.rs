//! Call-counting middleware
//!
//! Scenarios route loader calls through an explicit counters map so the
//! final report shows exactly which accessors ran and how often. The map
//! is passed by reference into each scenario; nothing global is patched.

use std::collections::BTreeMap;
use std::fmt;

/// Per-name call counts for one harness run
#[derive(Debug, Default)]
pub struct CallCounters {
    counts: BTreeMap<&'static str, u64>,
}

impl CallCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one invocation of `name`, then run the call
    pub fn counted<T>(&mut self, name: &'static str, call: impl FnOnce() -> T) -> T {
        *self.counts.entry(name).or_insert(0) += 1;
        call()
    }

    /// How many times `name` was invoked
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Names in the order they report
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counts.iter().map(|(name, count)| (*name, *count))
    }
}

impl fmt::Display for CallCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in &self.counts {
            writeln!(f, "  {} x{}", name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_invocation() {
        let mut counters = CallCounters::new();

        let value = counters.counted("loader", || 7);
        assert_eq!(value, 7);
        counters.counted("loader", || ());
        counters.counted("other", || ());

        assert_eq!(counters.count("loader"), 2);
        assert_eq!(counters.count("other"), 1);
        assert_eq!(counters.count("never_called"), 0);
    }

    #[test]
    fn report_lists_every_name() {
        let mut counters = CallCounters::new();
        counters.counted("b", || ());
        counters.counted("a", || ());

        let names: Vec<_> = counters.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
