//! Warning channel with scoped suppression
//!
//! Loaders occasionally emit warnings about accepted-but-discouraged
//! archive contents. Callers that knowingly load such archives can silence
//! exactly one category for the duration of one call with [`suppress`]; the
//! returned guard re-enables the category when dropped, on every exit path.

use std::cell::RefCell;

/// Categories of warnings the runtime can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Accepted legacy behavior that will be removed in a future release
    Deprecation,
}

impl Category {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Deprecation => "deprecation",
        }
    }
}

thread_local! {
    static SUPPRESSED: RefCell<Vec<Category>> = const { RefCell::new(Vec::new()) };
}

/// Emit a warning unless its category is currently suppressed on this thread
pub fn warn(category: Category, message: &str) {
    if is_suppressed(category) {
        return;
    }
    tracing::warn!(category = category.as_str(), "{}", message);
}

/// Whether the given category is suppressed on the current thread
pub fn is_suppressed(category: Category) -> bool {
    SUPPRESSED.with(|stack| stack.borrow().contains(&category))
}

/// Suppress one warning category until the returned guard is dropped
///
/// Suppression is per-thread and nests: the category stays silenced until
/// every guard holding it has been dropped. Dropping happens during unwind
/// too, so a panicking load cannot leak suppression into the caller.
#[must_use = "suppression ends when the guard is dropped"]
pub fn suppress(category: Category) -> SuppressGuard {
    SUPPRESSED.with(|stack| stack.borrow_mut().push(category));
    SuppressGuard { category }
}

/// Guard returned by [`suppress`]; restores the category on drop
pub struct SuppressGuard {
    category: Category,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        SUPPRESSED.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|c| *c == self.category) {
                stack.remove(pos);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_is_scoped_to_the_guard() {
        assert!(!is_suppressed(Category::Deprecation));
        {
            let _guard = suppress(Category::Deprecation);
            assert!(is_suppressed(Category::Deprecation));
        }
        assert!(!is_suppressed(Category::Deprecation));
    }

    #[test]
    fn nested_guards_release_in_any_order() {
        let outer = suppress(Category::Deprecation);
        let inner = suppress(Category::Deprecation);

        drop(outer);
        assert!(is_suppressed(Category::Deprecation));

        drop(inner);
        assert!(!is_suppressed(Category::Deprecation));
    }

    #[test]
    fn suppression_does_not_leak_past_a_panic() {
        let result = std::panic::catch_unwind(|| {
            let _guard = suppress(Category::Deprecation);
            panic!("load failed");
        });
        assert!(result.is_err());
        assert!(!is_suppressed(Category::Deprecation));
    }

    #[test]
    fn warn_is_a_no_op_while_suppressed() {
        // warn() must not panic either way; the observable contract is the
        // suppression flag itself.
        let _guard = suppress(Category::Deprecation);
        warn(Category::Deprecation, "legacy weights name");
        assert!(is_suppressed(Category::Deprecation));
    }
}
