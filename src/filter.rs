//! Query-string builder for collection requests.
//!
//! A [`Filter`] is assembled from an ordered list of [`FilterOption`]s. Each
//! option appends one `key=value` fragment; [`Filter::set`] starts the string
//! with `?` and joins fragments with `&`. New options are plain functions
//! returning a [`FilterOption`]; the builder never changes.
//!
//! # Examples
//!
//! ```
//! use redfish_entity::filter::{with_skip, with_top, Filter};
//!
//! let mut filter = Filter::new();
//! filter.set([with_skip(20), with_top(10)]);
//! assert_eq!(filter.as_str(), "?$skip=20&$top=10");
//!
//! filter.clear();
//! assert_eq!(filter.to_string(), "");
//! ```

use std::fmt;

/// One query fragment appended to a [`Filter`].
pub type FilterOption = Box<dyn Fn(&mut Filter) + Send + Sync>;

/// An optional query string, empty until [`Filter::set`] is called.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    /// An empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query with the given options, in order.
    ///
    /// The result always starts with `?`, even with no options.
    pub fn set<I>(&mut self, opts: I)
    where
        I: IntoIterator<Item = FilterOption>,
    {
        self.0 = "?".to_string();
        for (idx, opt) in opts.into_iter().enumerate() {
            if idx > 0 {
                self.0.push('&');
            }
            opt(self);
        }
    }

    /// Reset to the empty query.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Append a raw fragment. Used by option functions.
    pub fn push(&mut self, fragment: &str) {
        self.0.push_str(fragment);
    }

    /// The query string, `?` included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when nothing was applied or after [`Filter::clear`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Filter {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Skip the first `n` members (`$skip=n`).
pub fn with_skip(n: usize) -> FilterOption {
    Box::new(move |filter: &mut Filter| filter.push(&format!("$skip={}", n)))
}

/// Return at most `n` members (`$top=n`).
pub fn with_top(n: usize) -> FilterOption {
    Box::new(move |filter: &mut Filter| filter.push(&format!("$top={}", n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filter_is_empty() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.to_string(), "");
    }

    #[test]
    fn test_single_option() {
        let mut filter = Filter::new();
        filter.set([with_top(5)]);
        assert_eq!(filter.as_str(), "?$top=5");
    }

    #[test]
    fn test_options_keep_order() {
        let mut filter = Filter::new();
        filter.set([with_top(5), with_skip(10)]);
        assert_eq!(filter.as_str(), "?$top=5&$skip=10");
    }

    #[test]
    fn test_set_replaces_previous_query() {
        let mut filter = Filter::new();
        filter.set([with_skip(1)]);
        filter.set([with_skip(2)]);
        assert_eq!(filter.as_str(), "?$skip=2");
    }

    #[test]
    fn test_custom_option() {
        fn with_expand(levels: u8) -> FilterOption {
            Box::new(move |f: &mut Filter| f.push(&format!("$expand=.($levels={})", levels)))
        }

        let mut filter = Filter::new();
        filter.set([with_expand(1), with_top(2)]);
        assert_eq!(filter.as_ref(), "?$expand=.($levels=1)&$top=2");
    }

    #[test]
    fn test_clear() {
        let mut filter = Filter::new();
        filter.set([with_top(1)]);
        filter.clear();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_no_options_yields_question_mark() {
        let mut filter = Filter::new();
        filter.set(Vec::new());
        assert_eq!(filter.as_str(), "?");
    }
}
