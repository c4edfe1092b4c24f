//! Client-side route recognition.
//!
//! Three paths exist: the empty path and `index` land on the list entry
//! point without fetching, and `tasklist/:id` fetches the page named by
//! the path segment. Routing is an explicit ordered table of
//! `(pattern, handler)` pairs scanned in order, rather than a
//! string-keyed method map, so the dispatch surface is enumerable.
//!
//! Note that the `:id` segment of `tasklist/:id` is the page number; the
//! original widget forwards it straight into the refresh and this crate
//! preserves that.
//!
//! # Examples
//!
//! ```rust
//! use tasklist_widget::router::{Route, RouteTable};
//!
//! let table = RouteTable::standard();
//! assert_eq!(table.recognize(""), Some(Route::Index));
//! assert_eq!(table.recognize("tasklist/3"), Some(Route::TaskList { page: 3 }));
//! assert_eq!(table.recognize("settings"), None);
//! ```

/// A recognized route, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The list entry point: wire the widget up, fetch nothing.
    Index,
    /// Fetch and display the given page of tasks.
    TaskList {
        /// The page number extracted from the path.
        page: u64,
    },
}

/// What a matched pattern dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `Controller::index`.
    Index,
    /// `Controller::get_tasks`, fed the `id` capture.
    GetTasks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A URL pattern: literal segments plus `:name` captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern string such as `"tasklist/:id"`.
    ///
    /// The empty string is the empty pattern and matches only the empty
    /// path.
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Matches `path` against this pattern, returning the captured
    /// parameters in pattern order on success.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.push((name.clone(), part.to_string())),
            }
        }
        Some(params)
    }
}

/// The ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(Pattern, Handler)>,
}

impl RouteTable {
    /// The widget's three routes, in match order.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (Pattern::parse(""), Handler::Index),
                (Pattern::parse("index"), Handler::Index),
                (Pattern::parse("tasklist/:id"), Handler::GetTasks),
            ],
        }
    }

    /// The table's entries, in match order.
    pub fn entries(&self) -> &[(Pattern, Handler)] {
        &self.entries
    }

    /// Recognizes `path`, scanning entries in order.
    ///
    /// Leading and trailing slashes and a `#` fragment prefix are
    /// stripped before matching. A `tasklist` entry whose `id` capture is
    /// not a whole number does not match; with no later pattern to fall
    /// through to, such a path yields `None`.
    pub fn recognize(&self, path: &str) -> Option<Route> {
        let path = path.trim_start_matches('#').trim_matches('/');
        for (pattern, handler) in &self.entries {
            let Some(params) = pattern.matches(path) else {
                continue;
            };
            match handler {
                Handler::Index => return Some(Route::Index),
                Handler::GetTasks => {
                    let id = params
                        .iter()
                        .find(|(name, _)| name == "id")
                        .map(|(_, value)| value.as_str())?;
                    if let Ok(page) = id.parse::<u64>() {
                        return Some(Route::TaskList { page });
                    }
                    // Non-numeric id: keep scanning, as if unmatched.
                }
            }
        }
        None
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
