//! The host surface the widget is mounted on.
//!
//! A [`Page`] is the widget's stand-in for the hosting document: a set of
//! named regions whose markup can be replaced wholesale. The controller
//! resolves its view target against the page exactly once and afterwards
//! addresses it through the returned [`RegionHandle`], the same way the
//! original widget caches a selector lookup.
//!
//! Region content is opaque: whatever the server rendered is stored and
//! rendered back verbatim.
//!
//! # Examples
//!
//! ```rust
//! use tasklist_widget::page::Page;
//!
//! let mut page = Page::new().with_region("tasklist_container");
//! let handle = page.resolve("tasklist_container").unwrap();
//!
//! page.replace_html(&handle, "<ul><li>A</li></ul>");
//! assert_eq!(page.html(&handle), "<ul><li>A</li></ul>");
//! ```

/// A handle to a resolved page region.
///
/// Obtained from [`Page::resolve`] and valid for the lifetime of the page.
/// Handles are intentionally cheap to clone; cloning does not count as a
/// new resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHandle(usize);

#[derive(Debug, Clone)]
struct Region {
    selector: String,
    html: String,
}

/// The set of regions the host exposes to the widget.
///
/// The host constructs the page with the regions its layout provides and
/// hands it to the application shell. All mutation goes through handles,
/// so a missing selector surfaces at resolve time rather than on every
/// replacement.
#[derive(Debug, Clone, Default)]
pub struct Page {
    regions: Vec<Region>,
    resolutions: usize,
}

impl Page {
    /// Creates an empty page with no regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region identified by `selector` (builder pattern).
    ///
    /// The region starts empty; its content is whatever the widget last
    /// injected into it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tasklist_widget::page::Page;
    ///
    /// let mut page = Page::new().with_region("tasklist_container");
    /// assert!(page.resolve("tasklist_container").is_some());
    /// ```
    pub fn with_region(mut self, selector: impl Into<String>) -> Self {
        self.regions.push(Region {
            selector: selector.into(),
            html: String::new(),
        });
        self
    }

    /// Looks up the region identified by `selector`.
    ///
    /// Returns `None` when no such region exists, mirroring an empty
    /// selector match in the original widget. Every call counts as one
    /// resolution; see [`Page::resolution_count`].
    pub fn resolve(&mut self, selector: &str) -> Option<RegionHandle> {
        self.resolutions += 1;
        self.regions
            .iter()
            .position(|r| r.selector == selector)
            .map(RegionHandle)
    }

    /// Replaces the region's content with `html`, verbatim.
    pub fn replace_html(&mut self, handle: &RegionHandle, html: impl Into<String>) {
        if let Some(region) = self.regions.get_mut(handle.0) {
            region.html = html.into();
        }
    }

    /// Returns the region's current content.
    ///
    /// Returns an empty string for a stale handle; handles only go stale
    /// if the page they came from is replaced outright.
    pub fn html(&self, handle: &RegionHandle) -> &str {
        self.regions
            .get(handle.0)
            .map(|r| r.html.as_str())
            .unwrap_or("")
    }

    /// Number of selector resolutions performed so far.
    ///
    /// The controller is expected to resolve its view target exactly once
    /// regardless of how many times it is re-entered; this counter makes
    /// that observable.
    pub fn resolution_count(&self) -> usize {
        self.resolutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_selector() {
        let mut page = Page::new().with_region("tasklist_container");
        assert!(page.resolve("tasklist_container").is_some());
        assert_eq!(page.resolution_count(), 1);
    }

    #[test]
    fn test_resolve_unknown_selector() {
        let mut page = Page::new().with_region("tasklist_container");
        assert!(page.resolve("sidebar").is_none());
        // A miss still counts as a resolution attempt.
        assert_eq!(page.resolution_count(), 1);
    }

    #[test]
    fn test_replace_html_is_verbatim() {
        let mut page = Page::new().with_region("tasklist_container");
        let handle = page.resolve("tasklist_container").unwrap();

        page.replace_html(&handle, "<ul><li>A</li></ul>");
        assert_eq!(page.html(&handle), "<ul><li>A</li></ul>");

        // Wholesale replacement, not appending.
        page.replace_html(&handle, "<p>done</p>");
        assert_eq!(page.html(&handle), "<p>done</p>");
    }

    #[test]
    fn test_regions_start_empty() {
        let mut page = Page::new().with_region("tasklist_container");
        let handle = page.resolve("tasklist_container").unwrap();
        assert_eq!(page.html(&handle), "");
    }
}
