//! Memoized page renders.
//!
//! DESIGN
//! ======
//! Static pages are rendered once per key and kept until something
//! invalidates them. Keys are request paths, optionally followed by a
//! `?variant` suffix for renders that differ by visitor (signed in or not).
//! Invalidating a layout drops every entry rendered beneath that layout's
//! root, variants included, since the navigation chrome is shared by all
//! pages below it.
//!
//! The map is guarded by a std `Mutex`; critical sections never span an
//! `.await`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<Mutex<HashMap<String, Arc<str>>>>,
    invalidations: Arc<AtomicU64>,
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached render for `path`, rendering and storing it on miss.
    pub fn get_or_render(&self, path: &str, render: impl FnOnce() -> String) -> Arc<str> {
        let mut pages = self
            .pages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages
            .entry(path.to_owned())
            .or_insert_with(|| Arc::from(render()))
            .clone()
    }

    /// Drop every render at or below `root` (a root of `/` drops everything).
    pub fn invalidate_layout(&self, root: &str) {
        let mut pages = self
            .pages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = pages.len();
        pages.retain(|path, _| !is_under(path, root));
        let dropped = before - pages.len();
        drop(pages);
        let total = self.invalidations.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(%root, dropped, total, "layout cache invalidated");
    }
}

#[cfg(test)]
impl PageCache {
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.pages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of layout invalidations since startup.
    #[must_use]
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}

fn is_under(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return true;
    }
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
}

#[cfg(test)]
#[path = "page_cache_test.rs"]
mod tests;
