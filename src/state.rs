//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the pooled backend transport (session clients themselves are built
//! per request), the page cache, and the few settings handlers consult.

use crate::services::access_code::EmptyCodePolicy;
use crate::services::page_cache::PageCache;
use crate::supabase::{BrowserClient, ServerClient, Transport};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub transport: Transport,
    pub pages: PageCache,
    pub empty_code_policy: EmptyCodePolicy,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(transport: Transport, empty_code_policy: EmptyCodePolicy, cookie_secure: bool) -> Self {
        Self { transport, pages: PageCache::new(), empty_code_policy, cookie_secure }
    }

    /// Fresh request-scoped client carrying the caller's cookies.
    #[must_use]
    pub fn server_client(&self, jar: &axum_extra::extract::cookie::CookieJar) -> ServerClient {
        ServerClient::from_cookies(self.transport.clone(), jar)
    }

    /// Anonymous client for flows that have no session yet.
    #[must_use]
    pub fn browser_client(&self) -> BrowserClient {
        BrowserClient::new(self.transport.clone())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
