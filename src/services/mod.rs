//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the action logic so route handlers can stay focused
//! on protocol translation: forms in, cookies and redirects out.

pub mod access_code;
pub mod login;
pub mod navigation;
pub mod page_cache;
pub mod placeholder;
