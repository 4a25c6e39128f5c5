//! Placeholder image generation.

use serde::Deserialize;

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 225;
pub const CACHE_CONTROL: &str = "public, max-age=86400";

/// Raw query. Kept as strings so malformed values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceholderQuery {
    pub width: Option<String>,
    pub height: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn from_query(query: &PlaceholderQuery) -> Self {
        Self {
            width: parse_dimension(query.width.as_deref(), DEFAULT_WIDTH),
            height: parse_dimension(query.height.as_deref(), DEFAULT_HEIGHT),
        }
    }
}

/// Leading decimal digits of `raw`.
///
/// Zero, empty, non-numeric, and values above `u32::MAX` (such as
/// `5000000000`) all yield `default` rather than an error or a clamped size.
fn parse_dimension(raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => default,
        Ok(n) => n,
    }
}

#[must_use]
pub fn render_svg(dims: Dimensions) -> String {
    let Dimensions { width, height } = dims;
    format!(
        r##"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg"><rect width="100%" height="100%" fill="#1a1a2e"/><text x="50%" y="50%" font-family="system-ui, sans-serif" font-size="16" fill="#8888aa" text-anchor="middle" dominant-baseline="middle">{width} × {height}</text></svg>"##
    )
}

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod tests;
