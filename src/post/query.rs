//! Feed query parameters and the pure pieces of query construction.
//!
//! Pagination, LIKE-pattern escaping, and the civil-day window all live
//! here so they can be tested without a database.

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

use crate::datetime::STORAGE_FORMAT;

/// Posts per feed page.
pub const PAGE_SIZE: u32 = 6;

/// Offset of the civil day used for date filtering, in seconds (UTC+8).
pub const FEED_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Parameters for a feed query.
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Literal search term matched against title, content, and author name.
    pub search: Option<String>,
    /// Restrict to posts created on this civil day (UTC+8).
    pub date: Option<NaiveDate>,
    /// 1-based page number. Values below 1 are treated as 1.
    pub page: u32,
    /// When set, restrict to this owner and search only title and content.
    pub owner_id: Option<String>,
}

impl FeedQuery {
    /// Effective page after clamping. There is no upper clamp; pages past
    /// the end simply return no rows.
    pub fn effective_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Row offset of the first row on the effective page.
    pub fn offset(&self) -> i64 {
        (self.effective_page() as i64 - 1) * PAGE_SIZE as i64
    }

    /// Trimmed search term, if non-empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// One page of feed results.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub posts: Vec<super::Post>,
    /// Total rows matching the filters, across all pages.
    pub total: i64,
}

impl FeedPage {
    /// Number of pages, at least 1 even when there are no rows.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total)
    }
}

/// Number of pages needed for `total` rows, at least 1.
pub fn total_pages(total: i64) -> u32 {
    let total = total.max(0) as u64;
    let pages = total.div_ceil(PAGE_SIZE as u64);
    pages.max(1) as u32
}

/// Escape a search term for use in a `LIKE ... ESCAPE '\'` pattern and wrap
/// it in `%`. `%`, `_`, and `\` in the term are matched literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// UTC bounds of the civil day `date` in UTC+8, as a half-open
/// `[start, end)` pair of storage-format strings.
pub fn day_bounds(date: NaiveDate) -> (String, String) {
    let offset = FixedOffset::east_opt(FEED_UTC_OFFSET_SECS).expect("fixed offset in range");
    let start_local = date.and_hms_opt(0, 0, 0).expect("midnight exists");
    let end_local = start_local + chrono::Duration::days(1);

    let to_storage = |local: chrono::NaiveDateTime| {
        offset
            .from_local_datetime(&local)
            .single()
            .expect("fixed offset has no gaps")
            .with_timezone(&Utc)
            .format(STORAGE_FORMAT)
            .to_string()
    };

    (to_storage(start_local), to_storage(end_local))
}
