//! Client-side name search over an already-fetched list.
//!
//! This never reaches the database: admin screens fetch a full list once
//! and narrow it in memory as the operator types.

/// Anything with a display name that search can match against.
pub trait Named {
    fn name(&self) -> &str;
}

/// Case-insensitive substring match. The query is used as typed; an empty
/// query matches everything.
pub fn matches_name(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Return the items whose name contains `query`, preserving order.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_name(item.name(), query))
        .collect()
}
