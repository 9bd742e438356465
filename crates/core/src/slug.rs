//! URL slugs for categories and sections.

/// Lowercase `name`, keep ASCII alphanumerics, and join the remaining runs
/// with single hyphens.
///
/// # Examples
///
/// ```
/// use storefront_core::slug::slugify;
/// assert_eq!(slugify("Summer Lawn 2024"), "summer-lawn-2024");
/// assert_eq!(slugify("  Men's  Kurta "), "men-s-kurta");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Use the caller's slug when it is non-blank, otherwise derive one from
/// `name`. Returns `None` when neither yields anything.
pub fn resolve_slug(slug: Option<&str>, name: &str) -> Option<String> {
    match slug.map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            let derived = slugify(name);
            (!derived.is_empty()).then_some(derived)
        }
    }
}
