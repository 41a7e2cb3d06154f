/// Folds a URL or prefix into the form used for prefix comparison
///
/// The value is lowercased and every trailing slash is removed, so
/// `"HTTPS://Links.Modpro.Blog/"` and `"https://links.modpro.blog"` fold to
/// the same string.
pub fn fold_for_match(value: &str) -> String {
    value.to_lowercase().trim_end_matches('/').to_string()
}

/// Checks if an href starts with the given prefix
///
/// Both sides are folded with [`fold_for_match`] first, which makes the
/// comparison case-insensitive and insensitive to trailing slashes. This is
/// prefix matching, not equality: any path below the prefix matches.
///
/// # Examples
///
/// ```
/// use modpro_scraper::url::starts_with_prefix;
///
/// assert!(starts_with_prefix(
///     "HTTPS://EPISODES.MODPRO.BLOG/x/",
///     "https://episodes.modpro.blog/"
/// ));
/// assert!(starts_with_prefix("https://links.modpro.blog", "https://links.modpro.blog/"));
/// assert!(!starts_with_prefix("https://modpro.blog/x", "https://episodes.modpro.blog/"));
/// ```
pub fn starts_with_prefix(href: &str, prefix: &str) -> bool {
    fold_for_match(href).starts_with(&fold_for_match(prefix))
}

/// Checks if an href starts with any of the given prefixes
///
/// # Arguments
///
/// * `href` - The link target to test
/// * `prefixes` - Candidate prefixes, compared with [`starts_with_prefix`]
///
/// # Returns
///
/// * `true` - If at least one prefix matches
/// * `false` - Otherwise, including when `prefixes` is empty
pub fn matches_any_prefix<S: AsRef<str>>(href: &str, prefixes: &[S]) -> bool {
    let folded = fold_for_match(href);
    prefixes
        .iter()
        .any(|prefix| folded.starts_with(&fold_for_match(prefix.as_ref())))
}
