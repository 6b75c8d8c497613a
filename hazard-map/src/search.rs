//! Location search. Geocoding is not available, so a search only produces a notice for the user.

/// Notice shown for any non-empty search query.
pub const SEARCH_UNSUPPORTED_NOTICE: &str =
    "Location search requires a geocoding service, which is not configured for this map.";

/// Returns the notice to show for the query, or `None` if there is nothing to search for.
pub fn search(query: &str) -> Option<&'static str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    log::info!("Search for '{query}' requested, but geocoding is not available");
    Some(SEARCH_UNSUPPORTED_NOTICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_does_nothing() {
        assert_eq!(search(""), None);
        assert_eq!(search("   "), None);
    }

    #[test]
    fn query_gets_unsupported_notice() {
        assert_eq!(search("Dumaguete"), Some(SEARCH_UNSUPPORTED_NOTICE));
    }
}
