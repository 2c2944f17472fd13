use std::num::NonZeroU32;

use crate::api::SearchRequest;
use crate::error::{EMPTY_QUERY, INVALID_MAX_CHANNELS, SearchError};

/// Turn raw form input into a [`SearchRequest`].
///
/// The query must contain a non-whitespace character; the channel limit
/// must be a positive integer (surrounding whitespace allowed).
pub fn validate_search(query: &str, max_channels_text: &str) -> Result<SearchRequest, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::Validation(EMPTY_QUERY.to_string()));
    }

    let max_results = max_channels_text
        .trim()
        .parse::<NonZeroU32>()
        .map_err(|_| SearchError::Validation(INVALID_MAX_CHANNELS.to_string()))?;

    Ok(SearchRequest {
        query: query.to_string(),
        max_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let request = validate_search("rust tutorials", " 25 ").unwrap();
        assert_eq!(request.query(), "rust tutorials");
        assert_eq!(request.max_results(), 25);
    }

    #[test]
    fn test_rejects_bad_channel_counts() {
        for text in ["0", "abc", "", "-3", "2.5", "99999999999"] {
            assert_eq!(
                validate_search("rust", text),
                Err(SearchError::Validation(INVALID_MAX_CHANNELS.to_string())),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_rejects_blank_query() {
        assert_eq!(
            validate_search("   ", "5"),
            Err(SearchError::Validation(EMPTY_QUERY.to_string()))
        );
    }
}
