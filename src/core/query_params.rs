use std::collections::HashMap;

/// Parse query parameters from a URI string.
///
/// Handles URL decoding and returns a HashMap of parameter key-value pairs.
/// Multiple values for the same key are not supported (only the last is kept).
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if let Some(query_start) = uri.find('?') {
        let query = &uri[query_start + 1..];
        for param in query.split('&') {
            if let Some(eq_idx) = param.find('=') {
                let key = &param[..eq_idx];
                let encoded_value = &param[eq_idx + 1..];
                let decoded = urlencoding::decode(encoded_value)
                    .unwrap_or(std::borrow::Cow::Borrowed(encoded_value))
                    .to_string();
                params.insert(key.to_string(), decoded);
            } else {
                // Flag parameter without value
                params.insert(param.to_string(), String::new());
            }
        }
    }

    params
}

/// Get a string parameter from parsed query params.
pub fn get_string(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).cloned()
}

/// Get a boolean flag parameter (e.g., ?mine=true)
pub fn get_bool_flag(params: &HashMap<String, String>, key: &str) -> bool {
    params.get(key)
        .map(|v| v == "true")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes_params() {
        let params = parse_query_params("/api/posts?search=algo%20hw&mine=true");
        assert_eq!(get_string(&params, "search").as_deref(), Some("algo hw"));
        assert!(get_bool_flag(&params, "mine"));
        assert!(!get_bool_flag(&params, "myGroups"));
    }

    #[test]
    fn no_query_yields_empty_map() {
        assert!(parse_query_params("/api/posts").is_empty());
    }

    #[test]
    fn bool_flag_requires_literal_true() {
        let params = parse_query_params("/api/deadlines?mine=1");
        assert!(!get_bool_flag(&params, "mine"));
    }
}
