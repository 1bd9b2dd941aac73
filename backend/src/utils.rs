use serde_json::Value;
use url::Url;

/// Parse a provider-reported counter (YouTube sends them as strings) to an integer.
/// Missing or non-numeric values count as 0.
pub fn parse_count(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

pub fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reduce user input to the bare handle expected by `channels?forHandle=`.
/// Accepts `name`, `@name` and channel URLs like `https://www.youtube.com/@name/videos`.
pub fn normalize_handle(input: &str) -> String {
    let input = input.trim();

    if let Ok(parsed_url) = Url::parse(input) {
        let is_youtube = parsed_url
            .host_str()
            .is_some_and(|host| host == "youtube.com" || host.ends_with(".youtube.com"));
        if is_youtube {
            if let Some(handle) = parsed_url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .and_then(|segment| segment.strip_prefix('@'))
                .filter(|handle| !handle.is_empty())
            {
                return handle.to_string();
            }
        }
    }

    input.strip_prefix('@').unwrap_or(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_and_numeric_counts() {
        assert_eq!(parse_count(&json!("12345")), 12345);
        assert_eq!(parse_count(&json!(" 42 ")), 42);
        assert_eq!(parse_count(&json!(7)), 7);
    }

    #[test]
    fn invalid_counts_fall_back_to_zero() {
        assert_eq!(parse_count(&json!("n/a")), 0);
        assert_eq!(parse_count(&json!("-5")), 0);
        assert_eq!(parse_count(&json!(null)), 0);
        assert_eq!(parse_count(&json!(1.5)), 0);
        assert_eq!(parse_count(&json!({})), 0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to_two_decimals(11.0), 11.0);
        assert_eq!(round_to_two_decimals(3.14159), 3.14);
        assert_eq!(round_to_two_decimals(2.675_1), 2.68);
    }

    #[test]
    fn normalizes_handles() {
        assert_eq!(normalize_handle("mkbhd"), "mkbhd");
        assert_eq!(normalize_handle("  @mkbhd "), "mkbhd");
        assert_eq!(normalize_handle("https://www.youtube.com/@mkbhd"), "mkbhd");
        assert_eq!(normalize_handle("https://youtube.com/@mkbhd/videos"), "mkbhd");
        assert_eq!(normalize_handle("https://m.youtube.com/@mkbhd?si=abc"), "mkbhd");
    }

    #[test]
    fn leaves_unrelated_urls_untouched() {
        assert_eq!(
            normalize_handle("https://example.com/@someone"),
            "https://example.com/@someone"
        );
    }
}
