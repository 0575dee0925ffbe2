//! Text helpers for rendering.

use chrono::{DateTime, Local, TimeZone, Utc};
use url::Url;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped `href` for a dashboard page of one post, e.g. `/dashboard/{id}/edit`.
///
/// The id is percent-encoded as a single path segment.
pub fn post_href(id: &str, action: Option<&str>) -> String {
    let Ok(mut url) = Url::parse("http://localhost/dashboard") else {
        return escape(&format!("/dashboard/{id}"));
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(id);
        if let Some(action) = action {
            segments.push(action);
        }
    }
    escape(url.path())
}

/// Short Japanese date (`2024/3/5`) in the server's local time zone.
pub fn format_date(at: &DateTime<Utc>) -> String {
    format_date_in(at, &Local)
}

pub fn format_date_in<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%Y/%-m/%-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("はじめての投稿"), "はじめての投稿");
    }

    #[test]
    fn test_post_href_encodes_id_segment() {
        assert_eq!(post_href("12", None), "/dashboard/12");
        assert_eq!(post_href("12", Some("edit")), "/dashboard/12/edit");
        assert_eq!(post_href("a/b?c#d", Some("delete")), "/dashboard/a%2Fb%3Fc%23d/delete");
        assert_eq!(post_href("x y", None), "/dashboard/x%20y");
    }

    #[test]
    fn test_format_date_without_padding() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(format_date_in(&at, &Utc), "2024/3/5");
    }

    #[test]
    fn test_format_date_uses_given_zone() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_in(&at, &tokyo), "2025/1/1");
    }
}
