//! URL validation and share-identifier extraction for TeraBox links.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hostnames recognized as TeraBox share domains.
///
/// This list is the only business rule of the service; extending coverage to a
/// new mirror domain means adding an entry here, nothing else.
const SHARE_HOSTS: &[&str] = &[
    r"terabox\.com",
    r"teraboxapp\.com",
    r"1024terabox\.com",
    r"4funbox\.com",
    r"terasharefile\.com",
];

/// Compiled allow-list patterns: `http(s)://`, optional `www.`, host, `/`.
static SHARE_URL_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SHARE_HOSTS
        .iter()
        .map(|host| {
            Regex::new(&format!(r"(?i)^https?://(?:www\.)?{}/", host))
                .expect("Invalid share host pattern")
        })
        .collect()
});

/// Path segment following the `/s/` marker: a run of URL-safe characters.
static PATH_SURL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/s/([a-zA-Z0-9_-]+)").expect("Invalid path surl regex"));

/// A share URL together with its extracted short-link identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// The URL exactly as the caller supplied it.
    pub raw_url: String,
    /// The short-link identifier ("surl"); non-empty by construction.
    pub surl: String,
}

/// Check whether a string is a recognized TeraBox share URL.
///
/// Matches case-insensitively at the start of the string against the fixed
/// allow-list of hostnames, over `http` or `https`, with an optional `www.`
/// subdomain. Empty or malformed input yields `false`; this never fails.
///
/// # Examples
///
/// ```
/// use terabox_relay::url_parser::is_share_url;
///
/// assert!(is_share_url("https://terabox.com/s/abc123"));
/// assert!(is_share_url("https://www.teraboxapp.com/s/abc123"));
/// assert!(!is_share_url("https://google.com"));
/// ```
pub fn is_share_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    SHARE_URL_REGEXES.iter().any(|re| re.is_match(url))
}

/// Extract the share identifier from a TeraBox URL.
///
/// The `surl` query parameter takes precedence over the `/s/<id>` path form
/// when both are present. Returns `None` when the URL cannot be parsed or
/// carries neither form; extraction never panics on malformed input.
///
/// # Examples
///
/// ```
/// use terabox_relay::url_parser::parse_share_link;
///
/// let link = parse_share_link("https://terabox.com/s/test123").unwrap();
/// assert_eq!(link.surl, "test123");
///
/// let link = parse_share_link("https://terabox.com/sharing/link?surl=test456").unwrap();
/// assert_eq!(link.surl, "test456");
/// ```
pub fn parse_share_link(url: &str) -> Option<ShareLink> {
    let parsed = Url::parse(url).ok()?;

    // Query parameter first, path marker second. A URL can carry both; the
    // query form wins.
    let surl = parsed
        .query_pairs()
        .find(|(key, value)| key == "surl" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .or_else(|| {
            PATH_SURL_REGEX
                .captures(parsed.path())
                .and_then(|captures| captures.get(1))
                .map(|id| id.as_str().to_string())
        })?;

    Some(ShareLink {
        raw_url: url.to_string(),
        surl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_share_urls() {
        assert!(is_share_url("https://terabox.com/s/test"));
        assert!(is_share_url("https://www.terabox.com/s/test"));
        assert!(is_share_url("http://teraboxapp.com/s/test"));
        assert!(is_share_url("https://1024terabox.com/s/test"));
        assert!(is_share_url("https://4funbox.com/s/test"));
        assert!(is_share_url("https://terasharefile.com/s/test"));
    }

    #[test]
    fn test_invalid_share_urls() {
        assert!(!is_share_url("https://google.com"));
        assert!(!is_share_url("https://example.com/s/test"));
        assert!(!is_share_url(""));
        assert!(!is_share_url("not a url"));
    }

    #[test]
    fn test_extract_from_path() {
        let link = parse_share_link("https://terabox.com/s/test123").unwrap();
        assert_eq!(link.surl, "test123");
        assert_eq!(link.raw_url, "https://terabox.com/s/test123");
    }

    #[test]
    fn test_extract_from_query() {
        let link = parse_share_link("https://terabox.com/sharing/link?surl=test456").unwrap();
        assert_eq!(link.surl, "test456");
    }

    #[test]
    fn test_query_takes_precedence_over_path() {
        let link = parse_share_link("https://terabox.com/s/pathid?surl=queryid").unwrap();
        assert_eq!(link.surl, "queryid");
    }

    #[test]
    fn test_no_identifier() {
        assert!(parse_share_link("https://terabox.com/about").is_none());
        assert!(parse_share_link("not a url").is_none());
    }
}
