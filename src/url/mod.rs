//! URL handling module for Robots-Lens
//!
//! Reduces the URLs a caller wants to test to the request paths that policy rules
//! are matched against.

use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Base that bare paths are resolved against
const PATH_BASE: &str = "http://localhost/";

/// Reduces a test URL to its request path
///
/// Accepts absolute `http`/`https` URLs as well as bare paths. Only a leading
/// `scheme:` makes a target absolute, so `/go?next=https://a.com/` is a path. The
/// query string and fragment are removed, a relative path gains a leading `/`, and
/// an empty path becomes `/`. Both forms come back percent-encoded the same way, so
/// `/a b` and `https://example.com/a b` reduce to `/a%20b`.
///
/// # Returns
///
/// * `Ok(String)` - The request path
/// * `Err(UrlError)` - The URL is absolute but malformed or uses another scheme
///
/// # Examples
///
/// ```
/// use robots_lens::url::request_path;
///
/// assert_eq!(request_path("https://example.com/a/b?x=1").unwrap(), "/a/b");
/// assert_eq!(request_path("/search#top").unwrap(), "/search");
/// assert_eq!(request_path("https://example.com").unwrap(), "/");
/// assert_eq!(request_path("/proxy/http://a.com").unwrap(), "/proxy/http://a.com");
/// ```
pub fn request_path(target: &str) -> UrlResult<String> {
    let target = target.trim();

    let url = match Url::parse(target) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => url,
        Ok(url) => {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )))
        }
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(PATH_BASE)
            .and_then(|base| base.join(target))
            .map_err(|e| UrlError::Parse(format!("{}: {}", target, e)))?,
        Err(e) => return Err(UrlError::Parse(format!("{}: {}", target, e))),
    };

    Ok(url.path().to_string())
}

/// Percent-encodes a path or rule pattern the way [`request_path`] encodes paths
///
/// `*` and `$` are left alone, as are existing `%XX` escapes, so encoding twice
/// changes nothing. Input without a leading `/` keeps that shape.
///
/// # Examples
///
/// ```
/// use robots_lens::url::encode_path;
///
/// assert_eq!(encode_path("/a b*$"), "/a%20b*$");
/// assert_eq!(encode_path("*.php"), "*.php");
/// ```
pub fn encode_path(pattern: &str) -> String {
    let Ok(mut url) = Url::parse(PATH_BASE) else {
        return pattern.to_string();
    };

    let rooted = pattern.starts_with('/');
    if rooted {
        url.set_path(pattern);
    } else {
        url.set_path(&format!("/{}", pattern));
    }

    let encoded = url.path();
    if rooted {
        encoded.to_string()
    } else {
        encoded.strip_prefix('/').unwrap_or(encoded).to_string()
    }
}

/// Parses a URL that will be requested over the network
///
/// Only `http` and `https` URLs with a host are accepted.
pub fn parse_fetch_url(target: &str) -> UrlResult<Url> {
    let url = Url::parse(target.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(UrlError::Parse(format!("Missing host in URL: {}", target))),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}
