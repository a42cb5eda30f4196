//! Host extraction for cited-source URLs.

use url::Url;

/// Extract the host from a cited-source URL.
///
/// Inputs without an `http` prefix get `https://` prepended before parsing,
/// so bare hosts like `example.com/path` still resolve. The URL parser
/// lowercases hosts it accepts; one leading `www.` prefix is then stripped.
///
/// Malformed input never fails: the fallback strips a scheme and `www.`
/// prefix manually and cuts at the first `/` or `?`, preserving case.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    let candidate = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    match Url::parse(&candidate) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => strip_www(host).to_string(),
            None => manual_strip(url),
        },
        Err(_) => manual_strip(url),
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Best-effort strip for input the URL parser rejects.
fn manual_strip(url: &str) -> String {
    let cleaned = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let cleaned = strip_www(cleaned);
    let end = cleaned.find(['/', '?']).unwrap_or(cleaned.len());
    cleaned[..end].to_string()
}
