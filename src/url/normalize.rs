use crate::UrlError;
use url::Url;

/// Resolves a link against the URL of the page it was found on
///
/// Resolution follows standard URI reference rules, so relative paths,
/// protocol-relative (`//host/path`), query-only (`?q`) and fragment-only
/// (`#x`) references all resolve. An empty fragment is dropped, so `"#"`
/// resolves to the base itself, and a bare root path is serialized without its
/// trailing slash.
///
/// # Arguments
///
/// * `link` - The link as written in the page (absolute or relative)
/// * `base` - The absolute URL of the page the link was found on
///
/// # Returns
///
/// * `Ok(String)` - The absolute URL
/// * `Err(UrlError)` - The base is malformed or the result has no host
///
/// # Examples
///
/// ```
/// use sumi_index::url::resolve_url;
///
/// let url = resolve_url("/test", "http://www.test.com").unwrap();
/// assert_eq!(url, "http://www.test.com/test");
///
/// assert!(resolve_url("mailto:someone@test.com", "http://www.test.com").is_err());
/// ```
pub fn resolve_url(link: &str, base: &str) -> Result<String, UrlError> {
    let base_url = Url::parse(base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    let mut resolved = base_url
        .join(link)
        .map_err(|e| UrlError::Parse(format!("{}: {}", link, e)))?;

    // Schemes such as mailto: and javascript: resolve but never carry a host
    if resolved.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::InvalidUrl(resolved.to_string()));
    }

    if resolved.fragment() == Some("") {
        resolved.set_fragment(None);
    }

    Ok(serialize(resolved))
}

/// Serializes a URL, leaving off the slash of a bare root path
fn serialize(url: Url) -> String {
    let bare_root = url.path() == "/" && url.query().is_none() && url.fragment().is_none();

    let mut serialized: String = url.into();
    if bare_root {
        serialized.pop();
    }
    serialized
}
