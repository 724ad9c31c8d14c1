//! Absolute URL validation and `Location` escaping.

use std::borrow::Cow;

use percent_encoding::{CONTROLS, utf8_percent_encode};
use url::Url;

/// Returns true if `raw` parses as an absolute URL with a host.
///
/// Relative references and scheme-only strings such as `invalid_url` or
/// `mailto:someone` are rejected; the stored value is never rewritten.
pub fn is_absolute_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| url.has_host())
}

/// Percent-escapes non-ASCII and control bytes so a stored URL can be sent
/// in a `Location` header. Printable ASCII passes through untouched, so
/// already-escaped sequences are not escaped twice.
pub fn escape_for_location(raw: &str) -> Cow<'_, str> {
    utf8_percent_encode(raw, CONTROLS).into()
}
