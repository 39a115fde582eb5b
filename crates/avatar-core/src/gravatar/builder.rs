//! Digest and URL assembly.

use md5::{Digest, Md5};

use super::resolved::ResolvedOptions;

/// Normalize a field value and return its MD5 hex digest.
///
/// The value is trimmed and lower-cased first, so addresses that differ
/// only in case or surrounding whitespace share a digest. Blank input has
/// no digest.
///
/// # Example
/// ```
/// use avatar_core::gravatar::hash_value;
///
/// let digest = hash_value("  Foo@Bar.com ").unwrap();
/// assert_eq!(digest, hash_value("foo@bar.com").unwrap());
/// assert_eq!(digest.len(), 32);
/// assert_eq!(hash_value("   "), None);
/// ```
pub fn hash_value(value: &str) -> Option<String> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    Some(hex::encode(Md5::digest(normalized.as_bytes())))
}

/// Append the digest and query parameters to `base`.
///
/// The first parameter is introduced with `?`, the rest with `&`. The
/// default URL goes last and is not escaped: anything after it would be
/// read by Gravatar as part of the default URL.
pub fn build_url(base: &str, digest: &str, options: &ResolvedOptions) -> String {
    let mut url = String::with_capacity(base.len() + digest.len() + 64);
    url.push_str(base);
    url.push_str(digest);

    for (i, (key, value)) in options.query_pairs().into_iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&value);
    }

    url
}
