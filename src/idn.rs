//! IDN / punycode normalization.
//!
//! Rule lookup always runs on the Unicode form of a name; punycode
//! input is decoded before label splitting. Output formatting goes the
//! other way: if the original input was punycode, every non-empty
//! output field is re-encoded to its ASCII-compatible form.

use crate::error::{PslError, Result};

/// ASCII-compatible-encoding prefix reserved by IDNA.
const ACE_PREFIX: &str = "xn--";

/// Whether the original input should be treated as punycode for output
/// formatting.
///
/// This is a whole-input substring search, applied after lowercasing. A
/// Unicode label that coincidentally contains `xn--` therefore
/// misclassifies the input as punycode-origin; given the prefix's
/// reserved role this does not occur in practice, and the behavior is
/// kept as-is.
pub fn is_punycode_origin(input: &str) -> bool {
    input.contains(ACE_PREFIX)
}

/// Convert a domain (or any dot-joined label sequence) to its Unicode
/// form.
pub fn to_unicode(domain: &str) -> Result<String> {
    let (unicode, result) = idna::domain_to_unicode(domain);
    result.map_err(|_| PslError::InvalidIdn(domain.to_string()))?;
    Ok(unicode)
}

/// Convert a domain (or any dot-joined label sequence) to its
/// ASCII-compatible form.
pub fn to_ascii(domain: &str) -> Result<String> {
    idna::domain_to_ascii(domain).map_err(|_| PslError::InvalidIdn(domain.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punycode_detection() {
        assert!(is_punycode_origin("xn--85x722f.xn--55qx5d.cn"));
        assert!(is_punycode_origin("www.xn--fiqs8s"));
        assert!(!is_punycode_origin("食狮.公司.cn"));
        assert!(!is_punycode_origin("www.example.com"));
    }

    #[test]
    fn test_to_unicode() {
        assert_eq!(to_unicode("xn--85x722f.xn--55qx5d.cn").unwrap(), "食狮.公司.cn");
        assert_eq!(to_unicode("xn--fiqs8s").unwrap(), "中国");
        // ASCII passes through untouched
        assert_eq!(to_unicode("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_to_ascii() {
        assert_eq!(to_ascii("食狮.公司.cn").unwrap(), "xn--85x722f.xn--55qx5d.cn");
        assert_eq!(to_ascii("中国").unwrap(), "xn--fiqs8s");
        assert_eq!(to_ascii("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_round_trip() {
        let unicode = "食狮.中国";
        let ascii = to_ascii(unicode).unwrap();
        assert_eq!(to_unicode(&ascii).unwrap(), unicode);
    }

    #[test]
    fn test_partial_domains_convert() {
        // Output fields are partial names (a bare label or a suffix),
        // not full domains; conversion must still work on them.
        assert_eq!(to_ascii("食狮").unwrap(), "xn--85x722f");
        assert_eq!(to_unicode("xn--55qx5d.cn").unwrap(), "公司.cn");
    }
}
