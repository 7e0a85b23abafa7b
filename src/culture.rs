//! Culture name validation against a built-in catalog of ISO 639 languages.
//!
//! The catalog approximates the platform's culture list. It knows every
//! ISO 639-1 language and the three-letter languages that commonly ship as
//! cultures, and it rejects unknown or user-assigned regions. It does not
//! check whether a language is actually paired with a region, so `fr-JP`
//! resolves even though no platform ships it.

use std::fmt;

use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// ISO 639-1 two-letter language codes.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da",
    "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz",
    "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja", "jv", "ka", "kg", "ki", "kj",
    "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb", "lg", "li", "ln",
    "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "na", "nb",
    "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or", "os", "pa", "pi",
    "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk",
    "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti",
    "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo",
    "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

/// Three-letter codes for languages without a two-letter code that ship as cultures.
const ISO_639_3: &[&str] = &[
    "agq", "arn", "asa", "ast", "bas", "bem", "bez", "brx", "byn", "ceb", "cgg", "chr", "ckb", "dav",
    "dje", "dsb", "dua", "dyo", "ebu", "ewo", "fil", "fur", "gez", "gsw", "guz", "haw", "hsb", "ibb",
    "jgo", "jmc", "kab", "kam", "kde", "kea", "khq", "kkj", "kln", "kok", "ksb", "ksf", "ksh", "lag",
    "lkt", "lrc", "luo", "luy", "mas", "mer", "mfe", "mgh", "mgo", "mni", "moh", "mua", "mzn", "naq",
    "nds", "nmg", "nnh", "nqo", "nso", "nus", "nyn", "prs", "quc", "qut", "quz", "rof", "rwk", "sah",
    "saq", "sat", "sbp", "seh", "ses", "shi", "sma", "smj", "smn", "sms", "ssy", "syr", "teo", "tig",
    "twq", "tzm", "vai", "vun", "wae", "wal", "xog", "yav", "yue", "zgh",
];

/// A directory name that is not a known culture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{name}\" is not a valid culture name: {reason}")]
pub struct InvalidCultureName {
    pub name: String,
    pub reason: String,
}

/// A validated culture, carrying its canonical name (`en-US`, `zh-Hans`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureDescriptor {
    pub name: String,
}

impl fmt::Display for CultureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Returns true if `language` is in the culture catalog.
pub fn is_known_language(language: &str) -> bool {
    ISO_639_1.contains(&language) || ISO_639_3.contains(&language)
}

/// Returns true for region codes that ISO 3166 leaves to private use or marks
/// unknown. `XK` is private use but ships as a culture region.
fn is_user_assigned_region(region: &str) -> bool {
    match region.as_bytes() {
        [b'A', b'A'] | [b'Z', b'Z'] => true,
        [b'Q', b'M'..=b'Z'] => true,
        [b'X', second] => *second != b'K',
        _ => false,
    }
}

/// Resolves a directory name into a culture.
///
/// The name must parse as a BCP 47 language identifier and its language
/// subtag must be in the catalog. Case is normalized, so `EN-us` resolves
/// to `en-US`.
pub fn resolve_culture(name: &str) -> Result<CultureDescriptor, InvalidCultureName> {
    let invalid = |reason: &str| InvalidCultureName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("empty name"));
    }

    let id: LanguageIdentifier = name
        .parse()
        .map_err(|_| invalid("not a BCP 47 language identifier"))?;

    let language = id.language.as_str();
    if !is_known_language(language) {
        return Err(invalid("unknown language"));
    }
    if let Some(region) = &id.region {
        if is_user_assigned_region(region.as_str()) {
            return Err(invalid("unknown region"));
        }
    }

    Ok(CultureDescriptor {
        name: id.to_string(),
    })
}
