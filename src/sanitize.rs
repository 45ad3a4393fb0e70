//! Filename sanitization for artifact names.
//!
//! Every artifact name (`{base}_bundle.zip`, `{base}_compressed.pdf`,
//! archive entries) derives from the caller-supplied document name, which
//! may be arbitrary user input. One deterministic pass makes it safe as a
//! path component on the common filesystems.

/// Characters replaced with `_`: path separators, wildcards, quotes,
/// angle brackets, pipe, and their full-width forms.
const FORBIDDEN: &[char] = &[
    '\\', '/', ':', '*', '?', '"', '<', '>', '|', // ASCII
    '＼', '／', '：', '＊', '？', '＂', '＜', '＞', '｜', // full-width
];

/// Maximum length of a sanitized base name, in characters.
///
/// Keeps `{base}_compressed.pdf` comfortably inside common path limits.
const MAX_BASE_NAME_CHARS: usize = 100;

/// Make a document name safe as a filesystem path component.
///
/// Forbidden characters become `_`, runs of whitespace collapse to a
/// single `_`, and the result is truncated to 100 characters. The
/// transform is deterministic and idempotent, so it can be applied at
/// every artifact-naming site without coordination.
///
/// # Example
/// ```rust
/// assert_eq!(pagepress::sanitize_base_name("Q3  report: draft?"), "Q3_report__draft_");
/// ```
pub fn sanitize_base_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if FORBIDDEN.contains(&ch) {
                out.push('_');
            } else {
                out.push(ch);
            }
        }
    }

    if out.chars().count() > MAX_BASE_NAME_CHARS {
        out = out.chars().take(MAX_BASE_NAME_CHARS).collect();
    }
    out
}
