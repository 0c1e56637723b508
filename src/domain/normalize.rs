//! Normalization rules shared by the pipelines: email-to-domain extraction,
//! filesystem-safe file names, and query-template expansion.

use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]").expect("static pattern"));

/// Extract the domain part of an email address, trimmed, unquoted and
/// lowercased. `info@Aetna.com` -> `aetna.com`. Returns `None` for values
/// with no `@` or an empty domain part.
pub fn extract_email_domain(email: &str) -> Option<String> {
    let raw = email.split('@').nth(1)?;
    let domain = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_lowercase();

    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

/// Replace every character that is not alphanumeric, underscore or hyphen
/// with an underscore. Deterministic, so re-runs map a subject to the same
/// result file.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

/// Splice a subject into a query template. Every `{subject}` occurrence is
/// replaced.
pub fn build_query(template: &str, subject: &str) -> String {
    template.replace("{subject}", subject)
}
