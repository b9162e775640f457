use crate::DomainError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Trims whitespace and a trailing root dot, lowercases.
///
/// Returns `None` for blank input so callers can tell "missing" apart from
/// "malformed".
pub fn normalize_domain(input: &str) -> Option<String> {
    let trimmed = input.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

pub fn validate_domain(domain: &str) -> Result<(), DomainError> {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return Err(DomainError::InvalidDomainName(domain.to_string()));
    }
    if !domain.split('.').all(is_valid_label) {
        return Err(DomainError::InvalidDomainName(domain.to_string()));
    }
    Ok(())
}

pub fn validate_selector(selector: &str) -> Result<(), DomainError> {
    if !selector.split('.').all(is_valid_label) {
        return Err(DomainError::InvalidSelector(selector.to_string()));
    }
    Ok(())
}

// Underscores are allowed: `_dmarc` and `_domainkey` live in the same tree.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
