/// Splits SPF and DMARC text into terms.
///
/// The evaluator and generator only ever see terms through this trait, so a
/// stricter grammar can replace [`SimpleTokenizer`] without touching them.
pub trait RecordTokenizer: Send + Sync {
    /// Whitespace-delimited SPF terms, in record order.
    fn spf_terms<'a>(&self, record: &'a str) -> Vec<&'a str>;

    /// Semicolon-delimited DMARC tags, trimmed, in record order.
    fn dmarc_tags<'a>(&self, record: &'a str) -> Vec<&'a str>;
}

/// Plain string splitting. Runs of spaces count as one separator and blank
/// segments are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl RecordTokenizer for SimpleTokenizer {
    fn spf_terms<'a>(&self, record: &'a str) -> Vec<&'a str> {
        strip_quotes(record)
            .split(' ')
            .filter(|term| !term.is_empty())
            .collect()
    }

    fn dmarc_tags<'a>(&self, record: &'a str) -> Vec<&'a str> {
        strip_quotes(record)
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// Removes surrounding whitespace and quote characters.
pub fn strip_quotes(record: &str) -> &str {
    record.trim().trim_matches('"').trim()
}
