//! Log sanitization: strip identifying data from formatted log lines.
//!
//! Redacts:
//! - Patient ids (`PID-NNNNN`)
//! - Session and record ids (UUIDs)
//! - Email addresses
//! - Phone numbers
//! - `password=...` style pairs
//!
//! Call sites should still avoid logging form contents. This is the
//! fallback for whatever slips through, applied once at the writer.
//!
//! Input is capped (see `VEROLIX_SANITIZE_MAX_BYTES`) so a single huge line
//! cannot stall the logger.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static REDACTIONS: OnceLock<Redactions> = OnceLock::new();

/// Default per-call cap: 16 KiB.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Redaction {
    regex: Regex,
    replacement: &'static str,
}

struct Redactions {
    any: RegexSet,
    rules: Vec<Redaction>,
}

fn clip(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("VEROLIX_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn redactions() -> &'static Redactions {
    REDACTIONS.get_or_init(|| {
        // Order matters: UUIDs contain digit runs the phone rule would eat.
        let table: [(&'static str, &'static str); 5] = [
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            (r"\bPID-\d+\b", "[REDACTED-PID]"),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
            (
                r"(?i)\b(?:password|passwd|pwd)\b\s*[:=]\s*\S+",
                "[REDACTED-SECRET]",
            ),
        ];

        let any = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Redactions { any, rules }
    })
}

/// Replace every identifying pattern in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let redactions = redactions();
    let (prefix, truncated) = clip(input, max_bytes);

    let mut result = prefix.to_string();
    let matched: Vec<usize> = redactions.any.matches(prefix).into_iter().collect();
    for idx in matched {
        let rule = &redactions.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check if a string contains anything `sanitize` would redact.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (prefix, _) = clip(input, max_sanitize_bytes());
    redactions().any.is_match(prefix)
}

/// `MakeWriter` wrapper that sanitizes each formatted line before it
/// reaches the sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by `SanitizingMakeWriter`.
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow us forever.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.pending.len() > hard_cap {
            let all = std::mem::take(&mut self.pending);
            self.emit(&all)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redacts_patient_id() {
        let out = sanitize("Lookup succeeded for PID-48213");
        assert!(out.contains("[REDACTED-PID]"));
        assert!(!out.contains("48213"));
    }

    #[test]
    fn test_redacts_uuid_before_phone() {
        let out = sanitize("record 550e8400-e29b-41d4-a716-446655440000 saved");
        assert_eq!(out, "record [REDACTED-UUID] saved");
    }

    #[test]
    fn test_redacts_email_and_phone() {
        let out = sanitize("jane@clinic.org called from 555-123-4567");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_redacts_password_pair() {
        let out = sanitize("form password=hunter22 submitted");
        assert!(out.contains("[REDACTED-SECRET]"));
        assert!(!out.contains("hunter22"));
    }

    #[test]
    fn test_contains_pii() {
        assert!(contains_pii("PID-10001"));
        assert!(!contains_pii("Starting Verolix..."));
    }

    #[test]
    fn test_truncates_large_inputs() {
        let out = sanitize_with_limit("prefix PID-12345 and more text", 10);
        assert!(out.ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_sanitizes_per_line() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut sink,
                pending: Vec::new(),
            };
            writer.write_all(b"user jane@").expect("Should write");
            writer.write_all(b"clinic.org logged in\n").expect("Should write");
        }
        let text = String::from_utf8(sink).expect("Should be utf8");
        assert_eq!(text, "user [REDACTED-EMAIL] logged in\n");
    }
}
