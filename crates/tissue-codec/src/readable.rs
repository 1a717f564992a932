//! Human-editable tissue list.
//!
//! ```text
//! V5
//! N2
//! C0.929412 0.839216 0.584314 0.500000 Bone
//! C0.984314 0.980392 0.215686 0.500000 Fat
//! ```
//!
//! The `V` line is optional; without it (or below version 5) records carry
//! no opacity column and load with the default opacity. Parsing produces
//! candidate records only; merging them into a live catalog is the job of
//! the reconciliation step.

use std::io::Write;

use tracing::{debug, warn};

use tissue_model::{Catalog, Color, DEFAULT_OPACITY, TISSUES_SIZE_MAX, TissueRecord};

use crate::error::{CodecError, Result};
use crate::options::{OPACITY_VERSION, ReadableWriterOptions};

/// Records parsed from a readable tissue list, background excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadableList {
    pub version: u16,
    pub records: Vec<TissueRecord>,
}

/// Write the readable list for `catalog`.
pub fn write_readable<W: Write>(
    writer: &mut W,
    catalog: &Catalog,
    options: &ReadableWriterOptions,
) -> Result<()> {
    let with_opacity = options.version >= OPACITY_VERSION;
    if with_opacity {
        writeln!(writer, "V{}", options.version)?;
    }
    writeln!(writer, "N{}", catalog.count())?;
    for (_, record) in catalog.iter() {
        let Color { r, g, b } = record.color;
        if with_opacity {
            writeln!(
                writer,
                "C{r:.6} {g:.6} {b:.6} {:.6} {}",
                record.opacity, record.name
            )?;
        } else {
            writeln!(writer, "C{r:.6} {g:.6} {b:.6} {}", record.name)?;
        }
    }
    Ok(())
}

/// Parse a readable list.
///
/// Returns [`CodecError::NotReadableText`] when the count line is absent,
/// so callers can try another format. Any malformed record line fails the
/// whole parse. Counts above the id limit are truncated.
pub fn parse_readable(text: &str) -> Result<ReadableList> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let mut version = 0u16;
    if let Some(value) = lines.peek().and_then(|line| header_value(line, 'V')) {
        version = value.parse().map_err(|_| {
            CodecError::format_violation(format!("invalid version header: V{value}"))
        })?;
        lines.next();
    }

    let count_text = lines
        .next()
        .and_then(|line| header_value(line, 'N'))
        .ok_or(CodecError::NotReadableText)?;
    let declared: u64 = count_text.parse().map_err(|_| CodecError::NotReadableText)?;
    let count = if declared > u64::from(TISSUES_SIZE_MAX) {
        warn!(declared, limit = TISSUES_SIZE_MAX, "tissue count truncated");
        usize::from(TISSUES_SIZE_MAX)
    } else {
        declared as usize
    };

    let with_opacity = version >= OPACITY_VERSION;
    let mut records = Vec::with_capacity(count);
    for index in 1..=count {
        let line = lines.next().ok_or_else(|| {
            CodecError::format_violation(format!(
                "expected {count} tissue lines, found {}",
                index - 1
            ))
        })?;
        records.push(parse_record(line, with_opacity, index)?);
    }

    debug!(version, count = records.len(), "parsed readable tissue list");
    Ok(ReadableList { version, records })
}

/// The digits after a one-letter header such as `V5` or `N12`.
fn header_value(line: &str, tag: char) -> Option<&str> {
    let value = line.strip_prefix(tag)?.trim();
    (!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())).then_some(value)
}

fn parse_record(line: &str, with_opacity: bool, index: usize) -> Result<TissueRecord> {
    let malformed = || CodecError::format_violation(format!("malformed tissue line {index}: {line}"));
    let rest = line.strip_prefix('C').ok_or_else(malformed)?;
    let mut fields = rest.split_whitespace();
    let mut next_float = || -> Result<f32> {
        fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or_else(malformed)
    };

    let color = Color::new(next_float()?, next_float()?, next_float()?);
    let opacity = if with_opacity {
        next_float()?
    } else {
        DEFAULT_OPACITY
    };
    let name = fields.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(malformed());
    }
    Ok(TissueRecord::new(name, color).with_opacity(opacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v5() {
        let list = parse_readable("V5\nN2\nC1.0 0.0 0.0 0.25 Bone\nC0 1 0 1 Fat\n").unwrap();
        assert_eq!(list.version, 5);
        assert_eq!(list.records.len(), 2);
        assert_eq!(list.records[0].name, "Bone");
        assert_eq!(list.records[0].opacity, 0.25);
        assert_eq!(list.records[1].color, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_without_version_has_no_opacity() {
        let list = parse_readable("N1\nC 0.5 0.5 0.5 Skin\n").unwrap();
        assert_eq!(list.version, 0);
        assert_eq!(list.records[0].name, "Skin");
        assert_eq!(list.records[0].opacity, DEFAULT_OPACITY);
    }

    #[test]
    fn test_missing_count_line_is_detection_failure() {
        let err = parse_readable("0\tUnknown\t0\t0\t0\t0\n").unwrap_err();
        assert!(err.is_detection_failure());
    }

    #[test]
    fn test_malformed_line_aborts() {
        let err = parse_readable("V5\nN2\nC1 0 0 0.5 Bone\nC1 0 oops 0.5 Fat\n").unwrap_err();
        assert!(err.is_format_violation());
    }

    #[test]
    fn test_too_few_lines_aborts() {
        let err = parse_readable("N3\nC1 0 0 Bone\n").unwrap_err();
        assert!(err.is_format_violation());
    }

    #[test]
    fn test_missing_name_aborts() {
        assert!(parse_readable("N1\nC1 0 0\n").is_err());
    }

    #[test]
    fn test_write_old_version_omits_header_and_opacity() {
        let mut catalog = Catalog::new();
        catalog
            .add(TissueRecord::new("Bone", Color::new(1.0, 0.5, 0.0)))
            .unwrap();
        let mut out = Vec::new();
        write_readable(&mut out, &catalog, &ReadableWriterOptions::default().with_version(4))
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "N1\nC1.000000 0.500000 0.000000 Bone\n"
        );
    }
}
