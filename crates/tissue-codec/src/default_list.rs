//! Application default tissue list: `name r g b opacity` per line.

use std::io::Write;

use tracing::{debug, warn};

use tissue_model::{Catalog, Color, TISSUES_SIZE_MAX, TissueRecord};

use crate::error::Result;

/// Write one line per tissue; spaces in names become underscores.
pub fn write_default_list<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<()> {
    for (_, record) in catalog.iter() {
        let Color { r, g, b } = record.color;
        writeln!(
            writer,
            "{} {r:.6} {g:.6} {b:.6} {:.6}",
            record.name.replace(' ', "_"),
            record.opacity
        )?;
    }
    Ok(())
}

/// Parse a default list into a catalog with a fresh background.
///
/// Fields are read five at a time until a group fails to parse or the
/// input ends; anything after that is ignored.
pub fn parse_default_list(text: &str) -> Result<Catalog> {
    let mut records = vec![TissueRecord::default()];
    let mut tokens = text.split_whitespace();

    while let Some(record) = next_record(&mut tokens) {
        if records.len() > usize::from(TISSUES_SIZE_MAX) {
            warn!(limit = TISSUES_SIZE_MAX, "default tissue list truncated");
            break;
        }
        records.push(record);
    }

    debug!(count = records.len() - 1, "parsed default tissue list");
    Ok(Catalog::from_records(records)?)
}

fn next_record<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<TissueRecord> {
    let name = tokens.next()?;
    let mut value = || tokens.next().and_then(|token| token.parse::<f32>().ok());
    let color = Color::new(value()?, value()?, value()?);
    let opacity = value()?;
    Some(TissueRecord::new(name, color).with_opacity(opacity))
}
