//! Legacy binary tissue stream.
//!
//! Fields are written back to back in little-endian order with no
//! delimiters. The layout depends on a caller-supplied version:
//!
//! | Field              | Type      | Present when                  |
//! |--------------------|-----------|-------------------------------|
//! | tissue count       | u8 / u16  | u8 for version 0, else u16    |
//! | sentinel           | f32       | version >= 5 (value 1.2345)   |
//! | format version     | u16       | version >= 5                  |
//! | background rgb     | 3 x f32   | always                        |
//! | background opacity | f32       | version >= 5                  |
//! | per tissue rgb     | 3 x f32   | always                        |
//! | per tissue opacity | f32       | version >= 5                  |
//! | name length        | i32       | always                        |
//! | name bytes         | u8 x len  | always, not null-terminated   |
//!
//! Lock flags live in a separate stream of one byte per tissue.
//!
//! On load the first float after the count is sniffed: if it equals the
//! sentinel bit-for-bit the stream is versioned, otherwise the float is the
//! red channel of the background color of an unversioned stream. A version
//! 0 stream whose background red happens to be 1.2345 is misread as
//! versioned; decoding then fails or yields wrong values but never panics.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info, info_span, warn};

use tissue_model::{Catalog, Color, DEFAULT_OPACITY, MAX_NAME_LEN, TissueRecord};

use crate::error::{CodecError, Result};
use crate::options::{BinaryWriterOptions, FORMAT_SENTINEL, OPACITY_VERSION};

/// Layout detected from the first float of a stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamLayout {
    /// No sentinel; the float read is the background red channel.
    Unversioned { background_red: f32 },
    /// Sentinel found, followed by this format version.
    Versioned { version: u16 },
}

impl StreamLayout {
    /// Whether opacity fields follow the color triples.
    pub const fn has_opacity(self) -> bool {
        matches!(self, Self::Versioned { version } if version >= OPACITY_VERSION)
    }
}

/// Read the format sniff step: one float, plus the version when the float
/// is the sentinel.
pub fn sniff_layout<R: Read>(reader: &mut R) -> Result<StreamLayout> {
    let first = read_f32(reader, "format sentinel")?;
    if first.to_bits() == FORMAT_SENTINEL.to_bits() {
        let version = read_u16(reader, "format version")?;
        Ok(StreamLayout::Versioned { version })
    } else {
        Ok(StreamLayout::Unversioned {
            background_red: first,
        })
    }
}

/// Writer for the legacy binary tissue stream.
pub struct BinaryWriter<W: Write> {
    writer: W,
    options: BinaryWriterOptions,
}

impl<W: Write> BinaryWriter<W> {
    /// Create a writer with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, BinaryWriterOptions::default())
    }

    pub fn with_options(writer: W, options: BinaryWriterOptions) -> Self {
        Self { writer, options }
    }

    /// Write the tissue record stream.
    pub fn write_tissues(&mut self, catalog: &Catalog) -> Result<()> {
        let version = self.options.version;
        let count = catalog.count();
        if version == 0 {
            let count = u8::try_from(count).map_err(|_| {
                CodecError::format_violation(format!(
                    "{count} tissues do not fit the one-byte count of version 0"
                ))
            })?;
            self.writer.write_all(&[count])?;
        } else {
            self.writer.write_all(&count.to_le_bytes())?;
        }

        if self.options.writes_opacity() {
            self.write_f32(FORMAT_SENTINEL)?;
            self.writer.write_all(&version.to_le_bytes())?;
        }

        let background = catalog.background();
        self.write_color(background.color)?;
        if self.options.writes_opacity() {
            self.write_f32(background.opacity)?;
        }

        for (id, record) in catalog.iter() {
            self.write_color(record.color)?;
            if self.options.writes_opacity() {
                self.write_f32(record.opacity)?;
            }
            let name = record.name.as_bytes();
            if name.len() > MAX_NAME_LEN {
                return Err(CodecError::NameTooLong {
                    index: usize::from(id),
                    length: name.len() as i64,
                    limit: MAX_NAME_LEN,
                });
            }
            self.writer.write_all(&(name.len() as i32).to_le_bytes())?;
            self.writer.write_all(name)?;
        }

        debug!(count, version, "wrote binary tissue stream");
        Ok(())
    }

    /// Write one lock byte per non-background tissue.
    pub fn write_locks(&mut self, catalog: &Catalog) -> Result<()> {
        let locks: Vec<u8> = catalog
            .iter()
            .map(|(_, record)| u8::from(record.locked))
            .collect();
        self.writer.write_all(&locks)?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.writer.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_color(&mut self, color: Color) -> Result<()> {
        for channel in color.to_array() {
            self.write_f32(channel)?;
        }
        Ok(())
    }
}

/// Reader for the legacy binary tissue stream.
pub struct BinaryReader<R: Read> {
    reader: R,
    stream_version: u16,
}

impl<R: Read> BinaryReader<R> {
    /// Create a reader. `stream_version` only selects the width of the
    /// tissue count (one byte for 0); the opacity layout is sniffed.
    pub fn new(reader: R, stream_version: u16) -> Self {
        Self {
            reader,
            stream_version,
        }
    }

    /// Decode the tissue record stream into a new catalog.
    ///
    /// Lock flags are cleared; read them with [`BinaryReader::read_locks`].
    pub fn read_tissues(&mut self) -> Result<Catalog> {
        let count = if self.stream_version > 0 {
            read_u16(&mut self.reader, "tissue count")?
        } else {
            u16::from(read_u8(&mut self.reader, "tissue count")?)
        };

        let layout = sniff_layout(&mut self.reader)?;
        debug!(count, ?layout, "sniffed binary tissue stream");

        let mut records = Vec::with_capacity(usize::from(count) + 1);
        let red = match layout {
            StreamLayout::Unversioned { background_red } => background_red,
            StreamLayout::Versioned { .. } => read_f32(&mut self.reader, "background color")?,
        };
        let green = read_f32(&mut self.reader, "background color")?;
        let blue = read_f32(&mut self.reader, "background color")?;
        let mut background = TissueRecord::new("", Color::new(red, green, blue));
        if layout.has_opacity() {
            background.opacity = read_f32(&mut self.reader, "background opacity")?;
        }
        records.push(background);

        for index in 1..=usize::from(count) {
            records.push(self.read_record(index, layout)?);
        }

        Ok(Catalog::from_records(records)?)
    }

    fn read_record(&mut self, index: usize, layout: StreamLayout) -> Result<TissueRecord> {
        let color = Color::new(
            read_f32(&mut self.reader, "tissue color")?,
            read_f32(&mut self.reader, "tissue color")?,
            read_f32(&mut self.reader, "tissue color")?,
        );
        let opacity = if layout.has_opacity() {
            read_f32(&mut self.reader, "tissue opacity")?
        } else {
            DEFAULT_OPACITY
        };

        let length = read_i32(&mut self.reader, "name length")?;
        let valid = usize::try_from(length)
            .ok()
            .filter(|&len| len <= MAX_NAME_LEN);
        let Some(length) = valid else {
            return Err(CodecError::NameTooLong {
                index,
                length: i64::from(length),
                limit: MAX_NAME_LEN,
            });
        };
        let mut name = vec![0u8; length];
        self.reader
            .read_exact(&mut name)
            .map_err(|e| CodecError::from_read(e, "tissue name"))?;

        let name = match String::from_utf8(name) {
            Ok(name) => name,
            Err(err) => {
                warn!(index, "tissue name is not valid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        Ok(TissueRecord::new(name, color).with_opacity(opacity))
    }

    /// Apply one lock byte per non-background tissue to `catalog`.
    pub fn read_locks(&mut self, catalog: &mut Catalog) -> Result<()> {
        let mut locks = vec![0u8; usize::from(catalog.count())];
        self.reader
            .read_exact(&mut locks)
            .map_err(|e| CodecError::from_read(e, "lock flags"))?;
        catalog.background_mut().locked = false;
        for (idx, lock) in locks.into_iter().enumerate() {
            catalog.set_locked((idx + 1) as u16, lock != 0)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Write tissues followed by their lock flags to a file.
pub fn write_binary(path: &Path, catalog: &Catalog, options: BinaryWriterOptions) -> Result<()> {
    let _span = info_span!("save_binary", path = %path.display()).entered();
    let file = File::create(path)?;
    let mut writer = BinaryWriter::with_options(BufWriter::new(file), options);
    writer.write_tissues(catalog)?;
    writer.write_locks(catalog)?;
    writer.finish()?;
    info!(count = catalog.count(), "saved binary tissue list");
    Ok(())
}

/// Read tissues followed by their lock flags from a file.
pub fn read_binary(path: &Path, stream_version: u16) -> Result<Catalog> {
    let _span = info_span!("load_binary", path = %path.display()).entered();
    let file = File::open(path).map_err(|e| CodecError::from_open(e, path))?;
    let mut reader = BinaryReader::new(BufReader::new(file), stream_version);
    let mut catalog = reader.read_tissues()?;
    reader.read_locks(&mut catalog)?;
    info!(count = catalog.count(), "loaded binary tissue list");
    Ok(catalog)
}

fn read_array<R: Read, const N: usize>(reader: &mut R, what: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader
        .read_exact(&mut buf)
        .map_err(|e| CodecError::from_read(e, what))?;
    Ok(buf)
}

fn read_u8<R: Read>(reader: &mut R, what: &str) -> Result<u8> {
    let [byte] = read_array::<R, 1>(reader, what)?;
    Ok(byte)
}

fn read_u16<R: Read>(reader: &mut R, what: &str) -> Result<u16> {
    read_array(reader, what).map(u16::from_le_bytes)
}

fn read_i32<R: Read>(reader: &mut R, what: &str) -> Result<i32> {
    read_array(reader, what).map(i32::from_le_bytes)
}

fn read_f32<R: Read>(reader: &mut R, what: &str) -> Result<f32> {
    read_array(reader, what).map(f32::from_le_bytes)
}
