//! Instance-state persistence.
//!
//! [`Snapshot`] is the serialized form of the field's full state plus the
//! nested collaborator sub-states, captured on lifecycle save and replayed
//! on restore. The wire format is a versioned byte stream: a magic tag and
//! version byte up front, then the fields in a fixed order: little-endian
//! integers, one-byte booleans, length-prefixed UTF-8 strings and
//! presence-byte options. The write and read sequences are symmetric;
//! bumping [`FORMAT_VERSION`] is how the order is allowed to change.
//! Malformed or version-skewed input decodes to an explicit error, never to
//! corrupted in-memory state.

use super::surface::SurfaceState;
use thiserror::Error;
use tracing::debug;

/// Leading magic tag identifying a field snapshot.
pub const MAGIC: &[u8; 4] = b"TFLD";
/// Current wire format version.
pub const FORMAT_VERSION: u8 = 1;

/// Errors produced while decoding a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The input does not start with the snapshot magic tag.
    #[error("not a field snapshot: bad magic tag")]
    BadMagic,
    /// The snapshot was written by an unknown format version.
    #[error("unsupported snapshot format version: {0}")]
    UnsupportedVersion(u8),
    /// The input ended before the declared fields were read.
    #[error("snapshot truncated")]
    UnexpectedEof,
    /// A string field held invalid UTF-8.
    #[error("snapshot string field is not valid UTF-8")]
    InvalidUtf8,
    /// Bytes remained after the last field was read.
    #[error("{0} trailing bytes after snapshot")]
    TrailingBytes(usize),
}

/// The full serializable state of a field.
///
/// Flat primitive fields plus the two nested collaborator states: the
/// editable surface's own state and the chrome's keyed sub-state map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Canonical text content.
    pub value: String,
    /// Hint label.
    pub hint_text: String,
    /// Error message shown when validation fails.
    pub error_text: String,
    /// Trailing decoration text.
    pub suffix_text: String,
    /// Inclusion filter alphabet.
    pub allowed_characters: Option<String>,
    /// Character cap.
    pub max_characters: Option<u64>,
    /// Minimum line count.
    pub min_lines: u32,
    /// Maximum line count.
    pub max_lines: u32,
    /// Single-line layout constraint.
    pub single_line: bool,
    /// Passthrough platform flag set.
    pub input_type: u32,
    /// Passthrough platform flag set.
    pub ime_options: u32,
    /// Passthrough platform flag set.
    pub text_alignment: u32,
    /// Passthrough platform flag set.
    pub text_direction: u32,
    /// Text size passthrough.
    pub text_size: u32,
    /// Visual variant configuration code.
    pub variant_code: i32,
    /// Start icon glyph.
    pub start_icon: Option<String>,
    /// End icon glyph.
    pub end_icon: Option<String>,
    /// Start icon color.
    pub start_icon_color: Option<String>,
    /// End icon color.
    pub end_icon_color: Option<String>,
    /// Box stroke color.
    pub box_stroke_color: Option<String>,
    /// Box stroke width.
    pub box_stroke_width: u32,
    /// Background fill color.
    pub background_color: Option<String>,
    /// End icon visibility.
    pub end_icon_visible: bool,
    /// Character counter row toggle.
    pub character_counter_enabled: bool,
    /// Whether the field accepts input.
    pub enabled: bool,
    /// Whether `validate()` runs the registered checks.
    pub validation_enabled: bool,
    /// Whether the error row is shown.
    pub error_visible: bool,
    /// Whether the field held focus at capture time.
    pub focused: bool,
    /// The editable surface's own sub-state.
    pub surface: SurfaceState,
    /// The chrome's keyed sub-state map.
    pub chrome: Vec<(String, Vec<u8>)>,
}

impl Snapshot {
    /// Encodes the snapshot into its byte form.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.bytes(MAGIC);
        w.u8(FORMAT_VERSION);

        w.string(&self.value);
        w.string(&self.hint_text);
        w.string(&self.error_text);
        w.string(&self.suffix_text);
        w.opt_string(self.allowed_characters.as_deref());
        w.opt_u64(self.max_characters);
        w.u32(self.min_lines);
        w.u32(self.max_lines);
        w.bool(self.single_line);
        w.u32(self.input_type);
        w.u32(self.ime_options);
        w.u32(self.text_alignment);
        w.u32(self.text_direction);
        w.u32(self.text_size);
        w.i32(self.variant_code);
        w.opt_string(self.start_icon.as_deref());
        w.opt_string(self.end_icon.as_deref());
        w.opt_string(self.start_icon_color.as_deref());
        w.opt_string(self.end_icon_color.as_deref());
        w.opt_string(self.box_stroke_color.as_deref());
        w.u32(self.box_stroke_width);
        w.opt_string(self.background_color.as_deref());
        w.bool(self.end_icon_visible);
        w.bool(self.character_counter_enabled);
        w.bool(self.enabled);
        w.bool(self.validation_enabled);
        w.bool(self.error_visible);
        w.bool(self.focused);
        w.u32(self.surface.cursor);
        w.u32(self.surface.offset);
        w.u32(self.chrome.len() as u32);
        for (key, blob) in &self.chrome {
            w.string(key);
            w.blob(blob);
        }
        w.out
    }

    /// Decodes a snapshot from its byte form.
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let mut r = Reader { bytes, at: 0 };
        if r.take(4)? != MAGIC {
            return Err(SnapshotError::BadMagic);
        }
        let version = r.u8()?;
        if version != FORMAT_VERSION {
            debug!(version, "rejecting snapshot with unknown format version");
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let snapshot = Snapshot {
            value: r.string()?,
            hint_text: r.string()?,
            error_text: r.string()?,
            suffix_text: r.string()?,
            allowed_characters: r.opt_string()?,
            max_characters: r.opt_u64()?,
            min_lines: r.u32()?,
            max_lines: r.u32()?,
            single_line: r.bool()?,
            input_type: r.u32()?,
            ime_options: r.u32()?,
            text_alignment: r.u32()?,
            text_direction: r.u32()?,
            text_size: r.u32()?,
            variant_code: r.i32()?,
            start_icon: r.opt_string()?,
            end_icon: r.opt_string()?,
            start_icon_color: r.opt_string()?,
            end_icon_color: r.opt_string()?,
            box_stroke_color: r.opt_string()?,
            box_stroke_width: r.u32()?,
            background_color: r.opt_string()?,
            end_icon_visible: r.bool()?,
            character_counter_enabled: r.bool()?,
            enabled: r.bool()?,
            validation_enabled: r.bool()?,
            error_visible: r.bool()?,
            focused: r.bool()?,
            surface: SurfaceState {
                cursor: r.u32()?,
                offset: r.u32()?,
            },
            chrome: {
                let count = r.u32()? as usize;
                let mut entries = Vec::with_capacity(count.min(64));
                for _ in 0..count {
                    let key = r.string()?;
                    let blob = r.blob()?;
                    entries.push((key, blob));
                }
                entries
            },
        };

        let rest = r.bytes.len() - r.at;
        if rest > 0 {
            return Err(SnapshotError::TrailingBytes(rest));
        }
        Ok(snapshot)
    }
}

#[derive(Default)]
struct Writer {
    out: Vec<u8>,
}

impl Writer {
    fn bytes(&mut self, b: &[u8]) {
        self.out.extend_from_slice(b);
    }

    fn u8(&mut self, v: u8) {
        self.out.push(v);
    }

    fn bool(&mut self, v: bool) {
        self.u8(u8::from(v));
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.bytes(&v.to_le_bytes());
    }

    fn blob(&mut self, b: &[u8]) {
        self.u32(b.len() as u32);
        self.bytes(b);
    }

    fn string(&mut self, s: &str) {
        self.blob(s.as_bytes());
    }

    fn opt_string(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.bool(true);
                self.string(s);
            }
            None => self.bool(false),
        }
    }

    fn opt_u64(&mut self, v: Option<u64>) {
        match v {
            Some(v) => {
                self.bool(true);
                self.u64(v);
            }
            None => self.bool(false),
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], SnapshotError> {
        if self.at + n > self.bytes.len() {
            return Err(SnapshotError::UnexpectedEof);
        }
        let slice = &self.bytes[self.at..self.at + n];
        self.at += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, SnapshotError> {
        Ok(self.take(1)?[0])
    }

    fn bool(&mut self) -> Result<bool, SnapshotError> {
        Ok(self.u8()? != 0)
    }

    fn u32(&mut self) -> Result<u32, SnapshotError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, SnapshotError> {
        let b = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Ok(u64::from_le_bytes(buf))
    }

    fn i32(&mut self) -> Result<i32, SnapshotError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn blob(&mut self) -> Result<Vec<u8>, SnapshotError> {
        let len = self.u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn string(&mut self) -> Result<String, SnapshotError> {
        let bytes = self.blob()?;
        String::from_utf8(bytes).map_err(|_| SnapshotError::InvalidUtf8)
    }

    fn opt_string(&mut self) -> Result<Option<String>, SnapshotError> {
        if self.bool()? {
            Ok(Some(self.string()?))
        } else {
            Ok(None)
        }
    }

    fn opt_u64(&mut self) -> Result<Option<u64>, SnapshotError> {
        if self.bool()? {
            Ok(Some(self.u64()?))
        } else {
            Ok(None)
        }
    }
}
