//! Catalog type mapping.
//!
//! The catalog stores every column, domain and parameter type as a numeric
//! field-type code plus length, precision, scale and character set. This
//! module turns that encoding into canonical SQL type syntax. Domain export
//! and inline column rendering both go through [`map_type`], so a type read
//! back from the catalog renders the same way no matter where it appears.

use std::fmt;

/// Field-type codes as stored in the catalog.
pub mod codes {
    /// 16-bit integer.
    pub const SMALLINT: i16 = 7;
    /// 32-bit integer.
    pub const INTEGER: i16 = 8;
    /// Legacy 64-bit quad.
    pub const QUAD: i16 = 9;
    /// Single precision float.
    pub const FLOAT: i16 = 10;
    /// Date only.
    pub const DATE: i16 = 12;
    /// Time only.
    pub const TIME: i16 = 13;
    /// Fixed-length character string.
    pub const CHAR: i16 = 14;
    /// Signed 64-bit integer, also the storage of scaled `NUMERIC` values.
    pub const INT64: i16 = 16;
    /// Double precision float.
    pub const DOUBLE: i16 = 27;
    /// Date and time.
    pub const TIMESTAMP: i16 = 35;
    /// Variable-length character string.
    pub const VARCHAR: i16 = 37;
    /// Binary large object.
    pub const BLOB: i16 = 261;
}

/// Largest text field, in bytes, that still fits in a row.
pub const MAX_ROW_TEXT_BYTES: i32 = 32767;

/// Character set whose reported lengths are byte counts at 4 bytes per character.
pub const UTF8_CHARSET: &str = "UTF8";

/// Stored encoding of a field type, as read from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldType {
    /// Field-type code (see [`codes`]).
    pub code: i16,
    /// Declared length in raw catalog units.
    pub length: i32,
    /// Declared precision, if any.
    pub precision: Option<i16>,
    /// Declared scale (stored as a negative exponent), if any.
    pub scale: Option<i16>,
    /// Character set name, if any.
    pub charset: Option<String>,
}

impl FieldType {
    /// Creates a field type with no length, precision or charset.
    #[must_use]
    pub const fn new(code: i16) -> Self {
        Self {
            code,
            length: 0,
            precision: None,
            scale: None,
            charset: None,
        }
    }

    /// Sets the raw length.
    #[must_use]
    pub const fn length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn numeric(mut self, precision: i16, scale: i16) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Sets the character set.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Returns whether the code is a character type.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.code, codes::CHAR | codes::VARCHAR)
    }

    /// Bytes needed per character under this field's character set.
    #[must_use]
    pub fn bytes_per_char(&self) -> i32 {
        match self.charset.as_deref() {
            Some(cs) if cs.trim().eq_ignore_ascii_case(UTF8_CHARSET) => 4,
            _ => 1,
        }
    }

    /// Declared length in characters.
    #[must_use]
    pub fn char_length(&self) -> i32 {
        self.length / self.bytes_per_char()
    }

    /// Resolves the stored encoding into a canonical type.
    #[must_use]
    pub fn resolve(&self) -> CanonicalType {
        let chars = self.char_length();
        if self.is_text() && chars.saturating_mul(self.bytes_per_char()) > MAX_ROW_TEXT_BYTES {
            return CanonicalType::BlobText;
        }

        let precision = self.precision.unwrap_or(0);
        let scale = self.scale.unwrap_or(0);

        match self.code {
            codes::SMALLINT => CanonicalType::SmallInt,
            codes::INTEGER => CanonicalType::Integer,
            codes::QUAD => CanonicalType::Quad,
            codes::FLOAT => CanonicalType::Float,
            codes::DATE => CanonicalType::Date,
            codes::TIME => CanonicalType::Time,
            codes::CHAR => CanonicalType::Char(chars),
            codes::INT64 if precision > 0 => CanonicalType::Numeric(precision, -i32::from(scale)),
            codes::INT64 => CanonicalType::BigInt,
            codes::DOUBLE => CanonicalType::DoublePrecision,
            codes::TIMESTAMP => CanonicalType::Timestamp,
            codes::VARCHAR => CanonicalType::Varchar(chars),
            codes::BLOB => CanonicalType::Blob,
            other => CanonicalType::Unknown(other),
        }
    }
}

/// Canonical SQL type produced from a catalog encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalType {
    /// `SMALLINT`.
    SmallInt,
    /// `INTEGER`.
    Integer,
    /// `QUAD`.
    Quad,
    /// `FLOAT`.
    Float,
    /// `DATE`.
    Date,
    /// `TIME`.
    Time,
    /// `CHAR(n)`.
    Char(i32),
    /// `BIGINT`.
    BigInt,
    /// `NUMERIC(p,s)`.
    Numeric(i16, i32),
    /// `DOUBLE PRECISION`.
    DoublePrecision,
    /// `TIMESTAMP`.
    Timestamp,
    /// `VARCHAR(n)`.
    Varchar(i32),
    /// `BLOB`.
    Blob,
    /// Text too large for a row, stored as a text blob.
    BlobText,
    /// A code this mapper does not know.
    Unknown(i16),
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallInt => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Quad => f.write_str("QUAD"),
            Self::Float => f.write_str("FLOAT"),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Char(n) => write!(f, "CHAR({n})"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Numeric(p, s) => write!(f, "NUMERIC({p},{s})"),
            Self::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Varchar(n) => write!(f, "VARCHAR({n})"),
            Self::Blob => f.write_str("BLOB"),
            Self::BlobText => f.write_str("BLOB SUB_TYPE TEXT"),
            Self::Unknown(code) => write!(f, "UNKNOWN_TYPE({code})"),
        }
    }
}

/// Renders a catalog field type as canonical SQL type syntax.
///
/// Never fails: codes outside the known table render as
/// `UNKNOWN_TYPE(<code>)`.
#[must_use]
pub fn map_type(field: &FieldType) -> String {
    field.resolve().to_string()
}
