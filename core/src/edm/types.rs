//! # EDM Type References
//!
//! Parses CSDL type strings (`Edm.Int32`, `NS.Address`, `Collection(Edm.String)`)
//! into a typed reference.

use crate::error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Namespace reserved for the built-in primitive types.
pub const EDM_NAMESPACE: &str = "Edm";

/// Built-in EDM primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdmPrimitive {
    /// Binary data.
    Binary,
    /// `true` / `false`.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// Calendar date without time.
    Date,
    /// Date and time with offset.
    DateTimeOffset,
    /// Arbitrary precision decimal.
    Decimal,
    /// IEEE 754 binary64.
    Double,
    /// Signed duration.
    Duration,
    /// 128-bit identifier.
    Guid,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Signed 8-bit integer.
    SByte,
    /// IEEE 754 binary32.
    Single,
    /// Binary data stream.
    Stream,
    /// Character sequence.
    String,
    /// Clock time.
    TimeOfDay,
    /// Round-earth spatial value (`Edm.Geography*`).
    Geography(SpatialKind),
    /// Flat-earth spatial value (`Edm.Geometry*`).
    Geometry(SpatialKind),
    /// Any value, structured or not.
    Untyped,
    /// Any primitive value.
    PrimitiveType,
}

/// Shape of a spatial primitive, the suffix after `Geography`/`Geometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialKind {
    /// The abstract base (`Edm.Geography`, `Edm.Geometry`).
    Any,
    /// `Point`.
    Point,
    /// `LineString`.
    LineString,
    /// `Polygon`.
    Polygon,
    /// `MultiPoint`.
    MultiPoint,
    /// `MultiLineString`.
    MultiLineString,
    /// `MultiPolygon`.
    MultiPolygon,
    /// `Collection`.
    Collection,
}

impl SpatialKind {
    fn from_suffix(suffix: &str) -> Option<Self> {
        let kind = match suffix {
            "" => Self::Any,
            "Point" => Self::Point,
            "LineString" => Self::LineString,
            "Polygon" => Self::Polygon,
            "MultiPoint" => Self::MultiPoint,
            "MultiLineString" => Self::MultiLineString,
            "MultiPolygon" => Self::MultiPolygon,
            "Collection" => Self::Collection,
            _ => return None,
        };
        Some(kind)
    }

    /// The suffix after `Geography`/`Geometry`; empty for the abstract base.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::Collection => "Collection",
        }
    }
}

impl EdmPrimitive {
    /// Looks up a primitive by its unqualified name (e.g. `Int32`).
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "Binary" => Self::Binary,
            "Boolean" => Self::Boolean,
            "Byte" => Self::Byte,
            "Date" => Self::Date,
            "DateTimeOffset" => Self::DateTimeOffset,
            "Decimal" => Self::Decimal,
            "Double" => Self::Double,
            "Duration" => Self::Duration,
            "Guid" => Self::Guid,
            "Int16" => Self::Int16,
            "Int32" => Self::Int32,
            "Int64" => Self::Int64,
            "SByte" => Self::SByte,
            "Single" => Self::Single,
            "Stream" => Self::Stream,
            "String" => Self::String,
            "TimeOfDay" => Self::TimeOfDay,
            "Untyped" => Self::Untyped,
            "PrimitiveType" => Self::PrimitiveType,
            _ => {
                return match name.strip_prefix("Geography") {
                    Some(suffix) => SpatialKind::from_suffix(suffix).map(Self::Geography),
                    None => name
                        .strip_prefix("Geometry")
                        .and_then(SpatialKind::from_suffix)
                        .map(Self::Geometry),
                };
            }
        };
        Some(primitive)
    }

    /// Whether the primitive is one of the spatial types.
    pub fn is_spatial(self) -> bool {
        matches!(self, Self::Geography(_) | Self::Geometry(_))
    }
}

impl fmt::Display for EdmPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Date => "Date",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Duration => "Duration",
            Self::Guid => "Guid",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::SByte => "SByte",
            Self::Single => "Single",
            Self::Stream => "Stream",
            Self::String => "String",
            Self::TimeOfDay => "TimeOfDay",
            Self::Untyped => "Untyped",
            Self::PrimitiveType => "PrimitiveType",
            Self::Geography(kind) => return write!(f, "Geography{}", kind.suffix()),
            Self::Geometry(kind) => return write!(f, "Geometry{}", kind.suffix()),
        };
        f.write_str(name)
    }
}

/// A reference to an EDM type as written in CSDL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EdmTypeRef {
    /// A built-in primitive type.
    Primitive(EdmPrimitive),
    /// A qualified user-defined type (enum, complex or entity type).
    Named(String),
    /// `Collection(T)`.
    Collection(Box<EdmTypeRef>),
}

impl EdmTypeRef {
    /// Shorthand for `Collection(inner)`.
    pub fn collection(inner: EdmTypeRef) -> Self {
        Self::Collection(Box::new(inner))
    }

    /// Whether the reference is a `Collection(...)`.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

impl FromStr for EdmTypeRef {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        static COLLECTION_RE: OnceLock<Regex> = OnceLock::new();
        let collection_re = COLLECTION_RE
            .get_or_init(|| Regex::new(r"^Collection\((.+)\)$").expect("Invalid regex"));

        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::InvalidArgument("empty type reference".into()));
        }

        if let Some(caps) = collection_re.captures(s) {
            return Ok(Self::collection(caps[1].parse()?));
        }

        match s.split_once('.') {
            Some((EDM_NAMESPACE, name)) => EdmPrimitive::from_name(name)
                .map(Self::Primitive)
                .ok_or_else(|| {
                    AppError::InvalidArgument(format!("unsupported primitive type '{}'", s))
                }),
            _ => Ok(Self::Named(s.to_string())),
        }
    }
}

impl TryFrom<String> for EdmTypeRef {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        value.parse()
    }
}

impl From<EdmTypeRef> for String {
    fn from(value: EdmTypeRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EdmTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{}.{}", EDM_NAMESPACE, p),
            Self::Named(name) => write!(f, "{}", name),
            Self::Collection(inner) => write!(f, "Collection({})", inner),
        }
    }
}
