use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ExprError, Result, TypeTag};

/// Non-null content of a scalar value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    /// Backs both `CHAR` and `VARCHAR`.
    Text(String),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl Payload {
    /// Whether this payload may be carried under `tag`. No widening.
    pub fn fits(&self, tag: TypeTag) -> bool {
        matches!(
            (self, tag),
            (Self::TinyInt(_), TypeTag::TinyInt)
                | (Self::SmallInt(_), TypeTag::SmallInt)
                | (Self::Integer(_), TypeTag::Integer)
                | (Self::BigInt(_), TypeTag::BigInt)
                | (Self::Float(_), TypeTag::Float)
                | (Self::Double(_), TypeTag::Double)
                | (Self::Boolean(_), TypeTag::Boolean)
                | (Self::Text(_), TypeTag::Char | TypeTag::Varchar)
                | (Self::Timestamp(_), TypeTag::Timestamp)
                | (Self::Date(_), TypeTag::Date)
                | (Self::Time(_), TypeTag::Time)
        )
    }

    /// The tag a payload gets when no tag is given explicitly.
    pub fn natural_tag(&self) -> TypeTag {
        match self {
            Self::TinyInt(_) => TypeTag::TinyInt,
            Self::SmallInt(_) => TypeTag::SmallInt,
            Self::Integer(_) => TypeTag::Integer,
            Self::BigInt(_) => TypeTag::BigInt,
            Self::Float(_) => TypeTag::Float,
            Self::Double(_) => TypeTag::Double,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Text(_) => TypeTag::Varchar,
            Self::Timestamp(_) => TypeTag::Timestamp,
            Self::Date(_) => TypeTag::Date,
            Self::Time(_) => TypeTag::Time,
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TinyInt(a), Self::TinyInt(b)) => a == b,
            (Self::SmallInt(a), Self::SmallInt(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            // NaN equals NaN so that identical plans compare equal
            (Self::Float(a), Self::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Self::Double(a), Self::Double(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TinyInt(i) => write!(f, "{}", i),
            Self::SmallInt(i) => write!(f, "{}", i),
            Self::Integer(i) => write!(f, "{}", i),
            Self::BigInt(i) => write!(f, "{}", i),
            Self::Float(fl) => write!(f, "{}", fl),
            Self::Double(fl) => write!(f, "{}", fl),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Text(s) => write!(f, "{}", s),
            Self::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Date(d) => write!(f, "{}", d),
            Self::Time(t) => write!(f, "{}", t),
        }
    }
}

/// A value of a declared SQL type, or the absence of one.
///
/// The type tag stays authoritative when the payload is absent, so a
/// `NULL` BIGINT and a `NULL` VARCHAR are different values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScalarValue")]
pub struct ScalarValue {
    type_tag: TypeTag,
    payload: Option<Payload>,
}

/// Unchecked wire shape; deserialized values go through [`ScalarValue::new`].
#[derive(Deserialize)]
struct RawScalarValue {
    type_tag: TypeTag,
    payload: Option<Payload>,
}

impl TryFrom<RawScalarValue> for ScalarValue {
    type Error = ExprError;

    fn try_from(raw: RawScalarValue) -> Result<Self> {
        Self::new(raw.type_tag, raw.payload)
    }
}

impl ScalarValue {
    pub fn new(type_tag: TypeTag, payload: Option<Payload>) -> Result<Self> {
        if let Some(p) = &payload
            && !p.fits(type_tag)
        {
            return Err(ExprError::TypeMismatch {
                expected: type_tag,
                actual: p.natural_tag(),
            });
        }
        Ok(Self { type_tag, payload })
    }

    pub fn null(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            payload: None,
        }
    }

    // ========================================
    // Non-null constructors
    // ========================================

    pub fn tinyint(v: i8) -> Self {
        Self::of(TypeTag::TinyInt, Payload::TinyInt(v))
    }

    pub fn smallint(v: i16) -> Self {
        Self::of(TypeTag::SmallInt, Payload::SmallInt(v))
    }

    pub fn integer(v: i32) -> Self {
        Self::of(TypeTag::Integer, Payload::Integer(v))
    }

    pub fn bigint(v: i64) -> Self {
        Self::of(TypeTag::BigInt, Payload::BigInt(v))
    }

    pub fn float(v: f32) -> Self {
        Self::of(TypeTag::Float, Payload::Float(v))
    }

    pub fn double(v: f64) -> Self {
        Self::of(TypeTag::Double, Payload::Double(v))
    }

    pub fn boolean(v: bool) -> Self {
        Self::of(TypeTag::Boolean, Payload::Boolean(v))
    }

    pub fn char(v: impl Into<String>) -> Self {
        Self::of(TypeTag::Char, Payload::Text(v.into()))
    }

    pub fn varchar(v: impl Into<String>) -> Self {
        Self::of(TypeTag::Varchar, Payload::Text(v.into()))
    }

    pub fn timestamp(v: NaiveDateTime) -> Self {
        Self::of(TypeTag::Timestamp, Payload::Timestamp(v))
    }

    pub fn date(v: NaiveDate) -> Self {
        Self::of(TypeTag::Date, Payload::Date(v))
    }

    pub fn time(v: NaiveTime) -> Self {
        Self::of(TypeTag::Time, Payload::Time(v))
    }

    fn of(type_tag: TypeTag, payload: Payload) -> Self {
        Self {
            type_tag,
            payload: Some(payload),
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn is_null(&self) -> bool {
        self.payload.is_none()
    }

    /// Payload read under `expected`. A null value yields `Ok(None)`.
    pub fn value(&self, expected: TypeTag) -> Result<Option<&Payload>> {
        if expected != self.type_tag {
            return Err(ExprError::TypeMismatch {
                expected,
                actual: self.type_tag,
            });
        }
        Ok(self.payload.as_ref())
    }

    // ========================================
    // Typed accessors
    // ========================================

    pub fn as_tinyint(&self) -> Result<Option<i8>> {
        self.read(TypeTag::TinyInt, |p| match p {
            Payload::TinyInt(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_smallint(&self) -> Result<Option<i16>> {
        self.read(TypeTag::SmallInt, |p| match p {
            Payload::SmallInt(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_integer(&self) -> Result<Option<i32>> {
        self.read(TypeTag::Integer, |p| match p {
            Payload::Integer(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_bigint(&self) -> Result<Option<i64>> {
        self.read(TypeTag::BigInt, |p| match p {
            Payload::BigInt(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_float(&self) -> Result<Option<f32>> {
        self.read(TypeTag::Float, |p| match p {
            Payload::Float(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_double(&self) -> Result<Option<f64>> {
        self.read(TypeTag::Double, |p| match p {
            Payload::Double(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_boolean(&self) -> Result<Option<bool>> {
        self.read(TypeTag::Boolean, |p| match p {
            Payload::Boolean(v) => Some(*v),
            _ => None,
        })
    }

    /// Text of a `CHAR` or `VARCHAR` value.
    pub fn as_str(&self) -> Result<Option<&str>> {
        if !self.type_tag.is_string() {
            return Err(ExprError::TypeMismatch {
                expected: TypeTag::Varchar,
                actual: self.type_tag,
            });
        }
        Ok(match &self.payload {
            Some(Payload::Text(s)) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn as_timestamp(&self) -> Result<Option<NaiveDateTime>> {
        self.read(TypeTag::Timestamp, |p| match p {
            Payload::Timestamp(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_date(&self) -> Result<Option<NaiveDate>> {
        self.read(TypeTag::Date, |p| match p {
            Payload::Date(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_time(&self) -> Result<Option<NaiveTime>> {
        self.read(TypeTag::Time, |p| match p {
            Payload::Time(v) => Some(*v),
            _ => None,
        })
    }

    // `new` guarantees the payload fits the tag, so `extract` only sees
    // its own variant once the tag check passes.
    fn read<T>(
        &self,
        expected: TypeTag,
        extract: impl FnOnce(&Payload) -> Option<T>,
    ) -> Result<Option<T>> {
        Ok(self.value(expected)?.and_then(extract))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(p) => write!(f, "{}", p),
            None => write!(f, "NULL"),
        }
    }
}

impl From<Payload> for ScalarValue {
    fn from(payload: Payload) -> Self {
        Self::of(payload.natural_tag(), payload)
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        Self::integer(i)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        Self::bigint(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        Self::double(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::boolean(b)
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::varchar(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::varchar(s)
    }
}
