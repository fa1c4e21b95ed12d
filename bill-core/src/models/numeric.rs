use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A numeric form input that may be empty, a number, or unparseable text.
///
/// Arithmetic always goes through [`NumericField::or_zero`]; display goes
/// through [`fmt::Display`], which preserves whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NumericField {
    /// Nothing entered.
    #[default]
    Empty,
    /// A valid number.
    Value(Decimal),
    /// Text that does not parse as a number, kept verbatim.
    Invalid(String),
}

impl NumericField {
    /// Parses raw input text.
    ///
    /// Surrounding whitespace and `,` thousands separators are ignored, so
    /// `"12,66,838.00"` parses the same as `"1266838.00"`.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().replace(',', "");
        if normalized.is_empty() {
            return Self::Empty;
        }
        match Decimal::from_str(&normalized) {
            Ok(value) => Self::Value(value),
            Err(e) => {
                tracing::debug!(input = %raw, "numeric input did not parse: {}", e);
                Self::Invalid(raw.to_string())
            }
        }
    }

    /// The number, if one was entered.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// The number, or zero when empty or invalid.
    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Decimal> for NumericField {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

impl From<Option<Decimal>> for NumericField {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Empty, Self::Value)
    }
}

impl fmt::Display for NumericField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Value(value) => write!(f, "{value}"),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for NumericField {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct NumericFieldVisitor;

impl<'de> Visitor<'de> for NumericFieldVisitor {
    type Value = NumericField;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::Value(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::Value(Decimal::from(v)))
    }

    fn visit_i128<E: de::Error>(
        self,
        v: i128,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::parse(&v.to_string()))
    }

    fn visit_u128<E: de::Error>(
        self,
        v: u128,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::parse(&v.to_string()))
    }

    fn visit_bool<E: de::Error>(
        self,
        v: bool,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::Invalid(v.to_string()))
    }

    // Shortest round-trip formatting keeps 0.1 as 0.1 rather than its binary expansion.
    fn visit_f64<E: de::Error>(
        self,
        v: f64,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::parse(&v.to_string()))
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<Self::Value, E> {
        Ok(NumericField::parse(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(NumericField::Empty)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(NumericField::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(NumericFieldVisitor)
    }
}

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericFieldVisitor)
    }
}
