//! Lenient numeric deserialization for raw score records.
//!
//! Upstream rows occasionally carry nulls, strings, floats or negative
//! numbers in count fields. A single bad value must not reject the row, so
//! every count is coerced to a non-negative integer here and the analyzers
//! only ever see clean numbers.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a non-negative count")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
        Ok(u32::try_from(v).unwrap_or(u32::MAX))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
        if v < 0 {
            Ok(0)
        } else {
            self.visit_u64(v as u64)
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
        Ok(coerce_float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        Ok(coerce_str(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<u32, E> {
        Ok(0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<u32, E> {
        Ok(0)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<u32, D::Error> {
        d.deserialize_any(CountVisitor)
    }
}

fn coerce_float(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn coerce_str(v: &str) -> u32 {
    let trimmed = v.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return u32::try_from(n.max(0)).unwrap_or(u32::MAX);
    }
    trimmed.parse::<f64>().map(coerce_float).unwrap_or(0)
}

/// Deserialize a count field, mapping anything unusable to 0.
pub fn count<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    d.deserialize_any(CountVisitor)
}

/// Deserialize a quarter number. Same coercion as [`count`], narrowed to `u8`.
///
/// Out-of-range quarters survive deserialization; grouping ignores them.
pub fn quarter<'de, D>(d: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let n = d.deserialize_any(CountVisitor)?;
    Ok(u8::try_from(n).unwrap_or(0))
}
