//! Typed, key-tolerant access to loosely-shaped API payloads.
//!
//! The API is inconsistent about diacritics in its keys: the same field
//! may arrive as `distribución_ataques` or `distribucion_ataques`. A
//! [`Key`] names both spellings; [`Payload`] resolves it by preferring
//! the accented form, falling back to the ASCII one, and otherwise
//! treating the field as absent. JSON `null` counts as absent.
//!
//! Required accessors fail with [`CoreError::MissingField`] or
//! [`CoreError::InvalidField`]; optional accessors default absent or
//! wrong-typed arrays to empty and booleans to `false`.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::CountMap;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// A payload key, optionally with an ASCII alternate spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    name: &'static str,
    ascii: Option<&'static str>,
}

impl Key {
    /// A key with a single spelling.
    pub const fn plain(name: &'static str) -> Self {
        Self { name, ascii: None }
    }

    /// A key that may arrive accented or stripped to ASCII.
    pub const fn dual(accented: &'static str, ascii: &'static str) -> Self {
        Self {
            name: accented,
            ascii: Some(ascii),
        }
    }

    /// Primary (accented) spelling, used in error messages.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// ---------------------------------------------------------------------------
// Range checks
// ---------------------------------------------------------------------------

/// Validate that a value falls within `[0.0, 1.0]`.
pub fn validate_unit_range(value: f64, field: &'static str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::invalid(
            field,
            format!("must be between 0.0 and 1.0, got {value}"),
        ));
    }
    Ok(())
}

/// Validate that a value falls within `[0.0, 100.0]`.
pub fn validate_percent_range(value: f64, field: &'static str) -> Result<(), CoreError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(CoreError::invalid(
            field,
            format!("must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scalar conversions
// ---------------------------------------------------------------------------

/// Interpret a JSON value as a non-negative integer.
///
/// Accepts integral floats (`1000.0`) since some serializers emit counts
/// that way.
pub fn as_count(value: &Value, field: &'static str) -> Result<u64, CoreError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(CoreError::invalid(
            field,
            format!("expected a non-negative integer, got {value}"),
        )),
    }
}

/// Interpret a JSON value as a finite number.
pub fn as_number(value: &Value, field: &'static str) -> Result<f64, CoreError> {
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| CoreError::invalid(field, format!("expected a number, got {value}")))
}

/// Interpret a JSON array as a sequence of finite numbers.
pub fn as_numbers(value: &Value, field: &'static str) -> Result<Vec<f64>, CoreError> {
    let items = value
        .as_array()
        .ok_or_else(|| CoreError::invalid(field, "expected an array"))?;
    items.iter().map(|item| as_number(item, field)).collect()
}

/// Interpret a JSON object as an ordered label → count mapping.
pub fn as_count_map(value: &Value, field: &'static str) -> Result<CountMap, CoreError> {
    let map = value
        .as_object()
        .ok_or_else(|| CoreError::invalid(field, "expected an object of counts"))?;
    map.iter()
        .map(|(label, count)| Ok::<_, CoreError>((label.clone(), as_count(count, field)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Borrowed view over a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Payload<'a> {
    /// Wrap a value that must be a JSON object.
    pub fn object(value: &'a Value, what: &'static str) -> Result<Self, CoreError> {
        value
            .as_object()
            .map(|map| Self { map: Some(map) })
            .ok_or_else(|| CoreError::invalid(what, "expected a JSON object"))
    }

    /// Wrap any value; non-objects behave as an empty object.
    pub fn lenient(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// Resolve a key, preferring the accented spelling.
    pub fn get(&self, key: Key) -> Option<&'a Value> {
        let map = self.map?;
        let present = |name: &str| map.get(name).filter(|v| !v.is_null());
        present(key.name).or_else(|| key.ascii.and_then(present))
    }

    fn require(&self, key: Key) -> Result<&'a Value, CoreError> {
        self.get(key)
            .ok_or(CoreError::MissingField { field: key.name })
    }

    pub fn required_count(&self, key: Key) -> Result<u64, CoreError> {
        as_count(self.require(key)?, key.name)
    }

    pub fn required_number(&self, key: Key) -> Result<f64, CoreError> {
        as_number(self.require(key)?, key.name)
    }

    /// A required number constrained to `[0, 1]`.
    pub fn required_unit(&self, key: Key) -> Result<f64, CoreError> {
        let value = self.required_number(key)?;
        validate_unit_range(value, key.name)?;
        Ok(value)
    }

    pub fn required_bool(&self, key: Key) -> Result<bool, CoreError> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| CoreError::invalid(key.name, "expected a boolean"))
    }

    pub fn required_str(&self, key: Key) -> Result<&'a str, CoreError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| CoreError::invalid(key.name, "expected a string"))
    }

    pub fn required_array(&self, key: Key) -> Result<&'a [Value], CoreError> {
        self.require(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| CoreError::invalid(key.name, "expected an array"))
    }

    pub fn required_count_map(&self, key: Key) -> Result<CountMap, CoreError> {
        as_count_map(self.require(key)?, key.name)
    }

    /// Absent or not a boolean → `false`.
    pub fn optional_bool(&self, key: Key) -> bool {
        match self.get(key) {
            None => false,
            Some(v) => v.as_bool().unwrap_or_else(|| {
                tracing::warn!(field = key.name, value = %v, "Ignoring non-boolean optional field");
                false
            }),
        }
    }

    /// Absent or not an array → empty slice.
    pub fn optional_array(&self, key: Key) -> &'a [Value] {
        match self.get(key) {
            None => &[],
            Some(v) => match v.as_array() {
                Some(items) => items.as_slice(),
                None => {
                    tracing::warn!(field = key.name, "Ignoring non-array optional field");
                    &[]
                }
            },
        }
    }

    pub fn optional_str(&self, key: Key) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn optional_count(&self, key: Key) -> Option<u64> {
        self.get(key).and_then(|v| as_count(v, key.name).ok())
    }

    pub fn optional_object(&self, key: Key) -> Option<Payload<'a>> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|map| Payload { map: Some(map) })
    }
}
