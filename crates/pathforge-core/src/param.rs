//! Named parameters settable from strings.
//!
//! Planners expose their tunable knobs through a [`ParamSet`] so they can be
//! configured generically (from a configuration file, a command line, ...) by
//! name and string value. Values are a small tagged variant ([`ParamValue`]);
//! parsing is an explicit fallible operation and never panics.
//!
//! The string-facing operations ([`ParamSet::set_param`]) report failures as
//! `false` plus a `tracing` warning and leave the previous value in place.
//!
//! # Example
//!
//! ```
//! use pathforge_core::param::{ParamKind, ParamSet, ParamValue};
//!
//! #[derive(Default)]
//! struct Knobs { range: f64 }
//!
//! let mut params = ParamSet::new();
//! params.declare(
//!     "range",
//!     ParamKind::Float,
//!     |k: &mut Knobs, v: ParamValue| { k.range = v.as_float()?; Ok(()) },
//!     |k: &Knobs| ParamValue::Float(k.range),
//! );
//!
//! let mut knobs = Knobs::default();
//! assert!(params.set_param(&mut knobs, "range", "0.5"));
//! assert!(!params.set_param(&mut knobs, "range", "far"));
//! assert_eq!(params.get_param(&knobs, "range").as_deref(), Some("0.5"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

/// Errors of the named-parameter layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("Invalid value format specified for parameter '{name}': '{value}' is not a valid {kind}")]
    InvalidValue {
        name: String,
        kind: ParamKind,
        value: String,
    },

    #[error("Value rejected for parameter '{name}': {reason}")]
    Rejected { name: String, reason: String },

    #[error("Expected a {expected} value, found {found}")]
    TypeMismatch { expected: ParamKind, found: ParamKind },
}

/// The kinds of value a parameter can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    Str,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Bool => "boolean",
            ParamKind::Int => "integer",
            ParamKind::Float => "floating-point number",
            ParamKind::Str => "string",
        })
    }
}

impl ParamKind {
    /// Parses `raw` into a value of this kind.
    ///
    /// Booleans accept `true`/`false`/`1`/`0`; surrounding whitespace is ignored
    /// for every kind except strings.
    pub fn parse(self, name: &str, raw: &str) -> Result<ParamValue, ParamError> {
        let invalid = || ParamError::InvalidValue {
            name: name.to_string(),
            kind: self,
            value: raw.to_string(),
        };
        let trimmed = raw.trim();
        match self {
            ParamKind::Bool => match trimmed {
                "true" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(invalid()),
            },
            ParamKind::Int => trimmed
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| invalid()),
            ParamKind::Float => trimmed
                .parse::<f64>()
                .map(ParamValue::Float)
                .map_err(|_| invalid()),
            ParamKind::Str => Ok(ParamValue::Str(raw.to_string())),
        }
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Str(_) => ParamKind::Str,
        }
    }

    fn mismatch(&self, expected: ParamKind) -> ParamError {
        ParamError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ParamError> {
        match self {
            ParamValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch(ParamKind::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<i64, ParamError> {
        match self {
            ParamValue::Int(i) => Ok(*i),
            other => Err(other.mismatch(ParamKind::Int)),
        }
    }

    /// Integer value as an index; negative values are rejected.
    pub fn as_usize(&self) -> Result<usize, ParamError> {
        let i = self.as_int()?;
        usize::try_from(i).map_err(|_| ParamError::Rejected {
            name: String::new(),
            reason: format!("{} is negative", i),
        })
    }

    /// Float value; integers widen.
    pub fn as_float(&self) -> Result<f64, ParamError> {
        match self {
            ParamValue::Float(f) => Ok(*f),
            ParamValue::Int(i) => Ok(*i as f64),
            other => Err(other.mismatch(ParamKind::Float)),
        }
    }

    pub fn as_str(&self) -> Result<&str, ParamError> {
        match self {
            ParamValue::Str(s) => Ok(s),
            other => Err(other.mismatch(ParamKind::Str)),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

/// Applies a typed value to the owner, or explains why it is rejected.
pub type ParamSetter<T> = fn(&mut T, ParamValue) -> Result<(), ParamError>;

/// Reads the current value from the owner.
pub type ParamGetter<T> = fn(&T) -> ParamValue;

/// One declared parameter of an owner of type `T`.
pub struct Param<T> {
    name: String,
    kind: ParamKind,
    setter: ParamSetter<T>,
    getter: ParamGetter<T>,
}

impl<T> Clone for Param<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            setter: self.setter,
            getter: self.getter,
        }
    }
}

impl<T> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<T> Param<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Parses and applies `raw`. The owner is untouched on error.
    pub fn try_set(&self, owner: &mut T, raw: &str) -> Result<(), ParamError> {
        let value = self.kind.parse(&self.name, raw)?;
        (self.setter)(owner, value).map_err(|e| match e {
            ParamError::Rejected { reason, .. } => ParamError::Rejected {
                name: self.name.clone(),
                reason,
            },
            other => ParamError::Rejected {
                name: self.name.clone(),
                reason: other.to_string(),
            },
        })
    }

    pub fn value(&self, owner: &T) -> ParamValue {
        (self.getter)(owner)
    }
}

/// Ordered set of the parameters of an owner of type `T`.
pub struct ParamSet<T> {
    params: BTreeMap<String, Param<T>>,
}

impl<T> Clone for ParamSet<T> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
        }
    }
}

impl<T> fmt::Debug for ParamSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.params.keys()).finish()
    }
}

impl<T> Default for ParamSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ParamSet<T> {
    pub fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Declares (or redeclares) parameter `name`.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        kind: ParamKind,
        setter: ParamSetter<T>,
        getter: ParamGetter<T>,
    ) {
        let name = name.into();
        self.params.insert(
            name.clone(),
            Param {
                name,
                kind,
                setter,
                getter,
            },
        );
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.params.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Param<T>> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Parses and applies `value` to parameter `key`.
    pub fn try_set_param(&self, owner: &mut T, key: &str, value: &str) -> Result<(), ParamError> {
        self.params
            .get(key)
            .ok_or_else(|| ParamError::UnknownParameter(key.to_string()))?
            .try_set(owner, value)
    }

    /// Sets parameter `key` from its string form.
    ///
    /// Returns `false` and logs a warning when the parameter is unknown, the
    /// value does not parse, or the owner rejects it; the previous value is
    /// kept in every failure case.
    pub fn set_param(&self, owner: &mut T, key: &str, value: &str) -> bool {
        match self.try_set_param(owner, key, value) {
            Ok(()) => {
                debug!(
                    "The value of parameter '{}' is now: '{}'",
                    key,
                    self.get_param(owner, key).unwrap_or_default()
                );
                true
            }
            Err(e) => {
                warn!(parameter = key, value, "{}", e);
                false
            }
        }
    }

    /// Sets every pair; returns true only if all succeeded.
    pub fn set_params<'a, I>(&self, owner: &mut T, kv: I) -> bool
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        kv.into_iter()
            .fold(true, |ok, (k, v)| self.set_param(owner, k, v) && ok)
    }

    /// Current value of `key` as a string.
    pub fn get_param(&self, owner: &T, key: &str) -> Option<String> {
        self.params.get(key).map(|p| p.value(owner).to_string())
    }

    /// All parameters and their current values, as strings.
    pub fn get_params(&self, owner: &T) -> BTreeMap<String, String> {
        self.params
            .iter()
            .map(|(name, p)| (name.clone(), p.value(owner).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Knobs {
        level: usize,
        bias: f64,
        verbose: bool,
        label: String,
    }

    fn knob_params() -> ParamSet<Knobs> {
        let mut params = ParamSet::new();
        params.declare(
            "level",
            ParamKind::Int,
            |k: &mut Knobs, v| {
                let level = v.as_usize()?;
                if level > 4 {
                    return Err(ParamError::Rejected {
                        name: String::new(),
                        reason: format!("{} exceeds 4", level),
                    });
                }
                k.level = level;
                Ok(())
            },
            |k: &Knobs| ParamValue::Int(k.level as i64),
        );
        params.declare(
            "bias",
            ParamKind::Float,
            |k: &mut Knobs, v| {
                k.bias = v.as_float()?;
                Ok(())
            },
            |k: &Knobs| ParamValue::Float(k.bias),
        );
        params.declare(
            "verbose",
            ParamKind::Bool,
            |k: &mut Knobs, v| {
                k.verbose = v.as_bool()?;
                Ok(())
            },
            |k: &Knobs| ParamValue::Bool(k.verbose),
        );
        params.declare(
            "label",
            ParamKind::Str,
            |k: &mut Knobs, v| {
                k.label = v.as_str()?.to_string();
                Ok(())
            },
            |k: &Knobs| ParamValue::Str(k.label.clone()),
        );
        params
    }

    #[test]
    fn test_round_trip() {
        let params = knob_params();
        let mut knobs = Knobs::default();

        assert!(params.set_param(&mut knobs, "level", "2"));
        assert_eq!(params.get_param(&knobs, "level").as_deref(), Some("2"));
        assert!(params.set_param(&mut knobs, "bias", " 0.25 "));
        assert_eq!(params.get_param(&knobs, "bias").as_deref(), Some("0.25"));
        assert!(params.set_param(&mut knobs, "verbose", "1"));
        assert!(knobs.verbose);
        assert!(params.set_param(&mut knobs, "label", "coarse"));
        assert_eq!(knobs.label, "coarse");
    }

    #[test]
    fn test_parse_failure_keeps_prior_value() {
        let params = knob_params();
        let mut knobs = Knobs::default();
        assert!(params.set_param(&mut knobs, "level", "2"));

        assert!(!params.set_param(&mut knobs, "level", "abc"));
        assert_eq!(params.get_param(&knobs, "level").as_deref(), Some("2"));

        let err = params.try_set_param(&mut knobs, "level", "abc").unwrap_err();
        assert_eq!(
            err,
            ParamError::InvalidValue {
                name: "level".into(),
                kind: ParamKind::Int,
                value: "abc".into()
            }
        );
    }

    #[test]
    fn test_rejected_value_names_parameter() {
        let params = knob_params();
        let mut knobs = Knobs::default();

        let err = params.try_set_param(&mut knobs, "level", "9").unwrap_err();
        assert_eq!(
            err,
            ParamError::Rejected {
                name: "level".into(),
                reason: "9 exceeds 4".into()
            }
        );
        assert!(!params.set_param(&mut knobs, "level", "-1"));
        assert_eq!(knobs.level, 0);
    }

    #[test]
    fn test_unknown_parameter() {
        let params = knob_params();
        let mut knobs = Knobs::default();
        assert!(!params.set_param(&mut knobs, "nope", "1"));
        assert_eq!(params.get_param(&knobs, "nope"), None);
    }

    #[test]
    fn test_set_params_reports_any_failure() {
        let params = knob_params();
        let mut knobs = Knobs::default();
        let mut kv = BTreeMap::new();
        kv.insert("bias".to_string(), "0.5".to_string());
        kv.insert("level".to_string(), "x".to_string());

        assert!(!params.set_params(&mut knobs, &kv));
        // the valid entry still applies
        assert_eq!(knobs.bias, 0.5);
    }

    #[test]
    fn test_names_are_ordered() {
        let params = knob_params();
        let names: Vec<_> = params.names().collect();
        assert_eq!(names, vec!["bias", "label", "level", "verbose"]);
        assert_eq!(params.len(), 4);
        assert_eq!(
            params.get_params(&Knobs::default()).get("verbose").map(String::as_str),
            Some("false")
        );
    }
}
