//! Attribute key/value model and wire-fragment encoding.
//!
//! Every structured attribute carries a [`Value`]: a closed set of variants
//! covering scalars, optional references, sequences and string-keyed maps,
//! plus one extension point ([`WireValue`]) for everything else. Each value
//! renders to a single JSON fragment shared by all output formats: strings
//! quoted and escaped, numbers and booleans bare, maps with keys sorted.
//!
//! Rendering is deferred until a log call has passed the level gate, so
//! attributes attached to suppressed calls are never stringified.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use serde::Serialize;

/// Capability trait for types that supply their own wire representation.
///
/// The output appended must be a complete fragment: a bare token, a quoted
/// string, or a JSON array/object. [`any`] provides a serde-backed
/// implementation for anything `Serialize`.
pub trait WireValue: Send + Sync {
    fn append_wire(&self, out: &mut String);
}

/// One structured attribute value.
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Dyn(Box<dyn WireValue>),
}

impl Value {
    /// Appends this value's wire fragment to `out`.
    pub fn append_to(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Value::UInt(u) => {
                let _ = write!(out, "{u}");
            }
            Value::Float(f) => append_float(out, *f),
            Value::Str(s) => quote_into(out, s),
            Value::Seq(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        out.push(',');
                    }
                    item.append_to(out);
                }
                out.push(']');
            }
            Value::Map(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i != 0 {
                        out.push(',');
                    }
                    quote_into(out, key);
                    out.push(':');
                    value.append_to(out);
                }
                out.push('}');
            }
            Value::Dyn(wire) => wire.append_wire(out),
        }
    }

    /// Renders the wire fragment as an owned string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.append_to(&mut out);
        out
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

// NaN and the infinities are emitted as bare tokens. Not strict JSON, but
// the line stays greppable and diagnostic; consumers must tolerate them.
fn append_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "Inf" } else { "-Inf" });
    } else {
        let _ = write!(out, "{f}");
    }
}

/// Appends `s` as a JSON-quoted string. Control characters, quotes and
/// backslashes are escaped; a newline becomes `\n` inside the quotes, never
/// a literal line break.
pub(crate) fn quote_into(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// An immutable key plus polymorphic value, created per log call.
///
/// A `KeyVal` may be built once and passed to many calls by reference; the
/// value is only rendered for calls that pass the level gate.
pub struct KeyVal {
    pub key: String,
    pub value: Value,
}

impl KeyVal {
    /// The wire fragment for this attribute's value.
    #[must_use]
    pub fn string_value(&self) -> String {
        self.value.render()
    }
}

/// Builds an attribute from any directly representable value type.
pub fn attr<K: Into<String>, V: Into<Value>>(key: K, value: V) -> KeyVal {
    KeyVal {
        key: key.into(),
        value: value.into(),
    }
}

/// Builds an attribute from an error (or anything `Display`), rendered as
/// its quoted human-readable message. Errors that want structured output
/// should go through [`any`] with a `Serialize` implementation.
pub fn err<K: Into<String>, E: std::fmt::Display>(key: K, error: &E) -> KeyVal {
    KeyVal {
        key: key.into(),
        value: Value::Str(error.to_string()),
    }
}

/// Builds an attribute from a custom [`WireValue`] implementation.
pub fn wire<K: Into<String>, W: WireValue + 'static>(key: K, value: W) -> KeyVal {
    KeyVal {
        key: key.into(),
        value: Value::Dyn(Box::new(value)),
    }
}

/// Builds an attribute from any `Serialize` value via the structural
/// marshaller.
///
/// Marshalling happens at render time, after the level gate. A marshalling
/// failure degrades to a quoted diagnostic string naming the error; the log
/// call itself never fails. Note that non-finite floats inside marshalled
/// structures follow `serde_json` semantics (they become `null`); pass raw
/// floats through [`attr`] to get the bare `NaN`/`Inf` tokens.
pub fn any<K: Into<String>, T: Serialize + Send + Sync + 'static>(key: K, value: T) -> KeyVal {
    KeyVal {
        key: key.into(),
        value: Value::Dyn(Box::new(SerdeWire(value))),
    }
}

struct SerdeWire<T>(T);

impl<T: Serialize + Send + Sync> WireValue for SerdeWire<T> {
    fn append_wire(&self, out: &mut String) {
        match serde_json::to_value(&self.0) {
            Ok(v) => Value::from(v).append_to(out),
            Err(e) => quote_into(out, &format!("ERR marshaling: {e}")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// One level of optional indirection is unwrapped transparently: absent
// renders as null, present as the inner value.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            None => Value::Null,
            Some(inner) => inner.into(),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// HashMap entries land in a BTreeMap: map output is sorted by key for
// determinism regardless of insertion order.
impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(entries: HashMap<K, V>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
