//! RECSTORE - Core Type Definitions
//! Defines the record data model: keys, bin values, records and headers.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The user-supplied part of a record key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserKey {
    String(String),
    Int(i64),
    Bytes(Vec<u8>),
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserKey::String(s) => f.write_str(s),
            UserKey::Int(i) => write!(f, "{}", i),
            UserKey::Bytes(b) => write_hex(f, b),
        }
    }
}

impl From<&str> for UserKey {
    fn from(s: &str) -> Self {
        UserKey::String(s.to_string())
    }
}

impl From<String> for UserKey {
    fn from(s: String) -> Self {
        UserKey::String(s)
    }
}

impl From<i64> for UserKey {
    fn from(i: i64) -> Self {
        UserKey::Int(i)
    }
}

impl From<Vec<u8>> for UserKey {
    fn from(b: Vec<u8>) -> Self {
        UserKey::Bytes(b)
    }
}

/// Composite record identifier.
/// Equality and hashing cover namespace, set name and user key together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    namespace: String,
    set_name: String,
    user_key: UserKey,
}

impl Key {
    pub fn new(
        namespace: impl Into<String>,
        set_name: impl Into<String>,
        user_key: impl Into<UserKey>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            set_name: set_name.into(),
            user_key: user_key.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn user_key(&self) -> &UserKey {
        &self.user_key
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.set_name, self.user_key)
    }
}

/// A bin value.
///
/// `Bool` is accepted on input only. Every write path stores it as
/// `Long(1)` or `Long(0)`, so reads never hand a `Bool` back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    Bytes(Bytes),
}

impl Value {
    /// Convert the value to its stored form.
    pub fn normalized(self) -> Value {
        match self {
            Value::Bool(b) => Value::Long(b as i64),
            other => other,
        }
    }

    /// Name of the value's kind, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of the value. Booleans count as 0/1, doubles do not convert.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i as i64),
            Value::Long(l) => Some(*l),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(l) => write!(f, "{}", l),
            Value::Double(d) => write!(f, "{}", d),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bytes(b) => write_hex(f, b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Value::Long(l)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

/// A named value within a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub name: String,
    pub value: Value,
}

impl Bin {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Bin name to stored value.
pub type Bins = HashMap<String, Value>;

/// Build a stored bin map from input bins. Later duplicates replace earlier ones.
pub fn to_bins(bins: &[Bin]) -> Bins {
    bins.iter()
        .map(|bin| (bin.name.clone(), bin.value.clone().normalized()))
        .collect()
}

/// Generation and expiration of a record, without bin data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub generation: u32,
    pub expiration: u32,
}

/// The unit of storage: bins plus generation and expiration metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub bins: Bins,
    pub generation: u32,
    pub expiration: u32,
}

impl Record {
    pub fn new(bins: Bins, generation: u32, expiration: u32) -> Self {
        Self {
            bins,
            generation,
            expiration,
        }
    }

    /// A fresh record as written by `put`: generation and expiration at 0.
    pub fn from_bins(bins: &[Bin]) -> Self {
        Self::new(to_bins(bins), 0, 0)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bins.get(name)
    }

    pub fn header(&self) -> RecordHeader {
        RecordHeader {
            generation: self.generation,
            expiration: self.expiration,
        }
    }

    /// Project the record onto the requested bin names.
    /// Names the record does not hold map to `None`.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> PartialRecord {
        let bins = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                (name.to_string(), self.bins.get(name).cloned())
            })
            .collect();
        PartialRecord {
            bins,
            generation: self.generation,
            expiration: self.expiration,
        }
    }
}

/// A record restricted to a requested set of bin names.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialRecord {
    pub bins: HashMap<String, Option<Value>>,
    pub generation: u32,
    pub expiration: u32,
}

impl PartialRecord {
    /// Stored value of a requested bin, or `None` if it was missing or not requested.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bins.get(name).and_then(|v| v.as_ref())
    }

    pub fn header(&self) -> RecordHeader {
        RecordHeader {
            generation: self.generation,
            expiration: self.expiration,
        }
    }
}
