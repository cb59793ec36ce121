//! RECSTORE - Compound Bin Mutations
//! Read-modify-write rules for append, prepend and add.
//!
//! A call carrying several bins is staged in full before anything is
//! written back: if any bin fails its type check the stored record is
//! left exactly as it was.

use crate::error::{Result, StoreError};
use crate::types::{Bin, Bins, Value};

/// The compound mutations that combine an operand with a stored bin value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Concatenate the operand's string form after a stored string.
    Append,
    /// Concatenate the operand's string form before a stored string.
    Prepend,
    /// Add a numeric operand to a stored integer, keeping its width.
    Add,
}

impl Mutation {
    pub fn name(self) -> &'static str {
        match self {
            Mutation::Append => "append",
            Mutation::Prepend => "prepend",
            Mutation::Add => "add",
        }
    }

    /// Combine a stored value with an operand.
    pub fn combine(self, bin: &str, stored: &Value, operand: &Value) -> Result<Value> {
        match self {
            Mutation::Append | Mutation::Prepend => {
                let current = stored
                    .as_str()
                    .ok_or_else(|| mismatch(bin, "string", stored))?;
                let combined = if self == Mutation::Append {
                    format!("{}{}", current, operand)
                } else {
                    format!("{}{}", operand, current)
                };
                Ok(Value::String(combined))
            }
            Mutation::Add => {
                // Double operands truncate toward zero.
                let delta = match operand {
                    Value::Double(d) => *d as i64,
                    other => other
                        .as_i64()
                        .ok_or_else(|| mismatch(bin, "integer", other))?,
                };
                match stored {
                    Value::Int(i) => Ok(Value::Int(i.wrapping_add(delta as i32))),
                    Value::Long(l) => Ok(Value::Long(l.wrapping_add(delta))),
                    other => Err(mismatch(bin, "integer", other)),
                }
            }
        }
    }

    /// Apply the mutation to every incoming bin the record already holds.
    ///
    /// Incoming names the record does not hold are skipped. Returns the
    /// number of bins updated.
    pub fn apply(self, bins: &mut Bins, incoming: &[Bin]) -> Result<usize> {
        let mut staged = Bins::with_capacity(incoming.len());
        for bin in incoming {
            let current = match staged.get(&bin.name).or_else(|| bins.get(&bin.name)) {
                Some(value) => value,
                None => continue,
            };
            let next = self.combine(&bin.name, current, &bin.value)?;
            staged.insert(bin.name.clone(), next);
        }

        let updated = staged.len();
        bins.extend(staged);
        Ok(updated)
    }
}

fn mismatch(bin: &str, expected: &'static str, found: &Value) -> StoreError {
    StoreError::TypeMismatch {
        bin: bin.to_string(),
        expected,
        found: found.type_name(),
    }
}
