//! RECSTORE - Multi-Operation Requests
//! Operation tags for `operate` and the rules for applying them to one record.

use crate::error::Result;
use crate::types::{Bin, Bins};

use super::mutation::Mutation;

/// A single sub-operation of an `operate` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Set the bin to the value.
    Write(Bin),
    /// Append to a string bin.
    Append(Bin),
    /// Prepend to a string bin.
    Prepend(Bin),
    /// Add to an integer bin.
    Add(Bin),
    /// Read one bin. Served from the record after every write.
    Read(String),
    /// Read every bin.
    ReadAll,
}

impl Operation {
    pub fn put(bin: Bin) -> Self {
        Operation::Write(bin)
    }

    pub fn append(bin: Bin) -> Self {
        Operation::Append(bin)
    }

    pub fn prepend(bin: Bin) -> Self {
        Operation::Prepend(bin)
    }

    pub fn add(bin: Bin) -> Self {
        Operation::Add(bin)
    }

    pub fn get(name: impl Into<String>) -> Self {
        Operation::Read(name.into())
    }

    pub fn get_all() -> Self {
        Operation::ReadAll
    }

    pub fn is_write(&self) -> bool {
        !matches!(self, Operation::Read(_) | Operation::ReadAll)
    }
}

/// Apply every write operation, in input order, to `bins`.
///
/// A compound write on a bin the record does not hold yet sets the bin to
/// the operand. Reads are ignored here; they are served after all writes.
pub(crate) fn apply_writes(bins: &mut Bins, operations: &[Operation]) -> Result<()> {
    for op in operations {
        match op {
            Operation::Write(bin) => {
                bins.insert(bin.name.clone(), bin.value.clone().normalized());
            }
            Operation::Append(bin) => combine_or_insert(Mutation::Append, bins, bin)?,
            Operation::Prepend(bin) => combine_or_insert(Mutation::Prepend, bins, bin)?,
            Operation::Add(bin) => combine_or_insert(Mutation::Add, bins, bin)?,
            Operation::Read(_) | Operation::ReadAll => {}
        }
    }
    Ok(())
}

fn combine_or_insert(mutation: Mutation, bins: &mut Bins, bin: &Bin) -> Result<()> {
    let next = match bins.get(&bin.name) {
        Some(stored) => mutation.combine(&bin.name, stored, &bin.value)?,
        None => bin.value.clone().normalized(),
    };
    bins.insert(bin.name.clone(), next);
    Ok(())
}
