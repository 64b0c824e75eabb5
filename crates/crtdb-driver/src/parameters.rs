//! Ordered, name-addressable parameter bindings.

use crate::error::{DriverError, DriverResult};
use crtdb_core::DbValue;

/// One named binding attached to a command for a single execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: DbValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<DbValue>) -> Self {
        Parameter {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The ordered parameter collection of one command.
///
/// Name uniqueness is assumed, not enforced; named lookup is by exact match
/// with no case folding and returns the first binding with that name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterCollection {
    items: Vec<Parameter>,
}

impl ParameterCollection {
    pub fn new() -> Self {
        ParameterCollection::default()
    }

    /// Append a binding; returns its ordinal.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<DbValue>) -> usize {
        self.items.push(Parameter::new(name, value));
        self.items.len() - 1
    }

    pub fn insert(&mut self, ordinal: usize, parameter: Parameter) {
        self.items.insert(ordinal, parameter);
    }

    pub fn remove_at(&mut self, ordinal: usize) -> Option<Parameter> {
        if ordinal < self.items.len() {
            Some(self.items.remove(ordinal))
        } else {
            None
        }
    }

    /// Remove the first binding with the given name.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let ordinal = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(ordinal))
    }

    /// Replace the binding at the given ordinal, returning the previous one.
    pub fn replace_at(&mut self, ordinal: usize, parameter: Parameter) -> Option<Parameter> {
        let slot = self.items.get_mut(ordinal)?;
        Some(std::mem::replace(slot, parameter))
    }

    /// Replace the value of the first binding with the given name.
    pub fn replace(&mut self, name: &str, value: impl Into<DbValue>) -> DriverResult<()> {
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.name == name)
            .ok_or_else(|| DriverError::ParameterNotFound {
                name: name.to_owned(),
            })?;
        slot.value = value.into();
        Ok(())
    }

    pub fn get(&self, ordinal: usize) -> Option<&Parameter> {
        self.items.get(ordinal)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Value of the named binding; a missing name is an error by contract.
    pub fn value_of(&self, name: &str) -> DriverResult<&DbValue> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| &item.value)
            .ok_or_else(|| DriverError::ParameterNotFound {
                name: name.to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
