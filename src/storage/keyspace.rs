//! In-process keyspace shared by the memory and file backends.
//!
//! Mirrors the subset of Redis semantics the pipeline relies on: string,
//! list and set values, with a type error when an operation touches a key
//! holding a different kind of value.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Entry {
    String(String),
    /// Head first
    List(Vec<String>),
    Set(BTreeSet<String>),
}

impl Entry {
    fn kind(&self) -> &'static str {
        match self {
            Entry::String(_) => "string",
            Entry::List(_) => "list",
            Entry::Set(_) => "set",
        }
    }
}

/// All keys of one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyspace {
    entries: BTreeMap<String, Entry>,
}

impl Keyspace {
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Entry::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), Entry::String(value.to_string()));
    }

    /// Push onto the head of a list, returning the new length.
    pub fn list_prepend(&mut self, key: &str, value: &str) -> Result<usize> {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()));
        match entry {
            Entry::List(items) => {
                items.insert(0, value.to_string());
                Ok(items.len())
            }
            other => Err(wrong_type(key, "list", other)),
        }
    }

    /// Add a set member, returning whether it was not already present.
    pub fn set_add(&mut self, key: &str, member: &str) -> Result<bool> {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Set(BTreeSet::new()));
        match entry {
            Entry::Set(members) => Ok(members.insert(member.to_string())),
            other => Err(wrong_type(key, "set", other)),
        }
    }

    /// List items, head first. Missing keys are empty.
    #[cfg(test)]
    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(items)) => Ok(items.clone()),
            Some(other) => Err(wrong_type(key, "list", other)),
        }
    }

    /// Set members in sorted order. Missing keys are empty.
    #[cfg(test)]
    pub fn members(&self, key: &str) -> Result<Vec<String>> {
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(other) => Err(wrong_type(key, "set", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &str, found: &Entry) -> AppError {
    AppError::store(format!(
        "WRONGTYPE key '{}' holds a {}, expected a {}",
        key,
        found.kind(),
        expected
    ))
}
