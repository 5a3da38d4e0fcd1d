//! Databer - the data container
//!
//! Owns the two stores a program mutates:
//! - Datalings: index-addressed integers, contiguous from 0
//! - Datasubs: name-addressed strings, created before use
//!
//! An append-order log of tagged references records the order in which
//! entries of either kind were introduced, so "render all" can interleave
//! them the way the program created them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::codec;
use super::errors::{DataError, SlotOp};

/* ===================== Log Entries ===================== */

/// Reference to one entry of the Databer, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Entry {
    Dataling(usize),
    Datasub(String),
}

/* ===================== Databer ===================== */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Databer {
    datalings: Vec<i64>,
    datasubs: BTreeMap<String, String>,
    log: Vec<Entry>,
}

impl Databer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a Dataling literal (`-?digits`)
    pub fn parse_value(text: &str) -> Result<i64, DataError> {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::InvalidValue(text.to_string()));
        }
        text.parse()
            .map_err(|_| DataError::InvalidValue(text.to_string()))
    }

    /* ---------- Datalings ---------- */

    /// Append a Dataling, returning its index
    pub fn create_numeric(&mut self, value: i64) -> usize {
        self.datalings.push(value);
        let index = self.datalings.len() - 1;
        self.log.push(Entry::Dataling(index));
        index
    }

    /// Remove a Dataling; later indices shift down by one
    pub fn delete_numeric(&mut self, index: usize) -> Result<(), DataError> {
        if index >= self.datalings.len() {
            return Err(DataError::IndexOutOfRange {
                op: SlotOp::Remove,
                index,
            });
        }
        self.datalings.remove(index);

        self.log.retain(|entry| *entry != Entry::Dataling(index));
        for entry in &mut self.log {
            if let Entry::Dataling(i) = entry {
                if *i > index {
                    *i -= 1;
                }
            }
        }
        Ok(())
    }

    /// Overwrite a Dataling in place
    pub fn update_numeric(&mut self, index: usize, value: i64) -> Result<(), DataError> {
        match self.datalings.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DataError::IndexOutOfRange {
                op: SlotOp::Update,
                index,
            }),
        }
    }

    pub fn read_numeric(&self, index: usize) -> Option<i64> {
        self.datalings.get(index).copied()
    }

    pub fn numeric_len(&self) -> usize {
        self.datalings.len()
    }

    /* ---------- Datasubs ---------- */

    /// Create (or reset) a Datasub with an empty value
    ///
    /// Re-creating an existing name resets it to "" and keeps its
    /// position in the log.
    pub fn create_named(&mut self, name: &str) -> Result<(), DataError> {
        if name.is_empty() {
            return Err(DataError::InvalidName);
        }
        if self
            .datasubs
            .insert(name.to_string(), String::new())
            .is_none()
        {
            self.log.push(Entry::Datasub(name.to_string()));
        }
        Ok(())
    }

    pub fn read_named(&self, name: &str) -> Option<&str> {
        self.datasubs.get(name).map(String::as_str)
    }

    pub fn write_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), DataError> {
        match self.datasubs.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DataError::UnknownName(name.to_string())),
        }
    }

    pub fn delete_named(&mut self, name: &str) -> Result<(), DataError> {
        if self.datasubs.remove(name).is_none() {
            return Err(DataError::UnknownName(name.to_string()));
        }
        self.log
            .retain(|entry| !matches!(entry, Entry::Datasub(n) if n == name));
        Ok(())
    }

    pub fn has_named(&self, name: &str) -> bool {
        self.datasubs.contains_key(name)
    }

    /// Snapshot of every Datasub, by name
    pub fn named_snapshot(&self) -> BTreeMap<String, String> {
        self.datasubs.clone()
    }

    /* ---------- Whole container ---------- */

    pub fn clear_all(&mut self) {
        self.datalings.clear();
        self.datasubs.clear();
        self.log.clear();
    }

    pub fn log(&self) -> &[Entry] {
        &self.log
    }

    /// Render every entry in creation order, without separators
    pub fn render_all(&self) -> String {
        self.log
            .iter()
            .map(|entry| match entry {
                Entry::Dataling(index) => self
                    .datalings
                    .get(*index)
                    .map(|v| render_value(*v))
                    .unwrap_or_default(),
                Entry::Datasub(name) => self.read_named(name).unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Render a single Dataling
    pub fn render_one(&self, index: usize) -> Result<String, DataError> {
        self.read_numeric(index)
            .map(render_value)
            .ok_or(DataError::UnknownIndex(index))
    }
}

fn render_value(value: i64) -> String {
    if codec::in_range(value) {
        codec::encode(value)
    } else {
        value.to_string()
    }
}
