//! Growable record lists
//!
//! The parser never knows up front how many images, control points, masks or
//! comment lines a script holds. Every such collection is a [`RecordList`]
//! that grows one default-initialised slot at a time and reports allocation
//! failure as [`ParseError::OutOfMemory`] instead of aborting the process.

use std::ops::Index;

use super::error::ParseError;

/// An append-only list of parse records
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<T> {
    items: Vec<T>,
}

impl<T> RecordList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Grow by exactly one default slot and hand it back for filling in
    pub fn grow(&mut self) -> Result<&mut T, ParseError>
    where
        T: Default,
    {
        self.items
            .try_reserve(1)
            .map_err(|_| ParseError::OutOfMemory)?;
        self.items.push(T::default());
        self.items.last_mut().ok_or(ParseError::OutOfMemory)
    }

    /// Append an already built record
    pub fn push(&mut self, item: T) -> Result<(), ParseError> {
        self.items
            .try_reserve(1)
            .map_err(|_| ParseError::OutOfMemory)?;
        self.items.push(item);
        Ok(())
    }

    /// Move every record of `other` to the end of this list
    pub fn append(&mut self, other: &mut RecordList<T>) -> Result<(), ParseError> {
        self.items
            .try_reserve(other.items.len())
            .map_err(|_| ParseError::OutOfMemory)?;
        self.items.append(&mut other.items);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for RecordList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a RecordList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
