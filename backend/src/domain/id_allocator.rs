//! Identifier allocation for new student records.
//!
//! The allocator keeps a high-water mark: every identifier it returns is
//! strictly greater than any identifier it has observed or issued before, so
//! deleting records never lets an identifier be reused.

use super::student::StudentId;

/// Error raised when the identifier space is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("student identifier space exhausted")]
pub struct IdExhausted;

/// Deterministic, monotonic identifier source.
///
/// # Examples
/// ```
/// use student_records::domain::{IdAllocator, StudentId};
///
/// let existing = [StudentId::new(1).unwrap(), StudentId::new(2).unwrap()];
/// let mut allocator = IdAllocator::seeded(existing);
/// assert_eq!(allocator.next_id().unwrap().get(), 3);
/// assert_eq!(allocator.next_id().unwrap().get(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdAllocator {
    high_water: i64,
}

impl IdAllocator {
    /// Allocator for an empty collection; the first identifier is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { high_water: 0 }
    }

    /// Allocator positioned after every identifier in `existing`.
    #[must_use]
    pub fn seeded(existing: impl IntoIterator<Item = StudentId>) -> Self {
        let mut allocator = Self::new();
        for id in existing {
            allocator.observe(id);
        }
        allocator
    }

    /// Record an identifier that exists in the collection.
    pub fn observe(&mut self, id: StudentId) {
        self.high_water = self.high_water.max(id.get());
    }

    /// Highest identifier observed or issued so far.
    #[must_use]
    pub fn high_water(&self) -> Option<StudentId> {
        StudentId::new(self.high_water).ok()
    }

    /// Issue the next identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdExhausted`] once `i64::MAX` has been issued.
    pub fn next_id(&mut self) -> Result<StudentId, IdExhausted> {
        let next = self.high_water.checked_add(1).ok_or(IdExhausted)?;
        let id = StudentId::new(next).map_err(|_| IdExhausted)?;
        self.high_water = next;
        Ok(id)
    }
}
