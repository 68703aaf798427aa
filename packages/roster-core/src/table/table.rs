//! Id-keyed record table.

use std::collections::BTreeMap;

use crate::error::DbError;

/// Table of records keyed by a `u64` id.
///
/// Ids handed out by the table start at 1 and only grow. Explicit ids are
/// accepted as long as they are free, and move the sequence past them.
/// Once the sequence reaches the top of the id space, auto ids fall back to
/// the lowest free id.
#[derive(Debug, Clone)]
pub struct Table<R> {
    /// Table name used in error messages and logs
    pub name: &'static str,
    records: BTreeMap<u64, R>,
    next_id: u64,
}

impl<R> Table<R> {
    /// Creates an empty table.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Returns the id the next auto-assigned record will get.
    pub fn current_next_id(&self) -> u64 {
        self.next_id
    }

    /// Returns the number of live records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if a record with `id` exists.
    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    /// Resolves the id a new record would be stored under without changing
    /// the table.
    ///
    /// # Arguments
    /// * `requested` - Explicit id, or `None` for the next free one
    ///
    /// # Returns
    /// `Result<u64, DbError>` with the id, `DuplicateId` if an explicit id is
    /// taken, or `InvalidId` if every id is in use.
    pub fn reserve_id(&self, requested: Option<u64>) -> Result<u64, DbError> {
        match requested {
            Some(id) if self.records.contains_key(&id) => Err(DbError::DuplicateId {
                table: self.name,
                id,
            }),
            Some(id) => Ok(id),
            None => {
                // Skip ids claimed explicitly ahead of the sequence
                let mut id = self.next_id;
                while self.records.contains_key(&id) {
                    match id.checked_add(1) {
                        Some(following) => id = following,
                        None => return self.lowest_free_id(),
                    }
                }
                Ok(id)
            }
        }
    }

    /// Stores `record` under an id previously returned by [`Table::reserve_id`].
    ///
    /// The sequence moves past `id` unless `id` is the last representable one.
    pub fn create_record(&mut self, id: u64, record: R) -> Result<u64, DbError> {
        let id = self.reserve_id(Some(id))?;
        self.records.insert(id, record);
        if let Some(following) = id.checked_add(1) {
            self.next_id = self.next_id.max(following);
        }
        Ok(id)
    }

    /// Fallback once the sequence has reached the top of the id space.
    fn lowest_free_id(&self) -> Result<u64, DbError> {
        (1..=u64::MAX)
            .find(|id| !self.records.contains_key(id))
            .ok_or(DbError::InvalidId {
                table: self.name,
                id: u64::MAX,
            })
    }

    /// Reads a record by id.
    pub fn read_record(&self, id: u64) -> Option<&R> {
        self.records.get(&id)
    }

    /// Mutable access to a record by id.
    pub fn update_record(&mut self, id: u64) -> Option<&mut R> {
        self.records.get_mut(&id)
    }

    /// Removes a record and returns it.
    pub fn delete_record(&mut self, id: u64) -> Option<R> {
        self.records.remove(&id)
    }

    /// Iterates over records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &R)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }
}
