//! Core entities for schedule planning.

use super::value_objects::{AccessProfile, CellId, TxId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One scheduling unit: an identity plus its declared cell footprint.
///
/// Immutable once parsed. Owned by the [`Batch`]; every other structure
/// refers to transactions by position, never by copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based identity as seen on the wire.
    pub id: TxId,
    /// Declared read/write cell sets.
    pub profile: AccessProfile,
}

impl Transaction {
    pub fn new(id: TxId, profile: AccessProfile) -> Self {
        Self { id, profile }
    }
}

/// A batch of transactions to plan. Position `p` holds the transaction
/// with id `p + 1`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Batch {
    pub transactions: Vec<Transaction>,
}

impl Batch {
    /// Build a batch from profiles, assigning 1-based ids in input order.
    pub fn from_profiles(profiles: Vec<AccessProfile>) -> Self {
        let transactions = profiles
            .into_iter()
            .enumerate()
            .map(|(p, profile)| Transaction::new(p as TxId + 1, profile))
            .collect();
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, position: usize) -> &Transaction {
        &self.transactions[position]
    }
}

/// Cells written by some already-placed transaction.
///
/// Process-local to one sequencing run. Grows monotonically: there is no
/// removal operation, so a transaction that loses eligibility can never
/// regain it within the run.
#[derive(Clone, Debug, Default)]
pub struct CorruptedCells {
    cells: HashSet<CellId>,
}

impl CorruptedCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains(&cell)
    }

    /// True iff none of the profile's reads touches a corrupted cell.
    pub fn allows(&self, profile: &AccessProfile) -> bool {
        profile.reads.is_disjoint(&self.cells)
    }

    /// Union the profile's writes into the corrupted set.
    pub fn absorb(&mut self, profile: &AccessProfile) {
        self.cells.extend(profile.writes.iter().copied());
    }

    /// Number of the profile's reads not yet corrupted.
    pub fn clean_reads(&self, profile: &AccessProfile) -> usize {
        profile.reads.difference(&self.cells).count()
    }

    /// Number of the profile's writes that would corrupt a new cell.
    pub fn fresh_writes(&self, profile: &AccessProfile) -> usize {
        profile.writes.difference(&self.cells).count()
    }
}

/// Derived index from a cell to the positions of transactions reading it.
///
/// Read-only after construction. Lets the impact scorer estimate how many
/// peers a candidate's writes would invalidate without rescanning the batch.
#[derive(Debug, Clone)]
pub struct CellReaders {
    readers: HashMap<CellId, Vec<usize>>,
}

impl CellReaders {
    pub fn build(batch: &Batch) -> Self {
        let mut readers: HashMap<CellId, Vec<usize>> = HashMap::new();
        for (position, tx) in batch.transactions.iter().enumerate() {
            for &cell in &tx.profile.reads {
                readers.entry(cell).or_default().push(position);
            }
        }
        Self { readers }
    }

    pub fn readers_of(&self, cell: CellId) -> &[usize] {
        self.readers.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct cells that have at least one reader.
    pub fn read_cell_count(&self) -> usize {
        self.readers.len()
    }
}

/// An ordered sequence of transaction ids forming the planned schedule.
///
/// Valid at every point during construction: each appended transaction was
/// eligible against the corrupted set at append time, so any prefix is a
/// consistent schedule on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    order: Vec<TxId>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_order(order: Vec<TxId>) -> Self {
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn push(&mut self, id: TxId) {
        self.order.push(id);
    }

    pub fn order(&self) -> &[TxId] {
        &self.order
    }

    pub fn contains(&self, id: TxId) -> bool {
        self.order.contains(&id)
    }
}
