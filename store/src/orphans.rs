//! In-memory pool of blocks waiting for their parent.

use lattice_ledger::Block;
use lattice_types::BlockHash;
use std::collections::HashMap;

/// Blocks that could not be stored because their parent is unknown,
/// keyed by the missing parent hash.
///
/// One block per missing parent: the first entry wins and later ones are
/// ignored. The pool is unbounded; capping it is future work.
#[derive(Default)]
pub struct OrphanPool {
    entries: HashMap<BlockHash, Block>,
}

impl OrphanPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `block` until `parent` arrives. Returns `false` when an entry
    /// for that parent already exists.
    pub fn park(&mut self, parent: BlockHash, block: Block) -> bool {
        use std::collections::hash_map::Entry;
        match self.entries.entry(parent) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(block);
                true
            }
        }
    }

    /// Remove and return the block waiting for `parent`, if any.
    pub fn take(&mut self, parent: &BlockHash) -> Option<Block> {
        self.entries.remove(parent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
