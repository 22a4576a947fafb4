//! LMDB-backed block store.
//!
//! Two named databases: `blocks` maps a 32-byte block hash to the
//! bincode-serialized block, `opens` maps a 32-byte account public key to
//! the hash of that account's open block. The orphan pool and the balance
//! memo live in memory inside the store's lock domain.

use crate::orphans::OrphanPool;
use crate::StoreError;
use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use lattice_ledger::genesis::GENESIS_AMOUNT;
use lattice_ledger::{Block, BlockKind};
use lattice_types::{Amount, BlockHash, PublicKey};
use lattice_work::validate_work;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

const MAP_SIZE: usize = 1 << 30;

/// Configuration for opening a block store.
pub struct StoreConfig {
    /// Directory holding the LMDB environment (created if absent).
    pub path: PathBuf,
    /// The network's genesis open block, written on first start.
    pub genesis: Block,
    /// Work threshold every stored block must meet.
    pub work_threshold: u64,
}

/// What `store` did with a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The block is in the persistent index.
    Stored,
    /// The parent is unknown; the block waits in the orphan pool.
    Parked,
}

/// Persistent hash→block index with an account→open secondary index.
pub struct BlockStore {
    env: Env,
    blocks: Database<Bytes, Bytes>,
    opens: Database<Bytes, Bytes>,
    genesis: Block,
    work_threshold: u64,
    orphans: Mutex<OrphanPool>,
    balances: Mutex<HashMap<BlockHash, Amount>>,
}

impl BlockStore {
    /// Open (or create) the store and make sure the genesis block is
    /// present.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(MAP_SIZE)
                .max_dbs(2)
                .open(&config.path)?
        };
        let mut wtxn = env.write_txn()?;
        let blocks = env.create_database(&mut wtxn, Some("blocks"))?;
        let opens = env.create_database(&mut wtxn, Some("opens"))?;
        wtxn.commit()?;

        let store = Self {
            env,
            blocks,
            opens,
            genesis: config.genesis,
            work_threshold: config.work_threshold,
            orphans: Mutex::new(OrphanPool::new()),
            balances: Mutex::new(HashMap::new()),
        };

        let genesis_hash = store.genesis.hash();
        if store.fetch(&genesis_hash)?.is_none() {
            tracing::info!(hash = %genesis_hash, "writing genesis block");
            let genesis = store.genesis.clone();
            store.insert(&genesis)?;
        }

        Ok(store)
    }

    /// The network's genesis open block.
    pub fn genesis(&self) -> &Block {
        &self.genesis
    }

    /// The work threshold stored blocks are validated against.
    pub fn work_threshold(&self) -> u64 {
        self.work_threshold
    }

    /// Accept a block: validate work and signature, insert it or park it
    /// on its missing parent, then reconnect any orphans it unblocks.
    pub fn store(&self, block: &Block) -> Result<StoreOutcome, StoreError> {
        let outcome = self.accept(block)?;
        if let StoreOutcome::Stored = outcome {
            self.graduate_orphans(block.hash());
        }
        Ok(outcome)
    }

    /// Look up a block by hash.
    pub fn fetch(&self, hash: &BlockHash) -> Result<Option<Block>, StoreError> {
        let rtxn = self.env.read_txn()?;
        match self.blocks.get(&rtxn, hash.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Look up an account's open block through the secondary index.
    pub fn fetch_open(&self, account: &PublicKey) -> Result<Option<Block>, StoreError> {
        let rtxn = self.env.read_txn()?;
        let Some(hash_bytes) = self.opens.get(&rtxn, account.as_bytes())? else {
            return Ok(None);
        };
        match self.blocks.get(&rtxn, hash_bytes)? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Err(StoreError::Corrupt(
                "open index points at a missing block".into(),
            )),
        }
    }

    /// Number of blocks currently parked in the orphan pool.
    pub fn orphan_count(&self) -> usize {
        self.orphans.lock().expect("orphan pool lock").len()
    }

    /// Derive the balance an account holds after `block`.
    ///
    /// Walks ancestors (and, for receives and opens, the referenced send
    /// chains); results are memoized per block hash. The walk carries a
    /// visiting set so a corrupt store cannot make it loop forever.
    pub fn balance(&self, block: &Block) -> Result<Amount, StoreError> {
        let mut visiting = HashSet::new();
        self.balance_of(block, &mut visiting)
    }

    // ── Acceptance pipeline ─────────────────────────────────────────────

    fn accept(&self, block: &Block) -> Result<StoreOutcome, StoreError> {
        let hash = block.hash();

        if !validate_work(&block.root(), block.work, self.work_threshold) {
            return Err(StoreError::InvalidWork(hash));
        }

        if self.fetch(&hash)?.is_some() {
            return Ok(StoreOutcome::Stored);
        }

        let parent = block.previous();
        if self.fetch(&parent)?.is_none() {
            let mut orphans = self.orphans.lock().expect("orphan pool lock");
            if orphans.park(parent, block.clone()) {
                tracing::debug!(%hash, %parent, pooled = orphans.len(), "parked block awaiting parent");
            }
            return Ok(StoreOutcome::Parked);
        }

        let account = self.account_of(block)?;
        if !block.verify_signature(&account) {
            return Err(StoreError::InvalidSignature(hash));
        }

        self.insert(block)?;
        tracing::debug!(%hash, kind = block.kind_name(), "stored block");
        Ok(StoreOutcome::Stored)
    }

    /// Drain the orphan chain unblocked by the arrival of `parent`.
    ///
    /// Failures here are logged, not returned: a parked block that turns
    /// out to be invalid must not fail the store of the block that
    /// triggered its reconnection.
    fn graduate_orphans(&self, mut parent: BlockHash) {
        loop {
            let waiting = self.orphans.lock().expect("orphan pool lock").take(&parent);
            let Some(child) = waiting else { return };
            let child_hash = child.hash();
            match self.accept(&child) {
                Ok(StoreOutcome::Stored) => {
                    tracing::debug!(block = %child_hash, "reconnected parked block");
                    parent = child_hash;
                }
                Ok(StoreOutcome::Parked) => return,
                Err(err) => {
                    tracing::warn!(block = %child_hash, %err, "dropping invalid parked block");
                    return;
                }
            }
        }
    }

    /// Resolve the account that owns `block` by walking `previous` links
    /// back to the chain's open block. Callers have already established
    /// that the immediate parent is stored, so the walk terminates on any
    /// non-corrupt store.
    fn account_of(&self, block: &Block) -> Result<PublicKey, StoreError> {
        if let BlockKind::Open { account, .. } = &block.kind {
            return Ok(*account);
        }
        let mut cursor = block.previous();
        let mut visited = HashSet::new();
        loop {
            if !visited.insert(cursor) {
                return Err(StoreError::ChainCycle(cursor));
            }
            let parent = self.fetch(&cursor)?.ok_or_else(|| {
                StoreError::Corrupt(format!("missing ancestor {cursor} while resolving account"))
            })?;
            if let BlockKind::Open { account, .. } = &parent.kind {
                return Ok(*account);
            }
            cursor = parent.previous();
        }
    }

    fn insert(&self, block: &Block) -> Result<(), StoreError> {
        let hash = block.hash();
        let value = bincode::serialize(block)?;
        let mut wtxn = self.env.write_txn()?;
        self.blocks.put(&mut wtxn, hash.as_bytes(), &value)?;
        if let BlockKind::Open { account, .. } = &block.kind {
            self.opens.put(&mut wtxn, account.as_bytes(), hash.as_bytes())?;
        }
        wtxn.commit()?;
        Ok(())
    }

    // ── Balance derivation ──────────────────────────────────────────────

    fn balance_of(
        &self,
        block: &Block,
        visiting: &mut HashSet<BlockHash>,
    ) -> Result<Amount, StoreError> {
        let hash = block.hash();
        if let Some(cached) = self
            .balances
            .lock()
            .expect("balance cache lock")
            .get(&hash)
            .copied()
        {
            return Ok(cached);
        }
        if !visiting.insert(hash) {
            return Err(StoreError::ChainCycle(hash));
        }

        let amount = match &block.kind {
            BlockKind::Open { source, .. } => {
                if *source == self.genesis.previous() {
                    GENESIS_AMOUNT
                } else {
                    self.send_amount(source, visiting)?
                }
            }
            BlockKind::Send { balance, .. } => *balance,
            BlockKind::Receive { previous, source } => {
                let prev = self.must_fetch(previous)?;
                let received = self.send_amount(source, visiting)?;
                self.balance_of(&prev, visiting)?.wrapping_add(received)
            }
            BlockKind::Change { previous, .. } => {
                let prev = self.must_fetch(previous)?;
                self.balance_of(&prev, visiting)?
            }
        };

        visiting.remove(&hash);
        self.balances
            .lock()
            .expect("balance cache lock")
            .insert(hash, amount);
        Ok(amount)
    }

    /// The amount moved by the Send at `source`: the balance before it
    /// minus the balance it embeds.
    fn send_amount(
        &self,
        source: &BlockHash,
        visiting: &mut HashSet<BlockHash>,
    ) -> Result<Amount, StoreError> {
        let send = self
            .fetch(source)?
            .ok_or(StoreError::UnknownSource(*source))?;
        let BlockKind::Send {
            previous, balance, ..
        } = &send.kind
        else {
            return Err(StoreError::UnknownSource(*source));
        };
        let prev = self.must_fetch(previous)?;
        let before = self.balance_of(&prev, visiting)?;
        Ok(before.wrapping_sub(*balance))
    }

    fn must_fetch(&self, hash: &BlockHash) -> Result<Block, StoreError> {
        self.fetch(hash)?
            .ok_or_else(|| StoreError::Corrupt(format!("missing ancestor block {hash}")))
    }
}
