//! Block producer.

use crate::WalletError;
use lattice_crypto::encode_account;
use lattice_ledger::{Block, BlockKind};
use lattice_store::BlockStore;
use lattice_types::{Amount, BlockHash, KeyPair, PublicKey, Signature, WorkNonce};
use lattice_work::WorkGenerator;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

/// One account's signing keys, chain head, and preloaded work.
///
/// The head starts at the account's stored open block (if any) and
/// advances as this wallet produces blocks. Work generation runs on a
/// detached thread; dropping the wallet abandons a pending task, whose
/// worker runs to completion and discards its result.
pub struct Wallet {
    keys: KeyPair,
    head: Option<Block>,
    work: Option<WorkNonce>,
    pending_work: Option<Receiver<WorkNonce>>,
    store: Arc<BlockStore>,
}

impl Wallet {
    pub fn new(keys: KeyPair, store: Arc<BlockStore>) -> Result<Self, WalletError> {
        let head = store.fetch_open(&keys.public)?;
        Ok(Self {
            keys,
            head,
            work: None,
            pending_work: None,
            store,
        })
    }

    pub fn account(&self) -> PublicKey {
        self.keys.public
    }

    /// The account's textual address.
    pub fn address(&self) -> String {
        encode_account(&self.keys.public)
    }

    pub fn head(&self) -> Option<&Block> {
        self.head.as_ref()
    }

    /// The balance after the current head; zero for an unopened account.
    pub fn balance(&self) -> Result<Amount, WalletError> {
        match &self.head {
            Some(head) => Ok(self.store.balance(head)?),
            None => Ok(Amount::ZERO),
        }
    }

    // ── Asynchronous work generation ────────────────────────────────────

    /// Start generating work for the next block on a worker thread.
    ///
    /// The root is the current head's hash, or the account's public key
    /// while the account is still unopened. Fails while a previous
    /// generation is outstanding or its result has not been consumed.
    pub fn generate_work_async(&mut self) -> Result<(), WalletError> {
        if self.work.is_some() || self.pending_work.is_some() {
            return Err(WalletError::DuplicateWorkTask);
        }

        let root = match &self.head {
            Some(head) => head.hash(),
            None => BlockHash::new(*self.keys.public.as_bytes()),
        };
        let threshold = self.store.work_threshold();
        let (tx, rx) = mpsc::sync_channel(1);

        std::thread::spawn(move || {
            if let Ok(nonce) = WorkGenerator::new().generate(&root, threshold) {
                // A closed channel means the wallet abandoned the task;
                // the result is simply discarded.
                let _ = tx.send(nonce);
            }
        });

        tracing::debug!(%root, "work generation started");
        self.pending_work = Some(rx);
        Ok(())
    }

    /// Whether a work nonce is ready to be consumed.
    pub fn has_work(&mut self) -> bool {
        self.poll_work();
        self.work.is_some()
    }

    /// Take the nonce if one is ready; never blocks.
    pub fn try_take_work(&mut self) -> Option<WorkNonce> {
        self.poll_work();
        self.work.take()
    }

    /// Block until the outstanding generation finishes and take its nonce.
    pub fn wait_work(&mut self) -> Result<WorkNonce, WalletError> {
        if let Some(nonce) = self.work.take() {
            return Ok(nonce);
        }
        let rx = self.pending_work.take().ok_or(WalletError::NoWork)?;
        rx.recv().map_err(|_| WalletError::NoWork)
    }

    fn poll_work(&mut self) {
        if self.work.is_some() {
            return;
        }
        if let Some(rx) = &self.pending_work {
            match rx.try_recv() {
                Ok(nonce) => {
                    self.work = Some(nonce);
                    self.pending_work = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.pending_work = None;
                }
            }
        }
    }

    fn take_work(&mut self) -> Result<WorkNonce, WalletError> {
        self.try_take_work().ok_or(WalletError::NoWork)
    }

    // ── Block production ────────────────────────────────────────────────

    /// Open the account by claiming the Send at `source`.
    pub fn open(
        &mut self,
        source: BlockHash,
        representative: PublicKey,
    ) -> Result<Block, WalletError> {
        if self.head.is_some() || self.store.fetch_open(&self.keys.public)?.is_some() {
            return Err(WalletError::AlreadyOpen);
        }
        self.require_send_to_self(&source)?;
        let work = self.take_work()?;
        let block = Block::open(
            source,
            representative,
            self.keys.public,
            work,
            Signature::ZERO,
        );
        self.seal(block)
    }

    /// Send `amount` to `destination`.
    pub fn send(
        &mut self,
        destination: PublicKey,
        amount: Amount,
    ) -> Result<Block, WalletError> {
        let head = self.head.clone().ok_or(WalletError::EmptyAccount)?;
        let available = self.store.balance(&head)?;
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(WalletError::InsufficientBalance {
                    requested: amount,
                    available,
                })?;
        let work = self.take_work()?;
        let block = Block::send(head.hash(), destination, remaining, work, Signature::ZERO);
        self.seal(block)
    }

    /// Claim the Send at `source` into this account.
    pub fn receive(&mut self, source: BlockHash) -> Result<Block, WalletError> {
        let head = self.head.clone().ok_or(WalletError::EmptyAccount)?;
        self.require_send_to_self(&source)?;
        let work = self.take_work()?;
        let block = Block::receive(head.hash(), source, work, Signature::ZERO);
        self.seal(block)
    }

    /// Re-delegate voting weight to `representative`.
    pub fn change(&mut self, representative: PublicKey) -> Result<Block, WalletError> {
        let head = self.head.clone().ok_or(WalletError::EmptyAccount)?;
        let work = self.take_work()?;
        let block = Block::change(head.hash(), representative, work, Signature::ZERO);
        self.seal(block)
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Sign the block, check its work against the root it will actually
    /// be published with, and advance the head.
    fn seal(&mut self, mut block: Block) -> Result<Block, WalletError> {
        block.sign(&self.keys.private);
        if !block.verify_work(self.store.work_threshold()) {
            return Err(WalletError::StaleWork);
        }
        tracing::debug!(hash = %block.hash(), kind = block.kind_name(), "produced block");
        self.head = Some(block.clone());
        Ok(block)
    }

    fn require_send_to_self(&self, source: &BlockHash) -> Result<(), WalletError> {
        match self.store.fetch(source)? {
            Some(block) => match &block.kind {
                BlockKind::Send { destination, .. } if *destination == self.keys.public => Ok(()),
                _ => Err(WalletError::UnknownSource(*source)),
            },
            None => Err(WalletError::UnknownSource(*source)),
        }
    }
}
