//! Genesis blocks for the live and test networks.
//!
//! A genesis block is an Open whose `source` is the account's own public
//! key; it is inserted unconditionally when a store is first created and
//! anchors every balance derivation.

use crate::block::Block;
use lattice_types::{Amount, BlockHash, PublicKey, Signature, WorkNonce};

/// The amount held by a genesis account: the full 2^128 − 1 supply.
pub const GENESIS_AMOUNT: Amount = Amount::MAX;

/// Hash of the live network's genesis open block.
pub const LIVE_GENESIS_HASH: &str =
    "991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948";

/// Public key (and self-referential source) of the live genesis account,
/// `nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3`.
const LIVE_GENESIS_SOURCE: &str =
    "E89208DD038FBB269987689621D52292AE9C35941A7484756ECCED92A65093BA";

const LIVE_GENESIS_WORK: &str = "62f05417dd3fb691";

const LIVE_GENESIS_SIGNATURE: &str =
    "9F0C933C8ADE004D808EA1985FA746A7E95BA2A38F867640F53EC8F180BDFE9E\
     2C1268DEAD7C2664F356E37ABA362BC58E46DBA03E523A7B5A19E4B6EB12BB02";

/// Public key (and self-referential source) of the test genesis account,
/// `nano_3e3j5tkog48pnny9dmfzj1r16pg8t1e76dz5tmac6iq689wyjfpiij4txtdo`.
const TEST_GENESIS_SOURCE: &str =
    "B0311EA55708D6A53C75CDBF88300259C6D018522FE3D4D0A242E431F9E8B6D0";

const TEST_GENESIS_WORK: &str = "9680625b39d3363d";

const TEST_GENESIS_SIGNATURE: &str =
    "ECDA914373A2F0CA1296475BAEE40500A7F0A7AD72A5A80C81D7FAB7F6C802B2\
     CC7DB50F5DD0FB25B2EF11761FA7344A158DD5A700B21BD47DE5BD0F63153A02";

/// The published private key of the test genesis account. Useful for
/// exercising the full produce/sign/store path against the test network.
pub const TEST_PRIVATE_KEY: &str =
    "34F0A37AAD20F4A260F0A5B3CB3D7FB50673212263E58A380BC10474BB039CE4";

fn build_genesis(source_hex: &str, work_hex: &str, signature_hex: &str) -> Block {
    let source = BlockHash::from_hex(source_hex).expect("genesis source constant");
    let account = PublicKey::from_hex(source_hex).expect("genesis account constant");
    let work = WorkNonce::from_hex(work_hex).expect("genesis work constant");
    let signature = Signature::from_hex(signature_hex).expect("genesis signature constant");
    Block::open(source, account, account, work, signature)
}

/// The live network's genesis open block.
pub fn live_genesis() -> Block {
    build_genesis(LIVE_GENESIS_SOURCE, LIVE_GENESIS_WORK, LIVE_GENESIS_SIGNATURE)
}

/// The test network's genesis open block, owned by [`TEST_PRIVATE_KEY`].
pub fn test_genesis() -> Block {
    build_genesis(TEST_GENESIS_SOURCE, TEST_GENESIS_WORK, TEST_GENESIS_SIGNATURE)
}
