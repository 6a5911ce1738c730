//! Random selection of the mesh's private address blocks.
//!
//! Both selectors take the random source by reference; callers create one
//! source per process and pass it to each call.

use rand::RngCore;

use crate::types::{PrivateNetworkBlock, UlaNetworkBlock};

/// Pick a random /22 inside 10.0.0.0/8 (1022 usable hosts).
///
/// Draws two bytes `b0`, `b1` and returns `10.b0.(b1 & 0xfc).0/22`.
pub fn private_network<R: RngCore + ?Sized>(rng: &mut R) -> PrivateNetworkBlock {
    let mut rbs = [0u8; 2];
    rng.fill_bytes(&mut rbs);

    PrivateNetworkBlock::from_random_bytes(rbs)
}

/// Pick a random /64 inside fd00::/8.
///
/// Draws a 40-bit global ID; the 16-bit subnet ID is zero.
pub fn ula_network<R: RngCore + ?Sized>(rng: &mut R) -> UlaNetworkBlock {
    let mut id = [0u8; 5];
    rng.fill_bytes(&mut id);

    UlaNetworkBlock::from_global_id(id)
}
