//! The Curl sponge function over balanced ternary.

use crate::trits::Trit;
use crate::HASH_TRITS;

/// Width of the sponge state in trits.
pub const STATE_TRITS: usize = HASH_TRITS * 3;

/// Number of mixing rounds per transform.
pub const NUM_ROUNDS: usize = 27;

/// Substitution box indexed by `prev + 3 * next + 4`.
const TRUTH_TABLE: [Trit; 9] = [1, 0, -1, 1, -1, 0, -1, 1, 0];

/// A Curl sponge instance.
///
/// Input and output are moved through the state in 243-trit blocks, with a
/// full transform between blocks. Each hashing operation owns its sponge;
/// call [`reset`](Curl::reset) to reuse one for an unrelated input.
#[derive(Clone)]
pub struct Curl {
    state: [Trit; STATE_TRITS],
}

impl Default for Curl {
    fn default() -> Self {
        Self::new()
    }
}

impl Curl {
    pub fn new() -> Self {
        Self {
            state: [0; STATE_TRITS],
        }
    }

    /// Clears the state so the sponge can absorb a fresh input.
    pub fn reset(&mut self) {
        self.state = [0; STATE_TRITS];
    }

    /// Absorbs `trits` into the state, transforming after every 243-trit
    /// block. A partial final block is zero-padded to a full block.
    pub fn absorb(&mut self, trits: &[Trit]) {
        let mut offset = 0;
        loop {
            let end = (offset + HASH_TRITS).min(trits.len());
            let copied = end - offset;
            self.state[..copied].copy_from_slice(&trits[offset..end]);
            self.state[copied..HASH_TRITS].fill(0);
            self.transform();

            offset += HASH_TRITS;
            if offset >= trits.len() {
                break;
            }
        }
    }

    /// Squeezes `out.len()` trits from the state, transforming after every
    /// 243-trit block.
    pub fn squeeze(&mut self, out: &mut [Trit]) {
        let mut offset = 0;
        loop {
            let end = (offset + HASH_TRITS).min(out.len());
            out[offset..end].copy_from_slice(&self.state[..end - offset]);
            self.transform();

            offset += HASH_TRITS;
            if offset >= out.len() {
                break;
            }
        }
    }

    fn transform(&mut self) {
        let mut index = 0usize;

        for _ in 0..NUM_ROUNDS {
            let prev_state = self.state;

            for cell in self.state.iter_mut() {
                let prev_trit = prev_state[index];
                index = if index < 365 { index + 364 } else { index - 365 };
                let lookup = prev_trit + 3 * prev_state[index] + 4;
                *cell = TRUTH_TABLE[lookup as usize];
            }
        }
    }
}
