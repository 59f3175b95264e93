use super::combine::{backward_combine, forward_combine};
use crate::key::{Block, Iv, Key};

/// Encode blocks in place and advance the IV
/// Two chained passes, then the IV is wrapped with the key product and first block
///
/// Callers must validate first; an empty slice is left untouched.
pub fn encode_blocks(key: &Key, iv: &mut Iv, data: &mut [Block]) {
    if data.is_empty() {
        return;
    }

    // Low-seeded chain, first to last: each block mixes in its encoded predecessor
    let mut previous = key.low;
    for block in data.iter_mut() {
        *block = forward_combine(iv, *block, previous);
        previous = *block;
    }

    // High-seeded chain, last to first: each block mixes in its encoded successor
    let mut next = key.high;
    for block in data.iter_mut().rev() {
        *block = forward_combine(iv, *block, next);
        next = *block;
    }

    wrap_iv(key, iv, data[0]);
}

/// Decode blocks in place and restore the IV supplied to `encode_blocks`
pub fn decode_blocks(key: &Key, iv: &mut Iv, data: &mut [Block]) {
    if data.is_empty() {
        return;
    }
    let last = data.len() - 1;

    unwrap_iv(key, iv, data[0]);

    // Undo the high-seeded chain, first to last.
    // data[index + 1] is still ciphertext when it is read.
    for index in 0..=last {
        let right = if index == last { key.high } else { data[index + 1] };
        data[index] = backward_combine(iv, data[index], right);
    }

    // Undo the low-seeded chain, last to first.
    // data[index - 1] is still intermediate when it is read.
    for index in (0..=last).rev() {
        let left = if index == 0 { key.low } else { data[index - 1] };
        data[index] = backward_combine(iv, data[index], left);
    }
}

/// Fold the key product, then the first encoded block, into the IV.
/// Uses its own counter starting at zero.
fn wrap_iv(key: &Key, iv: &mut Iv, first: Block) {
    let mut local: u32 = 0;
    *iv = forward_combine(&mut local, *iv, key.product());
    *iv = forward_combine(&mut local, *iv, first);
}

/// Fold the first encoded block, then the key product, back out of the IV.
/// The operand order is reversed from `wrap_iv` but the counter offsets are
/// the same, so the two XORs cancel.
fn unwrap_iv(key: &Key, iv: &mut Iv, first: Block) {
    let mut local: u32 = 0;
    *iv = forward_combine(&mut local, *iv, first);
    *iv = forward_combine(&mut local, *iv, key.product());
}
