use crate::error::{ObfError, Result};
use crate::key::Block;

pub const BLOCK_BYTES: usize = std::mem::size_of::<Block>();

/// Pack bytes into little-endian blocks, zero-padding the final block
pub fn bytes_to_blocks(bytes: &[u8]) -> Vec<Block> {
    bytes
        .chunks(BLOCK_BYTES)
        .map(|chunk| {
            let mut word = [0u8; BLOCK_BYTES];
            word[..chunk.len()].copy_from_slice(chunk);
            Block::from_le_bytes(word)
        })
        .collect()
}

/// Unpack blocks into bytes and drop the padding beyond `byte_length`
pub fn blocks_to_bytes(blocks: &[Block], byte_length: usize) -> Result<Vec<u8>> {
    let available = blocks.len() * BLOCK_BYTES;
    if byte_length > available {
        return Err(ObfError::InvalidFormat(format!(
            "byte length {} exceeds {} bytes of blocks",
            byte_length, available
        )));
    }

    let mut bytes: Vec<u8> = blocks.iter().flat_map(|b| b.to_le_bytes()).collect();
    bytes.truncate(byte_length);
    Ok(bytes)
}

/// Number of blocks needed to hold `byte_length` bytes
pub fn block_count_for(byte_length: usize) -> usize {
    byte_length.div_ceil(BLOCK_BYTES)
}
