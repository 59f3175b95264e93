//! Obf - Reversible Counter-Chained Block Obfuscation
//!
//! Scrambles a caller-owned array of 32-bit blocks in place using a
//! 64-bit two-part key and a mutable 32-bit IV. The transform is fast,
//! bit-exact and invertible. It is obfuscation, not encryption: there is
//! no claim of confidentiality or integrity.
//!
//! ## Transform
//!
//! ```text
//! Encode: Low chain (first→last) → High chain (last→first) → Wrap IV
//! Decode: Unwrap IV → Undo high chain (first→last) → Undo low chain (last→first)
//! ```
//!
//! - **Low chain**: each block is XORed with its encoded predecessor
//!   (the key low part for the first block) and the post-incremented IV
//! - **High chain**: each block is XORed with its encoded successor
//!   (the key high part for the last block) and the post-incremented IV
//! - **Wrap**: the key-part product and the first encoded block are folded
//!   into the IV with a separate counter starting at zero
//!
//! Decoding runs the same steps backwards with a pre-decremented IV, so
//! after a round trip both the blocks and the IV are restored exactly.
//!
//! ## Example
//!
//! ```
//! use obf::{decode, encode, Key, API_VERSION};
//!
//! assert_eq!(API_VERSION, 1);
//! let key = Key::new(0x0000_0001, 0x0000_0002);
//! let mut iv: u32 = 0;
//! let mut blocks: [u32; 2] = [0x1111_1111, 0x2222_2222];
//!
//! encode(Some(&key), Some(&mut iv), Some(&mut blocks), 2).unwrap();
//! assert_ne!(blocks, [0x1111_1111, 0x2222_2222]);
//!
//! decode(Some(&key), Some(&mut iv), Some(&mut blocks), 2).unwrap();
//! assert_eq!(blocks, [0x1111_1111, 0x2222_2222]);
//! assert_eq!(iv, 0);
//! ```

pub mod cli;
pub mod codec;
pub mod container;
pub mod error;
pub mod format;
pub mod key;
pub mod pipeline;

/// Version of the public encode/decode contract
pub const API_VERSION: u32 = 1;

pub use codec::{decode, decode_slice, encode, encode_slice};
pub use error::{ObfError, Result, Status};
pub use key::{Block, Iv, Key};
