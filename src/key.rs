use crate::error::{ObfError, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// One unit of data being transformed
pub type Block = u32;

/// Running chain counter, mutated in place by encode/decode
pub type Iv = u32;

/// Two-part obfuscation key
/// The raw 64-bit view packs `high` above `low`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Key {
    pub low: u32,
    pub high: u32,
}

impl Key {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn from_raw(raw: u64) -> Self {
        Self {
            low: raw as u32,
            high: (raw >> 32) as u32,
        }
    }

    pub fn raw(&self) -> u64 {
        (u64::from(self.high) << 32) | u64::from(self.low)
    }

    /// Product of the key parts, folded into the IV by wrap/unwrap
    pub fn product(&self) -> u32 {
        self.low.wrapping_mul(self.high)
    }

    /// Draw a fresh key from the supplied RNG
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self {
            low: rng.next_u32(),
            high: rng.next_u32(),
        }
    }
}

impl From<u64> for Key {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Key> for u64 {
    fn from(key: Key) -> Self {
        key.raw()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}{:08X}", self.high, self.low)
    }
}

impl std::str::FromStr for Key {
    type Err = ObfError;
    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 8] = decode_hex(s)?;
        Ok(Self::from_raw(u64::from_be_bytes(bytes)))
    }
}

/// Draw a fresh IV from the supplied RNG
pub fn generate_iv<R: RngCore + ?Sized>(rng: &mut R) -> Iv {
    rng.next_u32()
}

/// Parse an IV written as 8 hex digits
pub fn parse_iv(s: &str) -> Result<Iv> {
    let bytes: [u8; 4] = decode_hex(s)?;
    Ok(u32::from_be_bytes(bytes))
}

pub fn format_iv(iv: Iv) -> String {
    format!("{:08X}", iv)
}

/// Decode exactly N bytes of hex, accepting an optional 0x prefix
fn decode_hex<const N: usize>(s: &str) -> Result<[u8; N]> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != N * 2 {
        return Err(ObfError::InvalidHex(format!(
            "expected {} hex digits, got {}",
            N * 2,
            digits.len()
        )));
    }

    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|e| ObfError::InvalidHex(format!("{}: {}", s, e)))?;
    Ok(out)
}
