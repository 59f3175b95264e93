use crate::error::Result;
use crate::key::{Block, Iv, Key};
use crate::pipeline::{decode_blocks, encode_blocks, validate};
use tracing::{debug, warn};

/// Encode the first `length` blocks of `data` in place and advance `iv`.
///
/// Arguments are validated first (key, IV, data, length, in that order).
/// On error neither `iv` nor `data` is modified.
pub fn encode(
    key: Option<&Key>,
    iv: Option<&mut Iv>,
    data: Option<&mut [Block]>,
    length: usize,
) -> Result<()> {
    let (key, iv, data) = validate(key, iv, data, length).map_err(|e| {
        warn!(error = %e, length, "rejected encode arguments");
        e
    })?;
    debug!(blocks = length, "encoding");
    encode_blocks(key, iv, data);
    Ok(())
}

/// Decode the first `length` blocks of `data` in place and restore `iv`.
///
/// `iv` must hold the value produced by the matching `encode` call.
pub fn decode(
    key: Option<&Key>,
    iv: Option<&mut Iv>,
    data: Option<&mut [Block]>,
    length: usize,
) -> Result<()> {
    let (key, iv, data) = validate(key, iv, data, length).map_err(|e| {
        warn!(error = %e, length, "rejected decode arguments");
        e
    })?;
    debug!(blocks = length, "decoding");
    decode_blocks(key, iv, data);
    Ok(())
}

/// Encode a whole slice; an empty slice is `InvalidLength`
pub fn encode_slice(key: &Key, iv: &mut Iv, data: &mut [Block]) -> Result<()> {
    let length = data.len();
    encode(Some(key), Some(iv), Some(data), length)
}

/// Decode a whole slice; an empty slice is `InvalidLength`
pub fn decode_slice(key: &Key, iv: &mut Iv, data: &mut [Block]) -> Result<()> {
    let length = data.len();
    decode(Some(key), Some(iv), Some(data), length)
}
