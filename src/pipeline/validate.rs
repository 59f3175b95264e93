use crate::error::{ObfError, Result};
use crate::key::{Block, Iv, Key};

/// Check encode/decode arguments before anything is touched.
/// Checks run in order: key, IV, data, length. The first failure wins.
///
/// On success the arguments come back unwrapped, with `data` cut to its
/// first `length` blocks.
pub fn validate<'k, 'i, 'd>(
    key: Option<&'k Key>,
    iv: Option<&'i mut Iv>,
    data: Option<&'d mut [Block]>,
    length: usize,
) -> Result<(&'k Key, &'i mut Iv, &'d mut [Block])> {
    let key = key.ok_or(ObfError::InvalidKey)?;
    let iv = iv.ok_or(ObfError::InvalidIv)?;
    let data = data.ok_or(ObfError::InvalidData)?;

    // A length that overruns the buffer is as unusable as a zero length
    if length == 0 || length > data.len() {
        return Err(ObfError::InvalidLength);
    }

    Ok((key, iv, &mut data[..length]))
}
