use crate::codec::decode_slice;
use crate::container::read_container;
use crate::error::Result;
use crate::key::{Iv, Key};
use crate::pipeline::blocks_to_bytes;
use std::path::Path;
use tracing::info;

/// Options for the decode command
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub key: Key,
}

/// Decode a container back into the original file
/// Returns the IV restored by decoding (the one encoding started from)
pub fn decode_file(input_path: &Path, output_path: &Path, options: &DecodeOptions) -> Result<Iv> {
    let container = read_container(input_path)?;
    let mut blocks = container.blocks;
    let mut iv = container.header.iv;

    decode_slice(&options.key, &mut iv, &mut blocks)?;

    let data = blocks_to_bytes(&blocks, container.header.byte_length as usize)?;
    std::fs::write(output_path, &data)?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        bytes = data.len(),
        "decoded file"
    );
    Ok(iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::encode::{encode_file, EncodeOptions};
    use tempfile::tempdir;

    #[test]
    fn test_decode_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let sealed = dir.path().join("input.obf");
        let output = dir.path().join("output.txt");

        let original = b"Hello, World! This is a test.";
        std::fs::write(&input, original).unwrap();

        let key = Key::new(0xDEAD_BEEF, 0xFEED_FACE);
        let encode_options = EncodeOptions { key, iv: Some(0x42) };
        encode_file(&input, &sealed, &encode_options).unwrap();

        let restored_iv = decode_file(&sealed, &output, &DecodeOptions { key }).unwrap();
        assert_eq!(restored_iv, 0x42);
        assert_eq!(std::fs::read(&output).unwrap(), original);
    }

    #[test]
    fn test_decode_wrong_key() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let sealed = dir.path().join("input.obf");
        let output = dir.path().join("output.txt");

        let original = b"Secret data that should not come back";
        std::fs::write(&input, original).unwrap();

        let encode_options = EncodeOptions {
            key: Key::new(1, 2),
            iv: Some(7),
        };
        encode_file(&input, &sealed, &encode_options).unwrap();

        let wrong = DecodeOptions { key: Key::new(3, 4) };
        let restored_iv = decode_file(&sealed, &output, &wrong).unwrap();
        assert_ne!(restored_iv, 7);
        assert_ne!(std::fs::read(&output).unwrap(), original);
    }

    #[test]
    fn test_decode_random_iv_restored() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let sealed = dir.path().join("input.obf");
        let output = dir.path().join("output.bin");

        let original: Vec<u8> = (0..=255u8).collect();
        std::fs::write(&input, &original).unwrap();

        let key = Key::from_raw(0x0123_4567_89AB_CDEF);
        encode_file(&input, &sealed, &EncodeOptions { key, iv: None }).unwrap();
        decode_file(&sealed, &output, &DecodeOptions { key }).unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), original);
    }
}
