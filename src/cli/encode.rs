use crate::codec::encode_slice;
use crate::container::{write_container, Container, ContainerHeader};
use crate::error::Result;
use crate::key::{generate_iv, Iv, Key};
use crate::pipeline::bytes_to_blocks;
use rand::rngs::OsRng;
use std::path::Path;
use tracing::info;

/// Options for the encode command
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    pub key: Key,
    /// Starting IV; a random one is drawn when absent
    pub iv: Option<Iv>,
}

/// Encode a file into an obfuscated container
/// Returns the number of blocks written
pub fn encode_file(input_path: &Path, output_path: &Path, options: &EncodeOptions) -> Result<usize> {
    let input_data = std::fs::read(input_path)?;
    let mut blocks = bytes_to_blocks(&input_data);

    let mut iv = options.iv.unwrap_or_else(|| generate_iv(&mut OsRng));

    // Empty input has no blocks and is rejected by the codec
    encode_slice(&options.key, &mut iv, &mut blocks)?;

    let header = ContainerHeader::new(input_data.len() as u64, blocks.len(), iv);
    let block_count = blocks.len();
    write_container(output_path, &Container { header, blocks })?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        blocks = block_count,
        "encoded file"
    );
    Ok(block_count)
}
