use crate::error::{ObfError, Result};
use crate::key::{Block, Iv};
use crate::pipeline::{block_count_for, BLOCK_BYTES};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic bytes for the container format
const OBF_MAGIC: &[u8; 4] = b"OBF\x01";

pub const CONTAINER_VERSION: u32 = 1;

/// Largest JSON header accepted when reading
pub const MAX_HEADER_LEN: usize = 64 * 1024;

/// Magic plus the header length field
const PREAMBLE_LEN: usize = OBF_MAGIC.len() + 4;

/// Container header - plaintext JSON
/// Holds what decode needs besides the key. The key is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerHeader {
    /// Format version
    pub version: u32,
    /// Payload size in bytes before block padding
    pub byte_length: u64,
    /// Number of encoded blocks that follow the header
    pub block_count: usize,
    /// IV produced by encoding
    pub iv: Iv,
}

impl ContainerHeader {
    pub fn new(byte_length: u64, block_count: usize, iv: Iv) -> Self {
        Self {
            version: CONTAINER_VERSION,
            byte_length,
            block_count,
            iv,
        }
    }

    /// Serialize header to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize header from JSON bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header: Self = serde_json::from_slice(data)?;
        if header.version != CONTAINER_VERSION {
            return Err(ObfError::InvalidFormat(format!(
                "Unsupported container version {}",
                header.version
            )));
        }
        let needed = usize::try_from(header.byte_length)
            .map(block_count_for)
            .map_err(|_| ObfError::InvalidFormat("Byte length too large".into()))?;
        if needed != header.block_count {
            return Err(ObfError::InvalidFormat(format!(
                "{} bytes cannot fill {} blocks",
                header.byte_length, header.block_count
            )));
        }
        header.data_size()?;
        Ok(header)
    }

    /// Size of the block section in bytes
    pub fn data_size(&self) -> Result<usize> {
        self.block_count.checked_mul(BLOCK_BYTES).ok_or_else(|| {
            ObfError::InvalidFormat(format!("{} blocks overflow the block section", self.block_count))
        })
    }
}

/// An obfuscated payload with its header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub header: ContainerHeader,
    pub blocks: Vec<Block>,
}

/// Write a container to disk (creates new file or overwrites)
pub fn write_container(path: &Path, container: &Container) -> Result<()> {
    if container.blocks.len() != container.header.block_count {
        return Err(ObfError::InvalidFormat(format!(
            "Header declares {} blocks but {} supplied",
            container.header.block_count,
            container.blocks.len()
        )));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(OBF_MAGIC)?;

    let header_bytes = container.header.to_bytes()?;
    let header_len = u32::try_from(header_bytes.len())
        .map_err(|_| ObfError::InvalidFormat("Header too large".into()))?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(&header_bytes)?;

    for block in &container.blocks {
        writer.write_all(&block.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a container from disk
pub fn read_container(path: &Path) -> Result<Container> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let (header, header_len) = read_header_from(&mut reader)?;

    // The block section must be exactly what the header declares.
    // Checked against the file size before anything is allocated for it.
    let data_size = header.data_size()?;
    let remaining = file_len.saturating_sub((PREAMBLE_LEN + header_len) as u64);
    if remaining != data_size as u64 {
        return Err(ObfError::InvalidFormat(format!(
            "Expected {} bytes of blocks, found {}",
            data_size, remaining
        )));
    }

    let mut data = Vec::with_capacity(data_size);
    reader.read_to_end(&mut data)?;
    if data.len() != data_size {
        return Err(ObfError::InvalidFormat(format!(
            "Expected {} bytes of blocks, read {}",
            data_size,
            data.len()
        )));
    }

    let blocks = data
        .chunks_exact(BLOCK_BYTES)
        .map(|chunk| {
            let mut word = [0u8; BLOCK_BYTES];
            word.copy_from_slice(chunk);
            Block::from_le_bytes(word)
        })
        .collect();

    Ok(Container { header, blocks })
}

/// Read just the header from a container (without loading the blocks)
pub fn read_container_header(path: &Path) -> Result<ContainerHeader> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let (header, _) = read_header_from(&mut reader)?;
    Ok(header)
}

/// Returns the header and the length of its JSON encoding
fn read_header_from<R: Read>(reader: &mut R) -> Result<(ContainerHeader, usize)> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != OBF_MAGIC {
        return Err(ObfError::InvalidFormat("Invalid container magic bytes".into()));
    }

    let mut header_len_bytes = [0u8; 4];
    reader.read_exact(&mut header_len_bytes)?;
    let header_len = u32::from_le_bytes(header_len_bytes) as usize;
    if header_len > MAX_HEADER_LEN {
        return Err(ObfError::InvalidFormat(format!(
            "Header length {} exceeds {} bytes",
            header_len, MAX_HEADER_LEN
        )));
    }

    let mut header_bytes = vec![0u8; header_len];
    reader.read_exact(&mut header_bytes)?;
    Ok((ContainerHeader::from_bytes(&header_bytes)?, header_len))
}
