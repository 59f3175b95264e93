use crate::container::read_container_header;
use crate::error::Result;
use crate::key::format_iv;
use std::path::Path;

/// Display information about a container file
pub fn show_info(path: &Path) -> Result<String> {
    let header = read_container_header(path)?;

    let mut output = String::new();

    output.push_str("Obfuscated Container Information\n");
    output.push_str("================================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Version: {}\n", header.version));
    output.push_str("\n");

    output.push_str("Payload:\n");
    output.push_str(&format!("  Original size: {}\n", format_size(header.byte_length)));
    output.push_str(&format!("  Blocks: {}\n", header.block_count));
    output.push_str(&format!("  Block data: {} bytes\n", header.data_size()?));
    output.push_str(&format!("  Wrapped IV: {}\n", format_iv(header.iv)));
    output.push_str("\n");

    output.push_str("Notes:\n");
    output.push_str("  The key is not stored. Decoding requires the key used to encode.\n");
    output.push_str("  This is obfuscation, not encryption.\n");

    Ok(output)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::encode::{encode_file, EncodeOptions};
    use crate::key::Key;
    use tempfile::tempdir;

    #[test]
    fn test_show_info() {
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("input.txt");
        let obf_path = dir.path().join("test.obf");

        std::fs::write(&input_path, b"Test data").unwrap();

        let options = EncodeOptions {
            key: Key::new(5, 6),
            iv: Some(0),
        };
        encode_file(&input_path, &obf_path, &options).unwrap();

        let info = show_info(&obf_path).unwrap();

        assert!(info.contains("Version: 1"));
        assert!(info.contains("Original size: 9 B"));
        assert!(info.contains("Blocks: 3"));
        assert!(info.contains("Block data: 12 bytes"));
        assert!(info.contains("Wrapped IV: "));
    }

    #[test]
    fn test_show_info_rejects_plain_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        std::fs::write(&path, b"just some text").unwrap();
        assert!(show_info(&path).is_err());
    }

    #[test]
    fn test_show_info_rejects_oversized_block_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oversized.obf");
        let header =
            br#"{"version":1,"byte_length":18446744073709551615,"block_count":4611686018427387904,"iv":0}"#;
        let mut bytes = b"OBF\x01".to_vec();
        bytes.extend_from_slice(&(header.len() as u32).to_le_bytes());
        bytes.extend_from_slice(header);
        std::fs::write(&path, bytes).unwrap();

        let result = show_info(&path);
        assert!(matches!(result, Err(crate::error::ObfError::InvalidFormat(_))));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
    }
}
