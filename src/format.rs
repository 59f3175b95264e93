use crate::key::Block;

/// Blocks printed per line
pub const BLOCKS_PER_LINE: usize = 8;

/// Indent for continuation lines; lines up under a `"Label  = "` prefix
const CONTINUATION: &str = "\n         ";

/// Render blocks as comma-separated upper-case hex, eight per line
pub fn format_blocks(blocks: &[Block]) -> String {
    let mut output = String::with_capacity(blocks.len() * 10 + 1);

    for (index, block) in blocks.iter().enumerate() {
        if index > 0 && index % BLOCKS_PER_LINE == 0 {
            output.push_str(CONTINUATION);
        }
        output.push_str(&format!("{:08X}", block));
        if index + 1 < blocks.len() {
            output.push_str(", ");
        }
    }

    output.push('\n');
    output
}
