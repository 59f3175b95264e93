use crate::codec::{decode, encode};
use crate::error::{ObfError, Result};
use crate::format::format_blocks;
use crate::key::{format_iv, Block, Iv, Key};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

/// Default number of blocks exercised by the self-test
pub const DEFAULT_TEST_LENGTH: usize = 32;

/// Largest block count the self-test will allocate
pub const MAX_TEST_LENGTH: usize = 1 << 20;

/// Options for the selftest command
#[derive(Debug, Clone)]
pub struct SelfTestOptions {
    pub length: usize,
    /// Fixed RNG seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SelfTestOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_TEST_LENGTH,
            seed: None,
        }
    }
}

/// Outcome of a self-test run
#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub output: String,
    pub passed: usize,
    pub failed: usize,
}

impl SelfTestReport {
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, name: &str, outcome: std::result::Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.passed += 1;
                self.output.push_str(&format!("[PASS] {}\n", name));
            }
            Err(reason) => {
                self.failed += 1;
                warn!(test = name, %reason, "self-test failed");
                self.output.push_str(&format!("[FAIL] {}: {}\n", name, reason));
            }
        }
    }
}

/// Run the argument-validation and encode/decode checks
pub fn run_self_test(options: &SelfTestOptions) -> SelfTestReport {
    let mut report = SelfTestReport::default();

    if options.length > MAX_TEST_LENGTH {
        let reason = format!("{} blocks exceeds the limit of {}", options.length, MAX_TEST_LENGTH);
        report.record("length", Err(reason));
        return report;
    }

    let outcome = check_arguments(options.length.max(1));
    report.record("arguments", outcome);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let outcome = check_encode_decode(&mut rng, options.length, &mut report.output);
    report.record("encode_decode", outcome);

    report
}

/// Every rejection fires on its own and leaves the arguments untouched
fn check_arguments(length: usize) -> std::result::Result<(), String> {
    let key = Key::default();
    let mut iv: Iv = 0;
    let mut blocks: Vec<Block> = vec![0; length];

    expect_rejection(
        "missing key",
        encode(None, Some(&mut iv), Some(blocks.as_mut_slice()), length),
        |e| matches!(e, ObfError::InvalidKey),
    )?;
    expect_rejection(
        "missing iv",
        encode(Some(&key), None, Some(blocks.as_mut_slice()), length),
        |e| matches!(e, ObfError::InvalidIv),
    )?;
    expect_rejection(
        "missing data",
        encode(Some(&key), Some(&mut iv), None, length),
        |e| matches!(e, ObfError::InvalidData),
    )?;
    expect_rejection(
        "zero length",
        encode(Some(&key), Some(&mut iv), Some(blocks.as_mut_slice()), 0),
        |e| matches!(e, ObfError::InvalidLength),
    )?;

    if iv != 0 || blocks.iter().any(|&b| b != 0) {
        return Err("rejected call modified its arguments".into());
    }
    Ok(())
}

fn expect_rejection(
    case: &str,
    result: Result<()>,
    expected: impl Fn(&ObfError) -> bool,
) -> std::result::Result<(), String> {
    match result {
        Err(ref e) if expected(e) => Ok(()),
        Err(e) => Err(format!("{}: unexpected error {}", case, e)),
        Ok(()) => Err(format!("{}: call was accepted", case)),
    }
}

/// Random round trip, printing each stage like the reference harness
fn check_encode_decode(
    rng: &mut StdRng,
    length: usize,
    output: &mut String,
) -> std::result::Result<(), String> {
    let key = Key::generate(rng);
    let iv: Iv = rng.gen();
    let plain: Vec<Block> = (0..length).map(|_| rng.gen()).collect();

    let mut cipher = plain.clone();
    let mut iv_cipher = iv;

    output.push_str(&format!("Length = {}\n", length));
    output.push_str(&format!("Key    = {}\n", key));
    output.push_str(&format!("IV     = {}\n", format_iv(iv)));
    output.push_str(&format!("\nPlain  = {}", format_blocks(&plain)));

    encode(Some(&key), Some(&mut iv_cipher), Some(cipher.as_mut_slice()), length)
        .map_err(|e| format!("encode failed: {}", e))?;

    output.push_str(&format!("\nIVW    = {}\n", format_iv(iv_cipher)));
    output.push_str(&format!("\nCipher = {}", format_blocks(&cipher)));

    if let Some(index) = cipher.iter().zip(&plain).position(|(c, p)| c == p) {
        return Err(format!("cipher block {} equals plain block", index));
    }
    if iv_cipher == iv {
        return Err("encode left the IV unchanged".into());
    }

    decode(Some(&key), Some(&mut iv_cipher), Some(cipher.as_mut_slice()), length)
        .map_err(|e| format!("decode failed: {}", e))?;

    output.push_str(&format!("\nIV     = {}\n", format_iv(iv_cipher)));
    output.push_str(&format!("\nPlain  = {}", format_blocks(&cipher)));

    if let Some(index) = cipher.iter().zip(&plain).position(|(c, p)| c != p) {
        return Err(format!("decoded block {} differs from plain block", index));
    }
    if iv_cipher != iv {
        return Err("decode did not restore the IV".into());
    }
    Ok(())
}
