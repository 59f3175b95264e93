use clap::{Parser, Subcommand};
use obf::cli::{
    decode_file, encode_file, format_material, generate_material, run_self_test, show_info,
    DecodeOptions, EncodeOptions, SelfTestOptions, DEFAULT_TEST_LENGTH, MAX_TEST_LENGTH,
};
use obf::key::{format_iv, parse_iv, Iv, Key};
use obf::{ObfError, Status};
use rand::rngs::OsRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Version info from build.rs
const VERSION: &str = env!("OBF_VERSION");
const BUILD: &str = env!("OBF_BUILD");
const PROFILE: &str = env!("OBF_PROFILE");
const GIT_HASH: &str = env!("OBF_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!(
            "{} {} build {} ({}) api {}",
            PROFILE,
            VERSION,
            BUILD,
            GIT_HASH,
            obf::API_VERSION
        )
    })
}

#[derive(Parser)]
#[command(name = "obf")]
#[command(author, about = "Reversible counter-chained block obfuscation", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key and IV
    #[command(alias = "k")]
    Keygen,

    /// Encode a file into an obfuscated container
    #[command(alias = "e")]
    Encode {
        /// Key as 16 hex digits (high part first)
        #[arg(long, required = true, value_parser = parse_key)]
        key: Key,

        /// Starting IV as 8 hex digits (random when omitted)
        #[arg(long, value_parser = parse_iv_arg)]
        iv: Option<Iv>,

        /// Input file to encode
        input: PathBuf,

        /// Output container file
        output: PathBuf,
    },

    /// Decode a container back into the original file
    #[command(alias = "d")]
    Decode {
        /// Key as 16 hex digits (high part first)
        #[arg(long, required = true, value_parser = parse_key)]
        key: Key,

        /// Input container file
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },

    /// Show information about a container file
    #[command(alias = "i")]
    Info {
        /// Container file to inspect
        file: PathBuf,
    },

    /// Run the built-in validation and round-trip checks
    #[command(alias = "t")]
    Selftest {
        /// Number of blocks to round-trip
        #[arg(long, default_value_t = DEFAULT_TEST_LENGTH, value_parser = parse_test_length)]
        length: usize,

        /// Fixed RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_key(s: &str) -> Result<Key, String> {
    s.parse().map_err(|e: ObfError| format!("{}", e))
}

fn parse_iv_arg(s: &str) -> Result<Iv, String> {
    parse_iv(s).map_err(|e| format!("{}", e))
}

fn parse_test_length(s: &str) -> Result<usize, String> {
    let length: usize = s.parse().map_err(|e| format!("{}", e))?;
    if length == 0 || length > MAX_TEST_LENGTH {
        return Err(format!("length must be between 1 and {}", MAX_TEST_LENGTH));
    }
    Ok(length)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(status: Status) -> ExitCode {
    ExitCode::from(status.code() as u8)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("obf {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(&cli.log_level);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Keygen => {
            let (key, iv) = generate_material(&mut OsRng);
            print!("{}", format_material(&key, iv));
            Ok(())
        }

        Commands::Encode {
            key,
            iv,
            input,
            output,
        } => {
            let options = EncodeOptions { key, iv };
            encode_file(&input, &output, &options).map(|blocks| {
                println!("Encoded {} blocks to {}", blocks, output.display());
            })
        }

        Commands::Decode { key, input, output } => {
            let options = DecodeOptions { key };
            decode_file(&input, &output, &options).map(|iv| {
                println!("Decoded to {} (IV {})", output.display(), format_iv(iv));
            })
        }

        Commands::Info { file } => show_info(&file).map(|info| print!("{}", info)),

        Commands::Selftest { length, seed } => {
            let report = run_self_test(&SelfTestOptions { length, seed });
            print!("{}", report.output);
            if !report.success() {
                return exit_code(Status::Failure);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(e.status())
        }
    }
}
