//! tb - Turbo-Bucketizer CLI
//!
//! Run with: tb --help

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use turbo_bucketizer_core::analysis::{AnalysisReport, run_demo, run_from_file};
use turbo_bucketizer_core::config::{BucketConfig, FileConfig, LogFormat, OutputFormat, Preset};
use turbo_bucketizer_core::error::format_error_with_remediation;
use turbo_bucketizer_core::logging::{LogError, init_logging};
use turbo_bucketizer_core::report::render;

/// Measure how evenly an affine hash spreads IPv4 keys over 2^k buckets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["demo", "from_file"])))]
struct Args {
    /// Analyze the synthetic key range [0, N)
    #[arg(long, value_name = "N")]
    demo: Option<u64>,

    /// Analyze IPv4 addresses read from a file, one per line
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,

    /// Number of bucket bits (buckets = 2^k)
    #[arg(long, value_name = "BITS", value_parser = clap::value_parser!(u32).range(0..=32))]
    k: Option<u32>,

    /// Affine multiplier in hex, e.g. 0x9E3779B1
    #[arg(long, value_name = "HEX", value_parser = parse_hex_u32)]
    a: Option<u32>,

    /// Affine offset in hex, e.g. 0x85EBCA77
    #[arg(long, value_name = "HEX", value_parser = parse_hex_u32)]
    b: Option<u32>,

    /// Named constant pair (default, wang); --a/--b still override it
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// List bucket counts; without N (or N = 0) every bucket is listed
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "0"
    )]
    show_buckets: Option<u64>,

    /// Report format: plain or json
    #[arg(long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Path to a tb.toml config file
    #[arg(long, value_name = "PATH", env = "TB_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log format: pretty or json
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

/// Parse a 32-bit hex value with an optional `0x`/`0X` prefix.
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() {
        return Err("expected hex digits".to_string());
    }
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid 32-bit hex value '{s}': {e}"))
}

impl Args {
    /// Layer the config file, preset and explicit flags over the defaults.
    fn resolve(&self) -> anyhow::Result<FileConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::load_from(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => FileConfig::default(),
        };

        if let Some(name) = &self.preset {
            let preset: Preset = name
                .parse()
                .map_err(turbo_bucketizer_core::Error::from)
                .context("resolving --preset")?;
            config.bucket = config.bucket.with_preset(preset);
        }
        config.bucket = self.apply_overrides(config.bucket);

        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.show_buckets.is_some() {
            config.output.show_buckets = self.show_buckets;
        }

        Ok(config)
    }

    const fn apply_overrides(&self, mut bucket: BucketConfig) -> BucketConfig {
        if let Some(a) = self.a {
            bucket.multiplier = a;
        }
        if let Some(b) = self.b {
            bucket.offset = b;
        }
        if let Some(k) = self.k {
            bucket.bucket_bits = k;
        }
        bucket
    }

    fn analyze(&self, bucket: &BucketConfig) -> anyhow::Result<AnalysisReport> {
        if let Some(count) = self.demo {
            return run_demo(bucket, count).context("running demo");
        }
        match &self.from_file {
            Some(path) => run_from_file(bucket, path)
                .with_context(|| format!("analyzing {}", path.display())),
            None => anyhow::bail!("one of --demo or --from-file is required"),
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.resolve()?;

    match init_logging(&config.logging) {
        Ok(()) | Err(LogError::AlreadyInitialized) => {}
        Err(err) => return Err(err).context("initializing logging"),
    }

    tracing::debug!(
        multiplier = config.bucket.multiplier,
        offset = config.bucket.offset,
        bucket_bits = config.bucket.bucket_bits,
        "Resolved configuration"
    );

    let report = args.analyze(&config.bucket)?;
    let rendered = render(&report, &config.output).context("rendering report")?;
    print!("{rendered}");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<turbo_bucketizer_core::Error>() {
                Some(core) => eprintln!("{}", format_error_with_remediation(core)),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_accepts_optional_prefix() {
        assert_eq!(parse_hex_u32("0x9E3779B1"), Ok(0x9E37_79B1));
        assert_eq!(parse_hex_u32("0X1f"), Ok(0x1F));
        assert_eq!(parse_hex_u32("ffffffff"), Ok(u32::MAX));
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert!(parse_hex_u32("").is_err());
        assert!(parse_hex_u32("0x").is_err());
        assert!(parse_hex_u32("0x1_0000_0000").is_err());
        assert!(parse_hex_u32("100000000").is_err());
        assert!(parse_hex_u32("xyz").is_err());
    }

    #[test]
    fn explicit_flags_override_preset() {
        let args = Args::parse_from(["tb", "--demo", "10", "--preset", "wang", "--a", "0x3"]);
        let config = args.resolve().unwrap();
        assert_eq!(config.bucket.multiplier, 3);
        assert_eq!(config.bucket.offset, Preset::Wang.params().1);
        assert_eq!(config.bucket.bucket_bits, BucketConfig::DEFAULT_BUCKET_BITS);
    }

    #[test]
    fn show_buckets_without_value_means_all() {
        let args = Args::parse_from(["tb", "--demo", "10", "--show-buckets"]);
        assert_eq!(args.show_buckets, Some(0));
        let args = Args::parse_from(["tb", "--demo", "10", "--show-buckets", "5"]);
        assert_eq!(args.show_buckets, Some(5));
    }

    #[test]
    fn modes_are_exclusive() {
        assert!(Args::try_parse_from(["tb"]).is_err());
        assert!(Args::try_parse_from(["tb", "--demo", "1", "--from-file", "x"]).is_err());
    }

    #[test]
    fn unknown_preset_is_a_core_error() {
        let args = Args::parse_from(["tb", "--demo", "10", "--preset", "murmur"]);
        let err = args.resolve().unwrap_err();
        assert!(err.downcast_ref::<turbo_bucketizer_core::Error>().is_some());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
