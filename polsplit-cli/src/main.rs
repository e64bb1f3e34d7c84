//! Command line front end for splitting IAM policy documents.

use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use polsplit::split::split_policy_json;

mod logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for the policy splitter.
#[derive(Debug, Parser)]
#[clap(name = "polsplit")]
struct SplitterArgs {
    /// Path to the IAM policy JSON document. Reads stdin when omitted
    /// or when given as "-".
    input: Option<PathBuf>,

    /// Maximum number of characters allowed per output policy. Defaults
    /// to 6144, the AWS managed policy limit.
    #[clap(short = 'm', long, env = "POLSPLIT_MAX_CHARS")]
    max_chars: Option<i64>,

    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    output_format: Option<LogOutputFormat>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse the command line arguments.
    let args = SplitterArgs::parse();

    // Configure the binary's stdout/err output based on the provided
    // output format.
    let pretty = matches!(args.output_format, Some(LogOutputFormat::Pretty));
    logging::setup_logging(pretty);

    let policy_json = read_input(args.input.as_deref())?;
    let outcome = split_policy_json(&policy_json, args.max_chars)?;

    tracing::info!(
        id = %outcome.id,
        policies = outcome.policies.len(),
        "policy split complete",
    );

    let document = serde_json::json!({
        "id": outcome.id,
        "split_policies": outcome.policies,
    });
    println!("{document}");

    Ok(())
}

/// Read the policy document from the given path, or from stdin when the
/// path is absent or "-".
fn read_input(path: Option<&Path>) -> Result<String, std::io::Error> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut policy_json = String::new();
            std::io::stdin().read_to_string(&mut policy_json)?;
            Ok(policy_json)
        }
    }
}
