use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use skillconv::{ConverterConfig, DedupPolicy};

mod convert;
mod inspect;
mod params;

#[derive(Parser)]
#[command(
    name = "skillconv",
    version,
    about = "Convert agent skills into LangChain tool wrappers"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,

    /// Log conversion details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Output format for inspection results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Options shared by commands that run the conversion pipeline.
#[derive(clap::Args, Debug, Clone)]
struct ConfigArgs {
    /// YAML converter configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of tools to generate
    #[arg(long)]
    max_tools: Option<usize>,
    /// How repeated simple commands are collapsed into tools
    #[arg(long, value_enum)]
    dedup: Option<DedupPolicy>,
    /// Shell-quote substituted arguments in generated code
    #[arg(long)]
    quote_arguments: bool,
}

#[derive(Subcommand)]
#[command(next_display_order = None)]
enum Commands {
    /// Generate a LangChain agent program from a skill
    Convert {
        /// Path to skill directory or SKILL.md file [default: .]
        #[arg(name = "skill-dir", default_value = ".")]
        skill_dir: PathBuf,
        /// Write output to file instead of stdout (only rewritten on change)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Check that --output is up to date without writing (exit 1 if stale)
        #[arg(long, requires = "output")]
        check: bool,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Show parsed metadata, commands and resolved tools
    Inspect {
        /// Path to skill directory or SKILL.md file [default: .]
        #[arg(name = "skill-dir", default_value = ".")]
        skill_dir: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Show the parameters inferred from a command template
    Params {
        /// Command template, e.g. 'curl -s "wttr.in/{location}"'
        command: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

pub fn run(cli: Cli) {
    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::Convert {
            skill_dir,
            output,
            check,
            config,
        }) => convert::run(skill_dir, output, check, load_config(&config)),
        Some(Commands::Inspect {
            skill_dir,
            format,
            config,
        }) => inspect::run(skill_dir, format, load_config(&config)),
        Some(Commands::Params { command, format }) => params::run(&command, format),
        None => {
            eprintln!("Usage: skillconv <command> [args]");
            eprintln!("Run `skillconv --help` for details.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` enables debug output for this crate; otherwise `RUST_LOG` is
/// honored, defaulting to warnings only.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("skillconv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_about() {
    println!(
        "skillconv: Skill to LangChain Agent Converter\n\
         ├─ version:    {}\n\
         ├─ author:     {}\n\
         ├─ source:     {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE"),
    );
}

/// Build the converter configuration: file first, then flag overrides.
fn load_config(args: &ConfigArgs) -> ConverterConfig {
    let mut config = match args.config.as_deref() {
        Some(path) => read_config(path),
        None => ConverterConfig::default(),
    };
    if let Some(max) = args.max_tools {
        config.max_tools = Some(max);
    }
    if let Some(dedup) = args.dedup {
        config.dedup = dedup;
    }
    if args.quote_arguments {
        config.quote_arguments = true;
    }
    config
}

fn read_config(path: &Path) -> ConverterConfig {
    ConverterConfig::load(path).unwrap_or_else(|e| {
        eprintln!("skillconv: {e}");
        std::process::exit(1);
    })
}
