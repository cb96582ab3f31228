use anyhow::Result;
use clap::Parser;
use commands::run::{RunOptions, StackFormat};
use pcl_runtime::{ColorMode, DEFAULT_MAX_DEPTH};

mod commands;
mod config;
mod logging;

/// PCL stack language interpreter.
///
/// Runs a PCL program given on the command line or read from a file, and
/// prints the values it leaves on the stack. Without a program, starts an
/// interactive REPL.
///
/// EXAMPLES:
///     pcl '3 4 +'                          Run inline source
///     pcl -f script.pcl                    Run a file
///     pcl --stack-format join-spaces '1 5 range'
///     pcl --tokenize '1 dup?'              Show the token stream
///     pcl                                  Start interactive REPL
///
/// ENVIRONMENT VARIABLES:
///     PCL_MAX_DEPTH     Maximum call depth (default 1000)
///     PCL_NO_HISTORY    Set to disable REPL history
///     PCL_HISTORY_FILE  REPL history path (default ~/.pcl/history)
///     PCL_LOG           Log filter, e.g. pcl_runtime=debug
///     NO_COLOR          Set to disable colored output
#[derive(Parser)]
#[command(name = "pcl")]
#[command(version)]
struct Cli {
    /// Program source, or a file path with --load-file
    source: Option<String>,

    /// Interpret SOURCE as a file path to read
    #[arg(short = 'f', long = "load-file", requires = "source")]
    load_file: bool,

    /// Don't run the program; print its tokens instead
    #[arg(long, conflicts_with = "quiet")]
    tokenize: bool,

    /// How to print data left on the stack
    #[arg(long, value_enum, default_value_t)]
    stack_format: StackFormat,

    /// Suppress all output, including data left on the stack and any errors
    #[arg(short, long)]
    quiet: bool,

    /// Print error reports (and tokens) as JSON
    #[arg(long)]
    json: bool,

    /// Maximum call depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Disable REPL history persistence
    #[arg(long)]
    no_history: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::from_env();
    logging::init(config.log_filter.as_deref());

    // Command-line flags override environment variables
    let max_depth = cli
        .max_depth
        .or(config.max_depth)
        .unwrap_or(DEFAULT_MAX_DEPTH);
    let color = if config.no_color {
        ColorMode::Never
    } else {
        ColorMode::Auto
    };

    let Some(source) = cli.source else {
        let no_history = cli.no_history || config.no_history;
        return commands::repl::run(&config, no_history, max_depth, color);
    };

    let program = if cli.load_file {
        commands::read_source(&source)?
    } else {
        source
    };

    if cli.tokenize {
        return commands::tokenize::run(&program, cli.json);
    }

    let options = RunOptions {
        stack_format: cli.stack_format,
        quiet: cli.quiet,
        json: cli.json,
        max_depth,
        color,
    };
    if !commands::run::run(&program, &options)? {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tokenize_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["pcl", "--tokenize", "-q", "1"]).is_err());
    }

    #[test]
    fn test_load_file_requires_source() {
        assert!(Cli::try_parse_from(["pcl", "-f"]).is_err());
    }

    #[test]
    fn test_stack_format_names() {
        let cli = Cli::try_parse_from(["pcl", "--stack-format", "join-nulls", "1"]).unwrap();
        assert_eq!(cli.stack_format, StackFormat::JoinNulls);
        let cli = Cli::try_parse_from(["pcl", "1"]).unwrap();
        assert_eq!(cli.stack_format, StackFormat::Fancy);
    }
}
