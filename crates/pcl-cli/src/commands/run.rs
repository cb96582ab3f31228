//! Run command - execute a PCL program and print what it leaves behind

use super::{stderr_color, stdout_color};
use anyhow::Result;
use clap::ValueEnum;
use pcl_runtime::diagnostic::highlight::write_value;
use pcl_runtime::{ColorMode, DiagnosticFormatter, Exception, Pcl, Report, StackValue};
use std::io::{self, Write};
use termcolor::{ColorSpec, StandardStream, WriteColor};

/// How values left on the stack are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StackFormat {
    /// One highlighted literal per line
    #[default]
    Fancy,
    /// Display text separated by spaces
    JoinSpaces,
    /// Display text separated by newlines
    JoinNewlines,
    /// Display text separated by NUL characters
    JoinNulls,
    /// Display text with no separator
    Concatenate,
    /// Print nothing
    Hide,
}

impl StackFormat {
    fn separator(self) -> &'static str {
        match self {
            StackFormat::JoinSpaces => " ",
            StackFormat::JoinNewlines => "\n",
            StackFormat::JoinNulls => "\0",
            StackFormat::Fancy | StackFormat::Concatenate | StackFormat::Hide => "",
        }
    }
}

/// Options for a single program run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub stack_format: StackFormat,
    /// Print neither the leftover stack nor errors
    pub quiet: bool,
    /// Print errors as JSON reports on stdout
    pub json: bool,
    pub max_depth: usize,
    pub color: ColorMode,
}

/// Run `program` on an empty stack.
///
/// Returns `false` when the program raised an exception, so the caller can
/// exit with a failure status.
pub fn run(program: &str, options: &RunOptions) -> Result<bool> {
    let runtime = Pcl::new().with_max_depth(options.max_depth);

    match runtime.eval(program) {
        Ok(stack) => {
            if !options.quiet {
                let mut out = StandardStream::stdout(stdout_color(options.color).to_color_choice());
                write_stack(&mut out, &stack, options.stack_format)?;
                out.flush()?;
            }
            Ok(true)
        }
        Err(exception) => {
            tracing::debug!(error = %exception, "program failed");
            if !options.quiet {
                report_exception(&exception, program, options)?;
            }
            Ok(false)
        }
    }
}

fn report_exception(exception: &Exception, program: &str, options: &RunOptions) -> Result<()> {
    let report = Report::new(exception, program);
    if options.json {
        println!("{}", report.to_json_string()?);
    } else {
        DiagnosticFormatter::new(stderr_color(options.color)).emit(&report, program)?;
    }
    Ok(())
}

/// Write the leftover stack in the requested format
pub fn write_stack(
    w: &mut impl WriteColor,
    stack: &[StackValue],
    format: StackFormat,
) -> io::Result<()> {
    match format {
        StackFormat::Hide => Ok(()),
        StackFormat::Fancy => write_fancy(w, stack, "empty stack"),
        _ => {
            let joined = stack
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(format.separator());
            writeln!(w, "{}", joined)
        }
    }
}

/// One highlighted literal per line, bottom of the stack first, or a dimmed
/// `empty_message` when there is nothing to show
pub fn write_fancy(
    w: &mut impl WriteColor,
    stack: &[StackValue],
    empty_message: &str,
) -> io::Result<()> {
    if stack.is_empty() {
        w.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(w, "{}", empty_message)?;
        w.reset()?;
        return writeln!(w);
    }
    for value in stack {
        write_value(w, value)?;
        writeln!(w)?;
    }
    Ok(())
}
