//! REPL command implementation
//!
//! Every line is run as its own program on an empty stack, and whatever it
//! leaves behind is printed.

use super::run::write_fancy;
use super::{stderr_color, stdout_color};
use crate::config::Config;
use anyhow::Result;
use pcl_runtime::diagnostic::highlight::highlight_ansi;
use pcl_runtime::lexer::is_identifier_char;
use pcl_runtime::{ColorMode, DiagnosticFormatter, Pcl, Registry, Report};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::io::Write;
use std::sync::Arc;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const PROMPT: &str = "PCL? ";

/// Line editor support: builtin name completion and syntax highlighting
struct PclHelper {
    registry: Arc<Registry>,
    highlight: bool,
}

impl PclHelper {
    /// Builtin names starting with `prefix`, each displayed with its
    /// signatures
    fn candidates(&self, prefix: &str) -> Vec<Pair> {
        self.registry
            .names()
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| {
                let signatures = self
                    .registry
                    .get(name)
                    .map(|builtin| {
                        builtin
                            .overloads()
                            .iter()
                            .map(|overload| overload.signature(name))
                            .collect::<Vec<_>>()
                            .join("  ")
                    })
                    .unwrap_or_default();
                Pair {
                    display: signatures,
                    replacement: name.to_string(),
                }
            })
            .collect()
    }
}

/// Byte offset where the identifier ending at `pos` begins
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map_or(pos, |(index, _)| index)
}

impl Completer for PclHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(line, pos);
        Ok((start, self.candidates(&line[start..pos])))
    }
}

impl Hinter for PclHelper {
    type Hint = String;
}

impl Highlighter for PclHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.highlight {
            Cow::Owned(highlight_ansi(line))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.highlight
    }
}

impl Validator for PclHelper {}

impl Helper for PclHelper {}

/// Run the interactive REPL
///
/// If `no_history` is true, disables history persistence.
pub fn run(config: &Config, no_history: bool, max_depth: usize, color: ColorMode) -> Result<()> {
    let runtime = Pcl::new().with_max_depth(max_depth);
    let registry = runtime.registry();

    let mut rl: Editor<PclHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(PclHelper {
        registry: Arc::clone(&registry),
        highlight: stdout_color(color).to_color_choice() != ColorChoice::Never,
    }));

    // Load history from file (unless disabled)
    let history_path = config.get_history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            let _ = rl.load_history(path); // Ignore errors if file doesn't exist
        }
    }

    print_banner(color)?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match trimmed {
                    ":quit" | ":q" => {
                        println!("Exiting.");
                        break;
                    }
                    ":help" | ":h" => print_help(),
                    ":builtins" | ":b" => print_builtins(&registry),
                    command if command.starts_with(':') => {
                        println!("Unknown command {}, type :help for a list", command);
                    }
                    _ => eval_line(&runtime, &line, color)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C abandons the current line
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                println!("Exiting.");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history to file (unless disabled)
    if !no_history {
        if let Some(path) = history_path {
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.save_history(&path); // Ignore errors
        }
    }

    Ok(())
}

/// Run one line and print its leftover stack or its error report
fn eval_line(runtime: &Pcl, line: &str, color: ColorMode) -> Result<()> {
    match runtime.eval(line) {
        Ok(stack) => {
            let mut out = StandardStream::stdout(stdout_color(color).to_color_choice());
            write_fancy(&mut out, &stack, "stack is empty")?;
            out.flush()?;
        }
        Err(exception) => {
            let report = Report::new(&exception, line);
            DiagnosticFormatter::new(stderr_color(color)).emit(&report, line)?;
        }
    }
    Ok(())
}

fn print_banner(color: ColorMode) -> Result<()> {
    let mut out = StandardStream::stdout(stdout_color(color).to_color_choice());
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(out, "PCL ")?;
    out.reset()?;
    writeln!(out, "{}.", pcl_runtime::VERSION)?;
    writeln!(out, "Type :help for commands, :quit to exit")?;
    out.flush()?;
    Ok(())
}

/// Print help information
fn print_help() {
    println!("PCL REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :help, :h         Show this help message");
    println!("  :builtins, :b     List builtins with their signatures");
    println!();
    println!("Each line runs as a new program on an empty stack.");
    println!("Add ? to a builtin name to call it only when the value beneath");
    println!("its arguments is truthy.");
    println!("Examples:");
    println!("  PCL? 3 4 +");
    println!("  PCL? 'ab' 3 mul");
    println!("  PCL? 1 5 range {{ 2 mul }} map");
    println!("  PCL? 0 5 dup?");
}

/// Print every builtin overload with its documentation
fn print_builtins(registry: &Registry) {
    for builtin in registry.iter() {
        for overload in builtin.overloads() {
            let doc = if overload.doc().is_empty() {
                "<no documentation>"
            } else {
                overload.doc()
            };
            println!("  {:<28} {}", overload.signature(builtin.name()), doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn helper() -> PclHelper {
        PclHelper {
            registry: Arc::new(Registry::standard()),
            highlight: false,
        }
    }

    #[test]
    fn test_word_start() {
        assert_eq!(word_start("1 2 ad", 6), 4);
        assert_eq!(word_start("1 2 ", 4), 4);
        assert_eq!(word_start("{dup?", 5), 1);
        assert_eq!(word_start("", 0), 0);
    }

    #[test]
    fn test_candidates_match_prefix() {
        let replacements: Vec<String> = helper()
            .candidates("s")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(replacements, vec!["sub", "swap", "switchpush"]);
    }

    #[test]
    fn test_candidates_show_every_overload() {
        let candidates = helper().candidates("mul");
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].display.contains("mul(Number, Number)"));
        assert!(candidates[0].display.contains("mul(Str, Number)"));
    }

    #[test]
    fn test_highlight_disabled() {
        let helper = helper();
        assert_eq!(helper.highlight("1 add", 0), "1 add");
    }
}
