//! Tokenize command - print the token stream without running

use anyhow::Result;
use pcl_runtime::Token;

/// Print every token of `program`, whitespace and error tokens included
pub fn run(program: &str, json: bool) -> Result<()> {
    let tokens = pcl_runtime::tokenize(program);
    println!("{}", render(&tokens, json)?);
    Ok(())
}

fn render(tokens: &[Token], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(tokens)?);
    }
    Ok(tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
