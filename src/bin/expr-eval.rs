use anyhow::Result;
use expr_trace::{parse_and_evaluate, render};
use std::io::Write;

fn read_expression() -> Result<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg);
    }
    print!("Enter the expression: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let input = read_expression()?;
    let (tree, value) = parse_and_evaluate(&input)?;
    println!("Expression: {}", render(&tree));
    println!("Result: {}", value);
    Ok(())
}
