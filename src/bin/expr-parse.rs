use anyhow::Result;
use std::io::Read;

fn main() -> Result<()> {
    env_logger::init();

    let input = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input.trim_end().to_string()
        }
    };
    let out = expr_trace::parse(&input);
    println!("{:#?}", out);
    Ok(())
}
