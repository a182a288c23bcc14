//! `mazer` reads a JSON solve request from the file named on the command
//! line, or from stdin, and prints the JSON response.

mod request;

use std::io::Read;

use request::{SolveRequest, handle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let input = match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request: SolveRequest = serde_json::from_str(&input)?;
    let response = handle(&request);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
