//! The four match subcommands: `match`, `prefix`, `search` and `find-all`.
//! Each compiles its pattern fresh and dispatches straight to the
//! corresponding [`refa::regex::Regex`] operation.

use refa::regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Full,
    Prefix,
    Search,
    FindAll,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("error compiling pattern: {0}")]
    Compile(#[from] refa::error::CompileError),
}

pub fn run(op: Op, pattern: &str, text: &str) -> Result<(), Error> {
    let regex = Regex::new(pattern)?;

    match op {
        Op::Full => match regex.full_match(text) {
            Some(m) => println!("match [{}, {}): {:?}", m.begin(), m.end(), m.as_str()),
            None => println!("no match"),
        },
        Op::Prefix => match regex.prefix_match(text) {
            Some(m) => println!("match [{}, {}): {:?}", m.begin(), m.end(), m.as_str()),
            None => println!("no match"),
        },
        Op::Search => match regex.search(text) {
            Some(m) => println!("match [{}, {}): {:?}", m.begin(), m.end(), m.as_str()),
            None => println!("no match"),
        },
        Op::FindAll => {
            let matches = regex.find_all(text);
            if matches.is_empty() {
                println!("no matches");
            } else {
                for m in matches {
                    println!("[{}, {}): {:?}", m.begin(), m.end(), m.as_str());
                }
            }
        }
    }

    Ok(())
}
