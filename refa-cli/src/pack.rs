//! The `compile`/`run` subcommand pair, exercising `pack`/`unpack` against a
//! file on disk.

use refa::regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error<'a> {
    #[error("error compiling pattern: {0}")]
    Compile(#[from] refa::error::CompileError),
    #[error("error reading {0}: {1}")]
    Read(&'a Path, std::io::Error),
    #[error("error writing {0}: {1}")]
    Write(&'a Path, std::io::Error),
    #[error("error reading packed regex from {0}: {1}")]
    Deserialize(&'a Path, refa::error::DeserializeError),
}

pub fn compile<'a>(pattern: &str, output: &'a Path) -> Result<(), Error<'a>> {
    let regex = Regex::new(pattern)?;
    let bytes = regex.pack();
    fs::write(output, bytes).map_err(|e| Error::Write(output, e))?;
    println!("compiled {pattern:?} to {} ({} states)", output.display(), regex.dfa().states().len());
    Ok(())
}

pub fn run<'a>(file: &'a Path, text: &str) -> Result<(), Error<'a>> {
    let bytes = fs::read(file).map_err(|e| Error::Read(file, e))?;
    let regex = Regex::unpack(&bytes).map_err(|e| Error::Deserialize(file, e))?;
    match regex.full_match(text) {
        Some(m) => println!("match [{}, {}): {:?}", m.begin(), m.end(), m.as_str()),
        None => println!("no match"),
    }
    Ok(())
}
