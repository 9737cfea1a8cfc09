use std::path::PathBuf;

use thiserror::Error;

use crate::codegen::CodegenOptions;

pub const USAGE: &str = "Usage: stackgen <program.sexp> [output.asm] [--reference] [--dot <file>] [--symbols <file>] [--tree]";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no input file given")]
    MissingInput,
    #[error("`{0}` expects a file name")]
    MissingValue(String),
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Command-line settings for one compiler run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Reproduce the legacy comparison, modulo and literal output.
    pub reference: bool,
    pub dot: Option<PathBuf>,
    pub symbols: Option<PathBuf>,
    pub tree: bool,
}

impl Config {
    /// Parses the arguments after the program name.
    pub fn from_args<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut reference = false;
        let mut dot = None;
        let mut symbols = None;
        let mut tree = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--reference" => reference = true,
                "--tree" => tree = true,
                "--dot" => {
                    let path = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    dot = Some(PathBuf::from(path));
                }
                "--symbols" => {
                    let path = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    symbols = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()));
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let input = PathBuf::from(positional.next().ok_or(ConfigError::MissingInput)?);
        let output = match positional.next() {
            Some(out) => PathBuf::from(out),
            None => input.with_extension("asm"),
        };
        if let Some(extra) = positional.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        Ok(Config {
            input,
            output,
            reference,
            dot,
            symbols,
            tree,
        })
    }

    pub fn codegen_options(&self) -> CodegenOptions {
        if self.reference {
            CodegenOptions::reference()
        } else {
            CodegenOptions::default()
        }
    }
}
