//! Command line front end for `dotjson-store`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotjson_store::{JsonFile, StoreOptions, Value};

/// dotjson - read and modify JSON files with dot-notation paths
#[derive(Parser, Debug)]
#[command(name = "dotjson")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Spaces per indentation level when writing
    #[arg(long, default_value_t = 4)]
    pub indent: usize,

    /// Overwrite the file in place instead of replacing it through a temporary file
    #[arg(long)]
    pub no_atomic: bool,

    /// The JSON file to operate on
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Exit successfully if the file exists
    Exists,
    /// Print the whole document
    Get,
    /// Replace the document, or the value at --path
    Set {
        /// JSON content
        #[arg(allow_hyphen_values = true)]
        content: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Shallow-merge an array or object into the document, or into the value at --path
    Merge {
        /// JSON content
        #[arg(allow_hyphen_values = true)]
        content: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Append to the document, or to the value at --path
    Push {
        /// JSON content
        #[arg(allow_hyphen_values = true)]
        content: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Remove and print the last element
    Pop {
        #[arg(long)]
        path: Option<String>,
    },
    /// Remove and print the first element
    Shift {
        #[arg(long)]
        path: Option<String>,
    },
    /// Insert at the start of the document, or of the value at --path
    Unshift {
        /// JSON content
        #[arg(allow_hyphen_values = true)]
        content: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Remove the key or index at a path
    Unset {
        path: String,
        /// Compact the remaining array indices
        #[arg(long)]
        reindexed: bool,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] dotjson_store::Error),
    #[error("Content {input:?} is not valid JSON: {source}")]
    InvalidContent {
        input: String,
        source: serde_json::Error,
    },
}

/// What a command produced.
#[derive(Debug, PartialEq)]
pub enum Output {
    Exists(bool),
    Value(Value),
}

impl Args {
    pub fn store(&self) -> JsonFile {
        let options = StoreOptions::default()
            .with_indent(self.indent)
            .with_atomic_write(!self.no_atomic);
        JsonFile::with_options(&self.file, options)
    }
}

pub fn run(args: &Args) -> Result<Output, CliError> {
    let store = args.store();
    log::debug!("Running {:?} on {}", args.command, store.path().display());

    let value = match &args.command {
        Command::Exists => return Ok(Output::Exists(store.exists())),
        Command::Get => store.get()?,
        Command::Set { content, path } => store.set(parse_content(content)?, path.as_deref())?,
        Command::Merge { content, path } => {
            store.merge(parse_content(content)?, path.as_deref())?
        }
        Command::Push { content, path } => store.push(parse_content(content)?, path.as_deref())?,
        Command::Pop { path } => store.pop(path.as_deref())?,
        Command::Shift { path } => store.shift(path.as_deref())?,
        Command::Unshift { content, path } => {
            store.unshift(parse_content(content)?, path.as_deref())?
        }
        Command::Unset { path, reindexed } => store.unset(path, *reindexed)?,
    };

    Ok(Output::Value(value))
}

fn parse_content(input: &str) -> Result<Value, CliError> {
    serde_json::from_str(input).map_err(|source| CliError::InvalidContent {
        input: input.to_string(),
        source,
    })
}
