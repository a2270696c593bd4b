use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docfs",
    about = "docfs — JSON documents stored as plain files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store root directory
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Indentation for written records
    #[arg(long, global = true, default_value = "tab")]
    pub indent: IndentArg,

    /// fsync records before renaming them into place
    #[arg(long, global = true)]
    pub sync: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum IndentArg {
    Tab,
    Spaces,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a JSON document as a record
    Write(WriteArgs),
    /// Print a record
    Read(ReadArgs),
    /// Print every record in a collection
    ReadAll(CollectionArgs),
    /// Delete a record, or the whole collection when no key is given
    Delete(DeleteArgs),
    /// List record keys in a collection
    Keys(CollectionArgs),
    /// List collections
    Collections,
}

#[derive(Args)]
pub struct WriteArgs {
    pub collection: String,
    pub key: String,
    /// JSON document, or `-` to read it from stdin
    pub document: String,
}

#[derive(Args)]
pub struct ReadArgs {
    pub collection: String,
    pub key: String,
}

#[derive(Args)]
pub struct CollectionArgs {
    pub collection: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub collection: String,
    pub key: Option<String>,
}
