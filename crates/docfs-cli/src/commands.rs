use std::io::Read;

use anyhow::Context;
use colored::Colorize;
use docfs_store::{Indent, Store, StoreConfig};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(&cli)?;
    match cli.command {
        Command::Write(args) => cmd_write(&store, args),
        Command::Read(args) => cmd_read(&store, args),
        Command::ReadAll(args) => cmd_read_all(&store, args),
        Command::Delete(args) => cmd_delete(&store, args),
        Command::Keys(args) => cmd_keys(&store, args),
        Command::Collections => cmd_collections(&store),
    }
}

fn open_store(cli: &Cli) -> anyhow::Result<Store> {
    let indent = match cli.indent {
        IndentArg::Tab => Indent::Tab,
        IndentArg::Spaces => Indent::Spaces,
    };
    let config = StoreConfig::new(&cli.root)
        .with_indent(indent)
        .with_sync_writes(cli.sync);
    Store::with_config(config)
        .with_context(|| format!("failed to open store at {}", cli.root.display()))
}

fn cmd_write(store: &Store, args: WriteArgs) -> anyhow::Result<()> {
    let text = if args.document == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read document from stdin")?;
        buf
    } else {
        args.document
    };
    let value = parse_document(&text)?;
    store.write(&args.collection, &args.key, &value)?;
    println!(
        "{} Wrote {}/{}",
        "✓".green().bold(),
        args.collection.bold(),
        args.key.yellow()
    );
    Ok(())
}

fn cmd_read(store: &Store, args: ReadArgs) -> anyhow::Result<()> {
    let value: Value = store.read(&args.collection, &args.key)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_read_all(store: &Store, args: CollectionArgs) -> anyhow::Result<()> {
    let records = store.read_all(&args.collection)?;
    for record in &records {
        print!("{record}");
        if !record.ends_with('\n') {
            println!();
        }
    }
    eprintln!("{} record(s) in {}", records.len(), args.collection.bold());
    Ok(())
}

fn cmd_delete(store: &Store, args: DeleteArgs) -> anyhow::Result<()> {
    match args.key {
        Some(key) => {
            store.delete(&args.collection, &key)?;
            println!("Deleted {}/{}", args.collection.bold(), key.yellow());
        }
        None => {
            store.delete_collection(&args.collection)?;
            println!("Deleted collection {}", args.collection.bold());
        }
    }
    Ok(())
}

fn cmd_keys(store: &Store, args: CollectionArgs) -> anyhow::Result<()> {
    for key in store.keys(&args.collection)? {
        println!("{key}");
    }
    Ok(())
}

fn cmd_collections(store: &Store) -> anyhow::Result<()> {
    let collections = store.collections()?;
    if collections.is_empty() {
        println!("No collections.");
    }
    for name in collections {
        println!("{}", name.cyan());
    }
    Ok(())
}

fn parse_document(text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text).context("document is not valid JSON")
}
