use std::process::ExitCode;

use chained_hash::DuplicateCheck;
use chained_hash::HashTable;
use chained_hash::TableConfig;
use clap::Parser;
use log::LevelFilter;
use log::info;

const DEFAULT_KEYS: &[&str] = &[
    "apple",
    "banana",
    "cherry",
    "date",
    "elderberry",
    "fig",
    "grape",
    "apple",
    "honeydew",
    "banana",
];

const DEFAULT_SEARCHES: &[&str] = &["apple", "banana", "kiwi"];

#[derive(Parser, Debug)]
struct Args {
    /// Number of buckets, must be a power of two
    #[arg(short = 'c', long = "capacity", default_value_t = TableConfig::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Never compare the chain tail on insertion
    #[arg(long = "skip-tail")]
    skip_tail: bool,

    /// Keys to look up after inserting
    #[arg(short = 's', long = "search")]
    search: Vec<String>,

    /// Keys to insert, in order
    keys: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let args = Args::parse();

    let duplicate_check = if args.skip_tail {
        DuplicateCheck::SkipTail
    } else {
        DuplicateCheck::Full
    };

    let mut table: HashTable = match TableConfig::new(args.capacity)
        .duplicate_check(duplicate_check)
        .build()
    {
        Ok(table) => table,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "created table with {} buckets ({:?} duplicate check)",
        table.capacity(),
        table.duplicate_check()
    );

    let keys: Vec<&str> = if args.keys.is_empty() {
        DEFAULT_KEYS.to_vec()
    } else {
        args.keys.iter().map(String::as_str).collect()
    };

    println!("{:<16}{:<8}{:<10}Collisions", "Key", "Hash", "Inserted");
    for key in &keys {
        let hash = table.hash(key);
        let inserted = table.insert(key);
        let collisions = table
            .search(key)
            .map(|(_, entry)| entry.collisions().to_string())
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:<16}{:<8}{:<10}{}",
            key,
            hash,
            if inserted { "yes" } else { "no" },
            collisions
        );
    }

    println!("\nHash Table:");
    print!("{table}");

    let searches: Vec<&str> = if args.search.is_empty() {
        DEFAULT_SEARCHES.to_vec()
    } else {
        args.search.iter().map(String::as_str).collect()
    };

    println!("\nSearching for keys...");
    for key in searches {
        match table.search(key) {
            Some((index, entry)) => println!(
                "Key '{key}' found at index {index}, collisions: {}",
                entry.collisions()
            ),
            None => println!("Key '{key}' not found"),
        }
    }

    #[cfg(feature = "stats")]
    {
        println!();
        table.print_chain_histogram();
        table.chain_stats().print();
    }

    ExitCode::SUCCESS
}
