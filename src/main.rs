//! RECSTORE - Interactive Shell
//! Drives an in-memory record store from stdin for manual exploration.

use std::io::{self, BufRead, Write};

use recstore::{Bin, Config, Key, Record, RecordStore, Value, WritePolicy};

const NAMESPACE: &str = "test";
const SET_NAME: &str = "repl";

fn main() {
    env_logger::init();

    println!();
    println!("  ╔═══════════════════════════════════════════╗");
    println!("  ║             RECSTORE Shell                ║");
    println!("  ║       In-Memory Record Store v0.1.0       ║");
    println!("  ╚═══════════════════════════════════════════╝");
    println!();
    println!("  Commands:");
    println!("    put <key> <bin>=<value>...     - Replace a record");
    println!("    get <key> [bin...]             - Read a record (optionally some bins)");
    println!("    header <key>                   - Read generation and expiration");
    println!("    del <key>                      - Delete a record");
    println!("    exists <key>...                - Check which keys exist");
    println!("    touch <key> [expiration]       - Reset a record's expiration");
    println!("    append <key> <bin>=<value>...  - Append to string bins");
    println!("    prepend <key> <bin>=<value>... - Prepend to string bins");
    println!("    add <key> <bin>=<value>...     - Add to integer bins");
    println!("    info | metrics | clear         - Inspect or reset the store");
    println!("    exit                           - Shut down");
    println!();

    let store = match RecordStore::open(Config::default()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("[ERROR] Failed to open store: {}", err);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("recstore> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "put" | "set" => with_bins(&parts, "put", |key, bins| {
                store.put(key, bins);
                Ok(())
            }),
            "append" => with_bins(&parts, "append", |key, bins| store.append(key, bins)),
            "prepend" => with_bins(&parts, "prepend", |key, bins| store.prepend(key, bins)),
            "add" | "incr" => with_bins(&parts, "add", |key, bins| store.add(key, bins)),
            "get" => {
                if parts.len() < 2 {
                    println!("  Usage: get <key> [bin...]");
                    continue;
                }
                let key = repl_key(parts[1]);
                if parts.len() == 2 {
                    match store.get(&key) {
                        Some(record) => print_record(&record),
                        None => println!("  (nil)"),
                    }
                } else {
                    match store.get_bins(&key, &parts[2..]) {
                        Some(partial) => {
                            for name in &parts[2..] {
                                match partial.get(name) {
                                    Some(value) => println!("  {} = {}", name, describe(value)),
                                    None => println!("  {} = (nil)", name),
                                }
                            }
                        }
                        None => println!("  (nil)"),
                    }
                }
            }
            "header" => {
                if parts.len() < 2 {
                    println!("  Usage: header <key>");
                    continue;
                }
                match store.get_header(&repl_key(parts[1])) {
                    Some(header) => println!(
                        "  generation: {}  expiration: {}",
                        header.generation, header.expiration
                    ),
                    None => println!("  (nil)"),
                }
            }
            "del" | "delete" => {
                if parts.len() < 2 {
                    println!("  Usage: del <key>");
                    continue;
                }
                if store.delete(&repl_key(parts[1])) {
                    println!("  OK (deleted)");
                } else {
                    println!("  (not found)");
                }
            }
            "exists" => {
                if parts.len() < 2 {
                    println!("  Usage: exists <key>...");
                    continue;
                }
                let keys: Vec<Key> = parts[1..].iter().map(|k| repl_key(k)).collect();
                for (name, found) in parts[1..].iter().zip(store.exists_many(&keys)) {
                    println!("  {} -> {}", name, found);
                }
            }
            "touch" => {
                if parts.len() < 2 {
                    println!("  Usage: touch <key> [expiration]");
                    continue;
                }
                let policy = match parts.get(2).map(|s| s.parse::<u32>()) {
                    Some(Ok(expiration)) => Some(WritePolicy::with_expiration(expiration)),
                    Some(Err(_)) => {
                        println!("  ERROR: expiration must be a non-negative integer");
                        continue;
                    }
                    None => None,
                };
                match store.touch(&repl_key(parts[1]), policy.as_ref()) {
                    Ok(()) => println!("  OK"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "info" | "stats" => {
                println!("  Records:   {}", store.len());
                println!("  Shards:    {}", store.config().shard_amount);
                println!("  Namespace: {}.{}", NAMESPACE, SET_NAME);
            }
            "metrics" => println!("{}", store.metrics().report()),
            "clear" => {
                store.clear();
                println!("  OK (cleared)");
            }
            "exit" | "quit" | "q" => {
                println!("  Shutting down RECSTORE...");
                store.close();
                break;
            }
            _ => {
                println!("  Unknown command: '{}'. Type 'exit' to quit.", parts[0]);
            }
        }
    }
}

/// Run a bin-carrying command and print its outcome.
fn with_bins<F>(parts: &[&str], command: &str, op: F)
where
    F: FnOnce(&Key, &[Bin]) -> recstore::Result<()>,
{
    if parts.len() < 3 {
        println!("  Usage: {} <key> <bin>=<value>...", command);
        return;
    }
    let bins = match parse_bins(&parts[2..]) {
        Ok(bins) => bins,
        Err(msg) => {
            println!("  ERROR: {}", msg);
            return;
        }
    };
    match op(&repl_key(parts[1]), &bins) {
        Ok(()) => println!("  OK"),
        Err(e) => println!("  ERROR: {}", e),
    }
}

fn repl_key(user_key: &str) -> Key {
    Key::new(NAMESPACE, SET_NAME, user_key)
}

fn parse_bins(args: &[&str]) -> Result<Vec<Bin>, String> {
    args.iter()
        .map(|arg| {
            let (name, raw) = arg
                .split_once('=')
                .ok_or_else(|| format!("expected <bin>=<value>, got '{}'", arg))?;
            if name.is_empty() {
                return Err(format!("missing bin name in '{}'", arg));
            }
            Ok(Bin::new(name, parse_value(raw)))
        })
        .collect()
}

/// Integers, floats and booleans are recognized; anything else is a string.
/// Surrounding double quotes force a string.
fn parse_value(raw: &str) -> Value {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::from(&raw[1..raw.len() - 1]);
    }
    if let Ok(l) = raw.parse::<i64>() {
        return Value::Long(l);
    }
    if let Ok(d) = raw.parse::<f64>() {
        return Value::Double(d);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::from(raw),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => format!("{} ({})", other, other.type_name()),
    }
}

fn print_record(record: &Record) {
    let mut names: Vec<&String> = record.bins.keys().collect();
    names.sort();
    for name in names {
        println!("  {} = {}", name, describe(&record.bins[name]));
    }
    println!(
        "  ({} bins, generation {}, expiration {})",
        record.bins.len(),
        record.generation,
        record.expiration
    );
}
