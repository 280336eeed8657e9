use std::env;
use std::fs;
use std::io::{self, Read};

use ingest::{SourceStats, gunzip, ingest_body};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: ingest_cli <path|->");
        std::process::exit(2);
    }

    let path = &args[1];
    let mut data = Vec::new();
    if path == "-" {
        io::stdin().read_to_end(&mut data).unwrap_or_else(|err| {
            eprintln!("failed to read stdin: {}", err);
            std::process::exit(1);
        });
    } else {
        data = fs::read(path).unwrap_or_else(|err| {
            eprintln!("failed to read {}: {}", path, err);
            std::process::exit(1);
        });
    }
    if path.ends_with(".gz") {
        data = gunzip(&data, usize::MAX).unwrap_or_else(|err| {
            eprintln!("failed to decompress {}: {}", path, err);
            std::process::exit(1);
        });
    }

    let stats = SourceStats::new();
    if let Err(err) = ingest_body(&stats, &data) {
        eprintln!("rejected batch: {}", err);
        std::process::exit(3);
    }

    match serde_json::to_string_pretty(&stats.summary()) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("failed to serialize summary: {}", err);
            std::process::exit(1);
        }
    }
}
