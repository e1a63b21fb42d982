use itertools::Itertools;
use log::{error, info};
use serde_json::json;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;

use bmp_decoder::{BmpMessage, BmpParser, MessageBody};
use clap::Parser;

/// bmp-decoder is a simple cli tool that decodes BMP version 1 messages from a capture file or
/// from live router connections.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// File path to a raw BMP capture, optionally gz or bz2 compressed.
    #[clap(name = "FILE", required_unless_present = "listen")]
    file_path: Option<PathBuf>,

    /// Accept BMP connections from routers on this address instead of reading a file.
    #[clap(short, long, conflicts_with = "FILE")]
    listen: Option<SocketAddr>,

    /// Output as JSON objects
    #[clap(long)]
    json: bool,

    /// Count decoded BMP messages
    #[clap(short, long)]
    count: bool,

    /// Dump the bytes of a message that fails to decode into ./bmp_core_dump
    #[clap(long)]
    core_dump: bool,
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    match (&opts.file_path, opts.listen) {
        (_, Some(addr)) => listen(addr, &opts),
        (Some(path), None) => {
            let Some(path) = path.to_str() else {
                eprintln!("invalid file path: {}", path.display());
                std::process::exit(1);
            };
            let parser = match BmpParser::from_path(path) {
                Ok(p) => p,
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            };
            let total = run(parser, &opts);
            if opts.count {
                println!("total messages: {}", total);
            }
        }
        (None, None) => unreachable!("clap requires FILE or --listen"),
    }
}

/// Serve router connections, each on its own thread with its own decoder.
fn listen(addr: SocketAddr, opts: &Opts) {
    let listener = match TcpListener::bind(addr) {
        Ok(l) => l,
        Err(err) => {
            eprintln!("cannot listen on {}: {}", addr, err);
            std::process::exit(1);
        }
    };
    info!("listening for BMP connections on {}", addr);

    std::thread::scope(|scope| {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(err) => {
                    error!("failed to accept connection: {}", err);
                    continue;
                }
            };
            let peer = stream
                .peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            info!("router {} connected", peer);
            scope.spawn(move || {
                let total = run(BmpParser::new(stream), opts);
                info!("router {} disconnected after {} messages", peer, total);
                if opts.count {
                    println!("{}: {} messages", peer, total);
                }
            });
        }
    });
}

/// Decode the whole stream, printing messages unless only counting. Returns the message count.
fn run<R: Read>(parser: BmpParser<R>, opts: &Opts) -> u64 {
    let parser = match opts.core_dump {
        true => parser.enable_core_dump(),
        false => parser,
    };
    let mut iter = parser.into_message_iter();

    if opts.count {
        iter.by_ref().for_each(drop);
        return iter.count;
    }

    let stdout = std::io::stdout();
    for msg in iter.by_ref() {
        let Some(output_str) = format_message(msg, opts.json) else {
            continue;
        };
        if let Err(e) = writeln!(stdout.lock(), "{}", &output_str) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }
    iter.count
}

fn format_message(msg: BmpMessage, as_json: bool) -> Option<String> {
    let title = msg.to_string();
    let (header, body) = msg.into_parts()?;
    if as_json {
        return Some(json!({"header": header, "body": body}).to_string());
    }

    let summary = match &body {
        MessageBody::RouteMonitoring(rm) => {
            let announced = rm.update.announced_prefixes.iter().join(" ");
            let withdrawn = rm.update.withdrawn_prefixes.iter().join(" ");
            let path = rm
                .update
                .as_path()
                .map(|p| p.to_string())
                .unwrap_or_default();
            format!("A:[{}]|W:[{}]|{}", announced, withdrawn, path)
        }
        MessageBody::StatsReport(report) => report
            .statistics
            .iter()
            .map(|(stat_type, value)| format!("{}={}", stat_type, value))
            .join(","),
        MessageBody::PeerDownNotification(pd) => match &pd.notification {
            Some(n) => format!("{}|{}", pd.reason, n.error),
            None => pd.reason.to_string(),
        },
    };

    Some(format!(
        "{}|{}|{}|{}|{}",
        header.timestamp, header.peer_ip, header.peer_asn, title, summary
    ))
}
