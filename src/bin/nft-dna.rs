//! nft-dna CLI — metadata server and DNA tooling
//!
//! Commands:
//!   nft-dna serve   — start the metadata HTTP server
//!   nft-dna resolve — resolve a token id to trait metadata
//!   nft-dna encode  — pack gene values at bit offsets
//!   nft-dna decode  — unpack gene values from a DNA word
//!   nft-dna traits  — show the configured trait table
//!   nft-dna dna     — compose a DNA from option indices

use nft_dna::config::ServerConfig;
use nft_dna::server;
use nft_dna::species::{parse_dna, resolve, SpecieMetadata};
use nft_dna::{decode, encode, GenePositions, U256};
use std::env;
use std::error::Error;
use std::path::Path;

const CONFIG_FILE: &str = "nft-dna.json";
const ENV_CONFIG: &str = "NFT_DNA_CONFIG";

type CmdResult = Result<(), Box<dyn Error>>;

fn print_usage() {
    println!(
        r#"
nft-dna v0.1 — DNA codec and NFT trait metadata server

Usage: nft-dna <command> [options]

Commands:
  serve    [port]                   Start the metadata server
  resolve  <tokenId>                Print resolved metadata for a token
  encode   <positions> <values>     Pack values (comma-separated) at bit offsets
  decode   <dna> <positions>        Unpack values from a DNA word
  traits                            Show the trait table and its fingerprint
  dna      <index,index,...>        Compose a DNA from option indices

Configuration:
  {config} (or ${env_config}) with keys host, port, traits_path.
  NFT_DNA_HOST, NFT_DNA_PORT, NFT_DNA_TRAITS override the file.

Examples:
  nft-dna serve 8080
  nft-dna resolve 26
  nft-dna encode 0,8,24,32,40 255,65535,0,1,100000
  nft-dna decode 0x186a00100ffffff 0,8,24,32,40
  nft-dna dna 2,1,0
"#,
        config = CONFIG_FILE,
        env_config = ENV_CONFIG,
    );
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "serve" => cmd_serve(&args[2..]).await,
        "resolve" => cmd_resolve(&args[2..]),
        "encode" => cmd_encode(&args[2..]),
        "decode" => cmd_decode(&args[2..]),
        "traits" => cmd_traits(),
        "dna" => cmd_dna(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        std::process::exit(1);
    }
}

/// Config file (if present) overlaid with environment overrides
fn load_config() -> Result<ServerConfig, Box<dyn Error>> {
    let explicit = env::var(ENV_CONFIG).ok();
    let path = explicit.as_deref().unwrap_or(CONFIG_FILE);
    let config = if explicit.is_some() || Path::new(path).exists() {
        ServerConfig::load(path)?
    } else {
        ServerConfig::default()
    };
    Ok(config.with_env()?)
}

fn load_species(config: &ServerConfig) -> Result<SpecieMetadata, Box<dyn Error>> {
    Ok(match &config.traits_path {
        Some(path) => SpecieMetadata::load(path)?,
        None => SpecieMetadata::default_collection(),
    })
}

fn parse_list<T>(
    what: &str,
    text: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, Box<dyn Error>> {
    text.split(',')
        .map(|s| {
            parse(s.trim())
                .ok_or_else(|| Box::<dyn Error>::from(format!("invalid {} '{}'", what, s)))
        })
        .collect()
}

fn parse_positions(text: &str) -> Result<GenePositions, Box<dyn Error>> {
    let offsets = parse_list("position", text, |s| s.parse::<usize>().ok())?;
    Ok(GenePositions::new(offsets)?)
}

async fn cmd_serve(args: &[String]) -> CmdResult {
    let mut config = load_config()?;
    if let Some(port) = args.first() {
        config.port = port.parse().map_err(|_| format!("invalid port '{}'", port))?;
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };
    server::serve(&config, shutdown).await?;
    Ok(())
}

fn cmd_resolve(args: &[String]) -> CmdResult {
    let token = args.first().ok_or("Usage: nft-dna resolve <tokenId>")?;
    let species = load_species(&load_config()?)?;
    let dna = parse_dna(token)?;
    let metadata = resolve(dna, &species);
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "metadata": metadata }))?);
    Ok(())
}

fn cmd_encode(args: &[String]) -> CmdResult {
    if args.len() < 2 {
        return Err("Usage: nft-dna encode <positions> <values>".into());
    }
    let positions = parse_positions(&args[0])?;
    let values: Vec<U256> = parse_list("value", &args[1], |s| parse_dna(s).ok())?;
    let dna = encode(&values, &positions)?;
    println!("  dna (dec): {}", dna);
    println!("  dna (hex): {:#x}", dna);
    Ok(())
}

fn cmd_decode(args: &[String]) -> CmdResult {
    if args.len() < 2 {
        return Err("Usage: nft-dna decode <dna> <positions>".into());
    }
    let dna = parse_dna(&args[0])?;
    let positions = parse_positions(&args[1])?;
    let values = decode(dna, &positions);
    println!("  {:>6}  {:>6}  value", "offset", "width");
    for (i, value) in values.iter().enumerate() {
        println!("  {:>6}  {:>6}  {}", positions.offsets()[i], positions.width(i), value);
    }
    Ok(())
}

fn cmd_traits() -> CmdResult {
    let config = load_config()?;
    let species = load_species(&config)?;
    match &config.traits_path {
        Some(path) => println!("\n  Source: {}", path.display()),
        None => println!("\n  Source: built-in collection"),
    }
    println!("  {}", species.summary());
    println!("  Fingerprint: {}", species.fingerprint());
    println!("  {}", "-".repeat(60));
    for (i, t) in species.traits().iter().enumerate() {
        let names: Vec<&str> = t.options.iter().map(|o| o.value_name.as_str()).collect();
        println!("  [{}] {} ({}): {}", i, t.name, t.display_type, names.join(", "));
    }
    Ok(())
}

fn cmd_dna(args: &[String]) -> CmdResult {
    let text = args.first().ok_or("Usage: nft-dna dna <index,index,...>")?;
    let indices = parse_list("index", text, |s| s.parse::<usize>().ok())?;
    let species = load_species(&load_config()?)?;
    let dna = species.dna_for(&indices)?;
    println!("  dna: {}", dna);
    Ok(())
}
