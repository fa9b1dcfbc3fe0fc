// escapehatch/examples/basic_hatch.rs

use escapehatch::{escape_hatch, EhResult, Propagate};
use std::io::Read;
use tracing::{info, warn};

// 1. A function built from several fallible calls, none of which is checked by hand.
fn read_prefix(path: &str, len: usize) -> EhResult<Vec<u8>> {
  escape_hatch(|| {
    let mut buff = vec![0u8; len];
    let mut file = std::fs::File::open(path).eh();
    let read = file.read(&mut buff).eh();
    buff.truncate(read);
    Ok(buff)
  })
}

// 2. Propagation works at any call depth below the hatch.
fn parse_port(raw: &str) -> u16 {
  raw.trim().parse::<u16>().eh()
}

fn parse_endpoint(raw: &str) -> EhResult<(String, u16)> {
  escape_hatch(|| {
    let (host, port) = raw
      .split_once(':')
      .ok_or_else(|| anyhow::anyhow!("missing ':' in endpoint '{}'", raw))
      .eh();
    Ok((host.to_string(), parse_port(port)))
  })
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Basic Escape Hatch Example ---");

  let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
  match read_prefix(manifest, 9) {
    Ok(bytes) => info!("Read prefix: {:?}", String::from_utf8_lossy(&bytes)),
    Err(e) => warn!("Unexpected failure: {:#}", e),
  }
  match read_prefix("does-not-exist.txt", 9) {
    Ok(_) => warn!("Unexpectedly read a missing file"),
    Err(e) => info!("Failed as expected: {:#}", e),
  }

  for raw in ["localhost:8080", "localhost", "localhost:http"] {
    match parse_endpoint(raw) {
      Ok((host, port)) => info!(%raw, %host, port, "Parsed endpoint."),
      Err(e) => info!(%raw, error = %e, "Endpoint rejected."),
    }
  }
}
