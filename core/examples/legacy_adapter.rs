// escapehatch/examples/legacy_adapter.rs

use escapehatch::{escape_hatch_failure, escape_hatch_pair, Failure, Propagate};
use std::collections::HashMap;
use tracing::info;

// 1. An existing dispatch interface that reports failures as a bare value.
trait Command {
  fn name(&self) -> &'static str;
  fn execute(&self, args: &[&str]) -> Option<Failure>;
}

struct SetLimit;

impl Command for SetLimit {
  fn name(&self) -> &'static str {
    "set-limit"
  }

  fn execute(&self, args: &[&str]) -> Option<Failure> {
    escape_hatch_failure(|| {
      let raw = args.first().ok_or_else(|| anyhow::anyhow!("set-limit needs one argument")).eh();
      let limit = raw.parse::<u32>().eh();
      info!(limit, "Limit updated.");
      None
    })
  }
}

// 2. A pair-returning function that uses `.eh()` internally.
fn lookup_limit(table: &HashMap<&str, &str>, key: &str) -> (u32, Option<Failure>) {
  escape_hatch_pair(|| {
    let raw = table.get(key).ok_or_else(|| anyhow::anyhow!("no limit for '{}'", key)).eh();
    (raw.parse::<u32>().eh(), None)
  })
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Legacy Adapter Example ---");

  let command: Box<dyn Command> = Box::new(SetLimit);
  for args in [vec!["10"], vec![], vec!["ten"]] {
    match command.execute(&args) {
      None => info!(command = command.name(), ?args, "Command succeeded."),
      Some(e) => info!(command = command.name(), ?args, error = %e, "Command failed."),
    }
  }

  let table = HashMap::from([("api", "100"), ("batch", "many")]);
  for key in ["api", "batch", "stream"] {
    let (limit, failure) = lookup_limit(&table, key);
    info!(%key, limit, failed = failure.is_some(), "Looked up limit.");
  }
}
