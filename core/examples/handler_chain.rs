// escapehatch/examples/handler_chain.rs

use escapehatch::{from_failable, Hatch, Propagate, Sentinel, Targets};
use tracing::info;

// 1. Sentinel failures used as classifiers.
static CACHE_MISS: Sentinel = Sentinel::new("cache miss");
static REPLICA_DOWN: Sentinel = Sentinel::new("replica down");
static PRIMARY_DOWN: Sentinel = Sentinel::new("primary down");

fn read_cache(key: &str) -> Result<String, Sentinel> {
  info!(%key, "Reading cache");
  Err(CACHE_MISS)
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Handler Chain Example ---");

  // 2. Handlers fire last-registered-first. Each one either recovers or hands a
  //    (possibly different) failure to the next handler outward.
  let value = Hatch::named("profile_lookup")
    .fallback("<default profile>".to_string(), Targets::of(PRIMARY_DOWN))
    .catch_error(
      |failure| {
        info!(error = %failure, "Replica unavailable; trying primary");
        from_failable(Some(PRIMARY_DOWN)).eh();
        unreachable!()
      },
      Targets::of(REPLICA_DOWN),
    )
    .catch_error(
      |failure| {
        info!(error = %failure, "Cache missed; trying replica");
        from_failable(Some(REPLICA_DOWN)).eh();
        unreachable!()
      },
      Targets::of(CACHE_MISS),
    )
    .run(|| Ok(read_cache("user:42").eh()));

  match value {
    Ok(profile) => info!(%profile, "Lookup finished."),
    Err(e) => info!(error = %e, "Lookup failed."),
  }

  // 3. A failure no handler targets reaches the hatch untouched.
  let unmatched = Hatch::new()
    .fallback(0, Targets::of(CACHE_MISS))
    .run(|| Ok("not a number".parse::<i32>().eh()));
  info!(is_err = unmatched.is_err(), "Unmatched failure passed through.");
}
