//! Simulated proxy session exercising the whitelist end to end:
//! operator commands, login checks, temporary entries, and the
//! on/off switch. Run with `RUST_LOG=debug` to watch the state changes.

use std::time::Duration;

use gateward::{Verdict, Whitelist, format_duration};
use tracing_subscriber::EnvFilter;

/// Pretty-prints one login attempt the way a proxy log would.
async fn attempt_login(wl: &Whitelist, name: &str) {
    match wl.check(name).await {
        Verdict::Allowed => println!("  [login] {name}: connected"),
        Verdict::Disabled => println!("  [login] {name}: connected (whitelist off)"),
        Verdict::Denied => println!("  [login] {name}: kicked (not whitelisted)"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dir = std::env::temp_dir().join("gateward-proxy-sim");
    let path = dir.join("whitelist.json");
    let wl = Whitelist::open(&path).await;
    println!("whitelist file: {}", path.display());

    // Reclaim expired temporary entries once a minute in the background.
    let sweeper = wl.spawn_sweeper(Duration::from_secs(60));

    println!("\n-- operator: add steve, addtemp visitor_7 1h30m --");
    if let Err(err) = wl.add("steve").await {
        println!("  add steve: {err}");
    }
    match wl.add_temp("visitor_7", "1h30m").await {
        Ok(duration) => {
            println!("  visitor_7 whitelisted for {}", format_duration(duration))
        }
        Err(err) => println!("  addtemp visitor_7: {err}"),
    }

    println!("\n-- logins with the whitelist on --");
    attempt_login(&wl, "steve").await;
    attempt_login(&wl, "visitor_7").await;
    attempt_login(&wl, "stranger_99").await;

    println!("\n-- operator misuse: bad name, bad duration, duplicate --");
    for (cmd, result) in [
        ("add ab", wl.add("ab").await),
        ("add steve", wl.add("steve").await),
    ] {
        if let Err(err) = result {
            println!("  {cmd}: {err}");
        }
    }
    if let Err(err) = wl.add_temp("visitor_8", "0s").await {
        println!("  addtemp visitor_8 0s: {err}");
    }

    println!("\n-- operator: off, then the same stranger connects --");
    wl.disable().await;
    attempt_login(&wl, "stranger_99").await;
    wl.enable().await;

    println!("\n-- current list --");
    let (permanent, temporary) = wl.list().await;
    println!("  permanent: {}", permanent.join(", "));
    for (name, expiry) in temporary {
        println!("  temporary: {name} (expires {expiry:?})");
    }

    sweeper.abort();
    wl.flush().await?;
    Ok(())
}
