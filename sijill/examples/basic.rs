//! Wires a small mail pipeline with Sijill.
//!
//! Run with `RUST_LOG=sijill_container=trace` to watch the resolver.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sijill::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

// === Define your types ===

#[derive(Injectable)]
struct Config {
    relay: String,
    sender: String,
}

#[derive(Injectable)]
struct Transport {
    #[injectable(inject)]
    config: Arc<Config>,
    #[injectable(default)]
    delivered: Arc<AtomicUsize>,
}

impl Transport {
    fn deliver(&self, to: &str, body: &str) {
        let n = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;
        info!(relay = %self.config.relay, to, n, "Delivered: {body}");
    }
}

type Template = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Injectable)]
struct Newsletter {
    #[injectable(inject)]
    transport: Arc<Transport>,
    #[injectable(inject)]
    config: Arc<Config>,
    template: Template,
    recipients: Vec<&'static str>,
}

impl Newsletter {
    fn publish(&self, issue: &str) {
        for to in &self.recipients {
            let body = format!("{} (from {})", (self.template)(issue), self.config.sender);
            self.transport.deliver(to, &body);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sijill_container=debug")),
        )
        .init();

    let template: Template = Arc::new(|issue: &str| format!("Issue #{issue} is out"));

    let mut registry = Registry::new();
    registry
        // Config — one shared instance
        .register_singleton::<Config>(args![
            String::from("smtp.example.com"),
            String::from("news@example.com")
        ])?
        // Transport — singleton, built from Config as registered right now
        .register_singleton::<Transport>(args![@Config])?
        // Newsletter — fresh every resolve
        .register::<Newsletter>(args![@Transport, @Config, template])
        .append_args::<Newsletter>(args![vec!["ada@example.com", "linus@example.com"]])?;

    info!(?registry, "Registry wired");

    registry.resolve::<Newsletter>()?.publish("42");
    registry.resolve::<Newsletter>()?.publish("43");

    let transport = registry.resolve::<Transport>()?;
    info!(total = transport.delivered.load(Ordering::SeqCst), "Done");
    Ok(())
}
