//! Site Example - Browse the portfolio in the terminal
//!
//! Scroll with j/k, arrows, PageUp/PageDown or the mouse wheel. `m` opens the
//! menu, `1`..`9` jump to a section, `c` copies the email, `q` quits.
//!
//! Logs go to `spark-folio.log` (the terminal belongs to the renderer).
//!
//! Run with: cargo run --example site [-- path/to/site.json]

use std::fs::File;
use std::sync::Mutex;

use spark_folio::{pipeline::mount, SiteConfig};
use tracing_subscriber::prelude::*;

fn main() -> spark_folio::Result<()> {
    let log = File::create("spark-folio.log")?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("spark_folio=debug,info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(log)))
        .with(env_filter)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };

    let mut handle = mount::mount(config)?;
    mount::run(&mut handle)?;
    handle.unmount()
}
