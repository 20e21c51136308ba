//! File logging example
//!
//! Builds the default logger from a JSON configuration document and logs
//! through the free functions.
//!
//! Run with: cargo run --example file_logging

use rust_xlog::prelude::*;
use rust_xlog::{LogConfig, MessageBuffer};
use std::fs;

fn main() -> Result<()> {
    println!("=== XLog - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("xlog-demo");
    fs::create_dir_all(&dir)?;
    let path = dir.join("service.log");

    let config = LogConfig {
        path: Some(path.display().to_string()),
        level: "debug".to_string(),
        stderr_level: "error".to_string(),
        ..Default::default()
    };
    rust_xlog::init_default(&config)?;

    let ctx = Context::background().with_value("request_id", "req-42");
    rust_xlog::debug(&ctx, values!["configuration loaded"]);
    rust_xlog::infof(&ctx, "serving %d routes", values![12]);
    rust_xlog::errorv(&ctx, vec![args(["write failed"]), fields(["path", "/data/out"])]);

    let mut buffer = MessageBuffer::new(values!["batch", 7]);
    buffer.appendf("imported %d rows", values![5000]);
    buffer.append(values!["in", "1.2s"]);
    buffer.flush(&ctx);

    rust_xlog::flush();

    println!("Log file written to {}:\n", path.display());
    print!("{}", fs::read_to_string(&path)?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
