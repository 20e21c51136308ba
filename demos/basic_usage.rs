//! Basic logger usage example
//!
//! Demonstrates the three calling conventions at every level, routed to the
//! console.
//!
//! Run with: cargo run --example basic_usage

use rust_xlog::prelude::*;

fn main() -> Result<()> {
    println!("=== XLog - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .handler(ConsoleHandler::new().with_min_level(Level::Debug))
        .caller(true)
        .build();
    let ctx = Context::background();

    println!("1. Positional arguments at each level:");
    logger.debug(&ctx, values!["cache warmed with", 1024, "entries"]);
    logger.info(&ctx, values!["listening on port", 8080]);
    logger.warning(&ctx, values!["disk usage", 91.5]);
    logger.error(&ctx, values!["upstream unreachable"]);

    println!("\n2. Printf-style templates:");
    logger.infof(&ctx, "user %s signed in from %s", values!["alice", "10.0.0.7"]);
    logger.warningf(&ctx, "retry %d of %d in %.1fs", values![2, 5, 1.5]);

    println!("\n3. Structured records:");
    logger.infov(
        &ctx,
        vec![argsf("order %d shipped", [4411]), fields(["carrier", "dhl", "items", "3"])],
    );

    println!("\n4. PANIC and FATAL are only levels here; nothing terminates:");
    logger.panic(&ctx, values!["would panic behind a TerminatingHandler"]);
    logger.fatal(&ctx, values!["would exit behind a TerminatingHandler"]);

    println!("\n5. Output formats:");
    let json = Logger::builder()
        .handler(ConsoleHandler::stdout().with_output_format(OutputFormat::Json))
        .handler(ConsoleHandler::stdout().with_output_format(OutputFormat::Logfmt))
        .build();
    json.infov(&ctx, vec![args(["formatted twice"]), fields(["format", "json+logfmt"])]);

    logger.flush();
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
