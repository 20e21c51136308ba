//! Middleware example
//!
//! Shows instance layers, a process-wide layer, sampling and a layer that
//! suppresses records.
//!
//! Run with: cargo run --example middleware

use rust_xlog::prelude::*;
use std::sync::Arc;

fn main() {
    println!("=== XLog - Middleware Example ===\n");

    // Applies to every logger in the process
    let hostname: Arc<dyn Middleware> = Arc::new(|ctx: &Context, p: &mut Params, next: Next<'_>| {
        p.fields.extend(values!["host", "web-1"]);
        next.run(ctx, p);
    });
    register_global_middleware([hostname]);

    let logger = Logger::builder()
        .handler(ConsoleHandler::stdout().with_output_format(OutputFormat::Logfmt))
        .middleware(ContextFields::new(["request_id"]))
        .middleware(StaticFields::new(values!["service", "checkout"]))
        // Drop health checks entirely
        .middleware(|ctx: &Context, p: &mut Params, next: Next<'_>| {
            if p.message().starts_with("GET /healthz") {
                return;
            }
            next.run(ctx, p);
        })
        .middleware(Sampler::new(0.25))
        .build();

    let ctx = Context::background().with_value("request_id", "req-7");

    println!("1. Fields from globals, static values and the context:");
    logger.errorf(&ctx, "payment declined for %s", values!["order-19"]);

    println!("\n2. Health checks are suppressed:");
    logger.info(&ctx, values!["GET /healthz 200"]);

    println!("\n3. About a quarter of 20 INFO records get through:");
    for i in 0..20 {
        logger.infof(&ctx, "GET /cart %d", values![i]);
    }

    println!("\n=== Example completed successfully! ===");
}
