use crate::support::{Context, load_service_or_exit};
use std::net::SocketAddr;
use std::process;
use uxlearn_ux::http::{HttpServerConfig, serve_lesson_api};

pub fn run(ctx: &Context, bind: Option<String>) {
    let bind = bind.unwrap_or_else(|| ctx.config.server.bind.clone());
    let bind_addr: SocketAddr = bind.parse().unwrap_or_else(|e| {
        eprintln!("error: invalid --bind address `{bind}`: {e}");
        process::exit(1);
    });

    let service = load_service_or_exit(ctx);

    println!("uxlearn serve");
    println!("  bind: {bind_addr}");
    println!("  catalog: {}", ctx.catalog_label());
    println!("  routes:");
    println!("    GET /healthz");
    println!("    GET /modules?completed=<id>,<id>");
    println!("    GET /lesson?id=<lesson_id>");
    println!("    GET /check?lesson=<lesson_id>&step=<n>&place=<item>:<category>");

    if let Err(e) = serve_lesson_api(HttpServerConfig { bind: bind_addr }, &service) {
        eprintln!("error: lesson API failed: {e}");
        process::exit(1);
    }
}
