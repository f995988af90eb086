use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use clap::Parser;
use todo_bench::www::{self, TodoStore};

#[derive(Parser, Debug)]
#[command(
    name = "todo_stub",
    about = "Serve an in-memory todo API under /api/v1 for benchmarking"
)]
struct Args {
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    bind: String,

    #[arg(long, env = "PORT", default_value_t = www::DEFAULT_PORT)]
    port: u16,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let bind_address = format!("{}:{}", args.bind, args.port);

    eprintln!("Starting todo service at: http://{}/api/v1/todos", bind_address);
    eprintln!("Benchmark it with: TODO_API_URL=http://{}/api/v1 perf", bind_address);

    let store = web::Data::new(TodoStore::default());
    HttpServer::new(move || App::new().app_data(store.clone()).configure(www::configure))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("todo service stopped")
}
