//! # Local Todo Service
//!
//! An in-memory implementation of the `/api/v1/todos` REST API, so the
//! benchmark can be pointed at something without a real backend.
//!
//! ## Submodules
//! - `handlers`: actix-web request handlers for each endpoint.
//! - `store`: the shared in-memory todo table.

pub mod handlers;
pub mod store;

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;

use actix_web::{App, HttpServer, web};

pub use store::{StoreStats, TodoStore};

/// Port the benchmarked backend listens on by default.
pub const DEFAULT_PORT: u16 = 1111;

/// Mounts the todo routes under `/api/v1`. Expects `web::Data<TodoStore>`
/// to be registered as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/todos", web::get().to(handlers::list))
            .route("/todos", web::post().to(handlers::create))
            .route("/todos/{id}", web::put().to(handlers::update))
            .route("/todos/{id}", web::delete().to(handlers::delete)),
    );
}

/// Starts the todo service on a background thread and returns the bound
/// address once the listener is up. Binding port 0 picks a free port.
pub fn spawn<A>(addr: A, store: web::Data<TodoStore>) -> io::Result<SocketAddr>
where
    A: ToSocketAddrs + Send + 'static,
{
    serve(addr, move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(store.clone());
        configure(cfg);
    })
}

/// Serves whatever routes `routes` mounts, on a background thread with its
/// own actix system.
pub fn serve<A, F>(addr: A, routes: F) -> io::Result<SocketAddr>
where
    A: ToSocketAddrs + Send + 'static,
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let res = actix_web::rt::System::new().block_on(async move {
            let server = match HttpServer::new(move || App::new().configure(routes.clone()))
                .workers(1)
                .bind(addr)
            {
                Ok(server) => server,
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return Ok(());
                }
            };
            let bound = server
                .addrs()
                .first()
                .copied()
                .ok_or_else(|| io::Error::other("server bound no address"));
            let _ = tx.send(bound);
            server.run().await
        });
        if let Err(e) = res {
            eprintln!("todo service stopped: {}", e);
        }
    });
    rx.recv().map_err(io::Error::other)?
}
