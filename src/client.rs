use once_cell::sync::Lazy;

/// Shared blocking client so every benchmark request reuses pooled connections.
///
/// Timeouts are left at the transport defaults.
pub static BLOCKING_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(|| {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("todo-bench/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            eprintln!("failed to build blocking client ({}); using defaults", e);
            reqwest::blocking::Client::new()
        })
});
