// # todo_bench: CRUD Benchmark for a REST Todo API
//
// Drives create/list/update/delete requests against a todo service in timed,
// strictly sequential phases and appends the phase durations to CSV files.
//
// The runner, persister and data model have no optional dependencies. The
// HTTP client sits behind the `reqwest` feature and the in-memory todo
// service behind `actix-web`.

/// Todo wire types, due-date generation and the service error type.
pub mod todo;

/// The benchmark runner and the `TodoService` seam it drives.
pub mod bench;

/// CSV persistence of benchmark results.
pub mod record;

/// Shared blocking HTTP client. Enabled with the `reqwest` feature.
#[cfg(feature = "reqwest")]
pub mod client;

/// Blocking client for the todo REST API. Enabled with the `reqwest` feature.
#[cfg(feature = "reqwest")]
pub mod api;

/// In-memory todo service. Enabled with the `actix-web` feature.
#[cfg(feature = "actix-web")]
pub mod www;
