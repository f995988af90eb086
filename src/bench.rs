//! # CRUD Benchmark Runner
//!
//! Drives a [`TodoService`] through four strictly sequential phases
//! (create, read, update, delete) and records how long each phase took.
//! Requests are issued one at a time; a failed request is skipped, never
//! retried, and never aborts the run.

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::todo::{ApiError, Todo, TodoId};

/// Iteration counts the driver walks through, in order.
pub const ITERATION_COUNTS: &[usize] = &[10, 50, 100, 500, 1000];

/// Titles for created todos; a ` #<n>` suffix is appended per request.
pub const TITLES: &[&str] = &[
    "Finish project documentation",
    "Write test cases",
    "Refactor user authentication module",
    "Fix database connection issue",
    "Update frontend UI styles",
    "Prepare project demo slides",
];

/// The operations the benchmark exercises. Implemented over HTTP by
/// [`crate::api::RemoteTodos`] and by in-memory fakes in tests.
pub trait TodoService {
    fn create(&mut self, title: &str) -> Result<Todo, ApiError>;
    fn list(&mut self) -> Result<Vec<Todo>, ApiError>;
    fn update(&mut self, id: &TodoId, completed: bool) -> Result<Todo, ApiError>;
    fn delete(&mut self, id: &TodoId) -> Result<(), ApiError>;
}

/// Requests issued and failed in one phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseCalls {
    pub issued: usize,
    pub failed: usize,
}

impl PhaseCalls {
    fn record<T>(&mut self, res: &Result<T, ApiError>) {
        self.issued += 1;
        if res.is_err() {
            self.failed += 1;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create: PhaseCalls,
    pub read: PhaseCalls,
    pub update: PhaseCalls,
    pub delete: PhaseCalls,
}

/// Timings of one run, in seconds. Field order is the CSV column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenchmarkResult {
    pub iterations: usize,
    pub create_time: f64,
    pub read_time: f64,
    pub update_time: f64,
    pub delete_time: f64,
    pub total_time: f64,
    /// Not persisted.
    pub calls: CallCounts,
}

impl BenchmarkResult {
    /// Builds a record from phase durations; `total_time` is their sum.
    pub fn from_phases(
        iterations: usize,
        create: Duration,
        read: Duration,
        update: Duration,
        delete: Duration,
        calls: CallCounts,
    ) -> Self {
        let create_time = create.as_secs_f64();
        let read_time = read.as_secs_f64();
        let update_time = update.as_secs_f64();
        let delete_time = delete.as_secs_f64();
        Self {
            iterations,
            create_time,
            read_time,
            update_time,
            delete_time,
            total_time: create_time + read_time + update_time + delete_time,
            calls,
        }
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.calls;
        writeln!(f, "---")?;
        writeln!(f, "iterations: {}", self.iterations)?;
        writeln!(
            f,
            "create total: {:.2} s ({} requests, {} failed)",
            self.create_time, c.create.issued, c.create.failed
        )?;
        writeln!(
            f,
            "read total:   {:.2} s ({} requests, {} failed)",
            self.read_time, c.read.issued, c.read.failed
        )?;
        writeln!(
            f,
            "update total: {:.2} s ({} requests, {} failed)",
            self.update_time, c.update.issued, c.update.failed
        )?;
        writeln!(
            f,
            "delete total: {:.2} s ({} requests, {} failed)",
            self.delete_time, c.delete.issued, c.delete.failed
        )?;
        writeln!(f, "total:        {:.2} s", self.total_time)?;
        write!(f, "---")
    }
}

/// Runs one benchmark of `iterations` creates, one list, then one update and
/// one delete per successfully created todo.
///
/// Ids are only collected from creates that succeeded and returned an id, so
/// the update and delete phases may issue fewer than `iterations` calls.
pub fn run_benchmark<S, R>(service: &mut S, iterations: usize, rng: &mut R) -> BenchmarkResult
where
    S: TodoService + ?Sized,
    R: Rng + ?Sized,
{
    println!("starting benchmark, iterations: {}", iterations);
    let mut calls = CallCounts::default();

    let started = Instant::now();
    let mut created: Vec<TodoId> = Vec::with_capacity(iterations);
    for i in 0..iterations {
        let title = format!("{} #{}", random_title(rng), i + 1);
        let res = service.create(&title);
        calls.create.record(&res);
        if let Ok(Todo { id: Some(id), .. }) = res {
            created.push(id);
        }
    }
    let create = started.elapsed();

    // A single list call regardless of how many todos exist.
    let started = Instant::now();
    let res = service.list();
    calls.read.record(&res);
    let read = started.elapsed();

    let started = Instant::now();
    for id in &created {
        let res = service.update(id, true);
        calls.update.record(&res);
    }
    let update = started.elapsed();

    let started = Instant::now();
    for id in &created {
        let res = service.delete(id);
        calls.delete.record(&res);
    }
    let delete = started.elapsed();

    BenchmarkResult::from_phases(iterations, create, read, update, delete, calls)
}

fn random_title<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TITLES.choose(rng).copied().unwrap_or("todo")
}

/// `performance_results_<N>.csv`
pub fn results_filename(iterations: usize) -> String {
    format!("performance_results_{}.csv", iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Records every call; creates succeed unless listed in `fail_creates`.
    #[derive(Default)]
    struct FakeTodos {
        next_id: i64,
        fail_creates: Vec<usize>,
        omit_id: Vec<usize>,
        fail_updates: bool,
        creates: Vec<String>,
        lists: usize,
        updates: Vec<TodoId>,
        deletes: Vec<TodoId>,
    }

    impl TodoService for FakeTodos {
        fn create(&mut self, title: &str) -> Result<Todo, ApiError> {
            let n = self.creates.len();
            self.creates.push(title.to_string());
            if self.fail_creates.contains(&n) {
                return Err(ApiError::Transport("connection refused".into()));
            }
            self.next_id += 1;
            let id = (!self.omit_id.contains(&n)).then_some(TodoId::Int(self.next_id));
            Ok(Todo {
                id,
                title: title.to_string(),
                completed: false,
                due_date: None,
            })
        }

        fn list(&mut self) -> Result<Vec<Todo>, ApiError> {
            self.lists += 1;
            Ok(vec![])
        }

        fn update(&mut self, id: &TodoId, completed: bool) -> Result<Todo, ApiError> {
            assert!(completed);
            self.updates.push(id.clone());
            if self.fail_updates {
                return Err(ApiError::Status {
                    method: "PUT",
                    path: format!("/todos/{}", id),
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(Todo {
                id: Some(id.clone()),
                title: String::new(),
                completed,
                due_date: None,
            })
        }

        fn delete(&mut self, id: &TodoId) -> Result<(), ApiError> {
            self.deletes.push(id.clone());
            Ok(())
        }
    }

    fn ids(range: std::ops::RangeInclusive<i64>) -> Vec<TodoId> {
        range.map(TodoId::Int).collect()
    }

    #[test]
    fn all_creates_succeed_ids_flow_in_order() {
        let mut fake = FakeTodos::default();
        let mut rng = StdRng::seed_from_u64(42);
        let result = run_benchmark(&mut fake, 25, &mut rng);

        assert_eq!(fake.creates.len(), 25);
        assert_eq!(fake.lists, 1);
        assert_eq!(fake.updates, ids(1..=25));
        assert_eq!(fake.deletes, ids(1..=25));
        assert_eq!(result.iterations, 25);
        assert_eq!(result.calls.create, PhaseCalls { issued: 25, failed: 0 });
        assert_eq!(result.calls.read.issued, 1);
        assert_eq!(result.calls.update.issued, 25);
        assert_eq!(result.calls.delete.issued, 25);
    }

    #[test]
    fn titles_come_from_pool_with_sequence_suffix() {
        let mut fake = FakeTodos::default();
        let mut rng = StdRng::seed_from_u64(0);
        run_benchmark(&mut fake, 3, &mut rng);
        for (i, title) in fake.creates.iter().enumerate() {
            let (base, suffix) = title.rsplit_once(" #").unwrap();
            assert!(TITLES.contains(&base), "unexpected title {}", title);
            assert_eq!(suffix, (i + 1).to_string());
        }
    }

    #[test]
    fn failed_or_idless_creates_are_skipped() {
        let mut fake = FakeTodos {
            fail_creates: vec![0, 3, 4],
            omit_id: vec![6],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = run_benchmark(&mut fake, 10, &mut rng);

        // 10 attempts, 3 failures, 1 success without id -> 6 usable ids.
        assert_eq!(fake.creates.len(), 10);
        assert_eq!(result.calls.create, PhaseCalls { issued: 10, failed: 3 });
        assert_eq!(fake.updates.len(), 6);
        assert_eq!(fake.updates, fake.deletes);
        let mut sorted = fake.updates.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
        assert!(!fake.updates.contains(&TodoId::Int(4)));
    }

    #[test]
    fn all_creates_fail_means_no_updates_or_deletes() {
        let mut fake = FakeTodos {
            fail_creates: (0..50).collect(),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let result = run_benchmark(&mut fake, 50, &mut rng);

        assert_eq!(result.calls.create.failed, 50);
        assert_eq!(fake.lists, 1);
        assert!(fake.updates.is_empty());
        assert!(fake.deletes.is_empty());
        assert_eq!(result.calls.update.issued, 0);
        assert_eq!(result.calls.delete.issued, 0);
        assert!(result.update_time < 0.01);
        assert!(result.delete_time < 0.01);
    }

    #[test]
    fn failed_updates_do_not_stop_deletes() {
        let mut fake = FakeTodos {
            fail_updates: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let result = run_benchmark(&mut fake, 4, &mut rng);
        assert_eq!(result.calls.update, PhaseCalls { issued: 4, failed: 4 });
        assert_eq!(fake.deletes, ids(1..=4));
    }

    #[test]
    fn zero_iterations_still_lists_once() {
        let mut fake = FakeTodos::default();
        let mut rng = StdRng::seed_from_u64(4);
        let result = run_benchmark(&mut fake, 0, &mut rng);
        assert!(fake.creates.is_empty());
        assert_eq!(fake.lists, 1);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn total_is_sum_of_phases() {
        let r = BenchmarkResult::from_phases(
            5,
            Duration::from_millis(1500),
            Duration::from_millis(250),
            Duration::from_millis(1000),
            Duration::from_millis(750),
            CallCounts::default(),
        );
        assert_eq!(r.create_time, 1.5);
        assert_eq!(r.read_time, 0.25);
        assert_eq!(r.total_time, 3.5);
    }

    #[test]
    fn summary_uses_two_decimals() {
        let r = BenchmarkResult::from_phases(
            10,
            Duration::from_millis(1234),
            Duration::ZERO,
            Duration::ZERO,
            Duration::ZERO,
            CallCounts::default(),
        );
        let text = r.to_string();
        assert!(text.contains("iterations: 10"));
        assert!(text.contains("create total: 1.23 s"));
        assert!(text.contains("total:        1.23 s"));
    }

    #[test]
    fn filename_embeds_iteration_count() {
        assert_eq!(results_filename(500), "performance_results_500.csv");
        assert_eq!(ITERATION_COUNTS, &[10, 50, 100, 500, 1000]);
    }
}
