use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::todo::{Todo, TodoId, TodoPatch};

/// Requests served per operation, for checking what a benchmark actually sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub created: usize,
    pub listed: usize,
    pub updated: usize,
    pub deleted: usize,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
    stats: StoreStats,
}

/// In-memory todo table. Ids are sequential from 1 and never reused.
#[derive(Default)]
pub struct TodoStore {
    inner: Mutex<Inner>,
}

impl TodoStore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, mut todo: Todo) -> Todo {
        let mut inner = self.lock();
        inner.last_id += 1;
        let id = inner.last_id;
        todo.id = Some(TodoId::Int(id));
        inner.todos.insert(id, todo.clone());
        inner.stats.created += 1;
        todo
    }

    /// All todos ordered by id.
    pub fn list(&self) -> Vec<Todo> {
        let mut inner = self.lock();
        inner.stats.listed += 1;
        inner.todos.values().cloned().collect()
    }

    pub fn update(&self, id: i64, patch: TodoPatch) -> Option<Todo> {
        let mut inner = self.lock();
        let todo = inner.todos.get_mut(&id)?;
        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = Some(due_date);
        }
        let todo = todo.clone();
        inner.stats.updated += 1;
        Some(todo)
    }

    pub fn remove(&self, id: i64) -> Option<Todo> {
        let mut inner = self.lock();
        let todo = inner.todos.remove(&id)?;
        inner.stats.deleted += 1;
        Some(todo)
    }

    pub fn len(&self) -> usize {
        self.lock().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StoreStats {
        self.lock().stats
    }
}
