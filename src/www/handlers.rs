//! # Todo REST Handlers
//!
//! `POST/GET /todos` and `PUT/DELETE /todos/{id}`, mounted under `/api/v1`
//! by [`super::configure`].

use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use super::store::TodoStore;
use crate::todo::{Todo, TodoPatch};

fn not_found(id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": format!("todo {} not found", id) }))
}

/// GET /todos: a bare JSON array ordered by id.
pub async fn list(store: web::Data<TodoStore>) -> impl Responder {
    HttpResponse::Ok().json(store.list())
}

/// POST /todos. Any client-supplied id is replaced.
pub async fn create(store: web::Data<TodoStore>, body: web::Json<Todo>) -> impl Responder {
    HttpResponse::Created().json(store.insert(body.into_inner()))
}

/// PUT /todos/{id}. Accepts a partial body as well as a full todo.
pub async fn update(
    store: web::Data<TodoStore>,
    path: web::Path<i64>,
    body: web::Json<TodoPatch>,
) -> impl Responder {
    let id = path.into_inner();
    match store.update(id, body.into_inner()) {
        Some(todo) => HttpResponse::Ok().json(todo),
        None => not_found(id),
    }
}

/// DELETE /todos/{id}.
pub async fn delete(store: web::Data<TodoStore>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match store.remove(id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(id),
    }
}
