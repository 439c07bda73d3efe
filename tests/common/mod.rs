// Common test fixtures: a small blog schema with users, posts and comments.

#![allow(dead_code)]

use std::rc::Rc;

use netabase_snapshot::prelude::*;

#[derive(Model, Clone, Debug, PartialEq)]
#[model(name = "user", has_many(posts = "post"))]
pub struct User {
    pub name: String,
}

#[derive(Model, Clone, Debug, PartialEq)]
#[model(name = "post", belongs_to(author = "user"), has_many(comments = "comment"))]
pub struct Post {
    pub title: String,
    pub body: Option<String>,
    pub tags: Vec<String>,
    #[model(rename = "publishedAt")]
    pub published_at: Option<u64>,
    #[model(skip)]
    pub render_cache: Option<String>,
}

#[derive(Model, Clone, Debug, PartialEq)]
#[model(belongs_to(post = "post"))]
pub struct Comment {
    pub body: String,
}

pub fn user(name: &str) -> User {
    User { name: name.into() }
}

pub fn post(title: &str) -> Post {
    Post {
        title: title.into(),
        body: None,
        tags: Vec::new(),
        published_at: None,
        render_cache: None,
    }
}

pub fn comment(body: &str) -> Comment {
    Comment { body: body.into() }
}

/// Erases a typed record handle into the shared live-record handle.
pub fn live<M: Model>(record: &Rc<Record<M>>) -> RecordRef {
    record.clone()
}
