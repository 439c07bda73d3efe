use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use netabase_snapshot::prelude::*;

#[derive(Model, Clone, Debug)]
#[model(name = "author", has_many(articles = "article"))]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Model, Clone, Debug)]
#[model(name = "article", belongs_to(author = "author"), has_many(comments = "comment"))]
pub struct Article {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub views: u64,
}

#[derive(Model, Clone, Debug)]
#[model(name = "comment", belongs_to(article = "article"))]
pub struct Comment {
    pub body: String,
}

struct Fixture {
    _store: Store,
    article: Rc<Record<Article>>,
}

fn fixture(comment_count: u64) -> Fixture {
    let store = Store::new();
    let author = store.push(1u64, Author {
        name: "Ada".into(),
        email: "ada@example.com".into(),
    });
    let article = store.push(1u64, Article {
        title: "Benchmarks".into(),
        body: "x".repeat(512),
        tags: vec!["rust".into(), "orm".into()],
        views: 0,
    });

    let comments: Vec<RecordRef> = (0..comment_count)
        .map(|i| -> RecordRef { store.push(i, Comment { body: format!("comment {i}") }) })
        .collect();

    let author: RecordRef = author;
    article
        .set_belongs_to("author", Some(&author))
        .expect("author is declared");
    article
        .set_has_many("comments", &comments)
        .expect("comments are declared");
    article.update(|a| a.views += 1);

    Fixture {
        _store: store,
        article,
    }
}

fn bench_snapshot_construction(c: &mut Criterion) {
    let fixture = fixture(0);
    c.bench_function("snapshot_construction", |b| {
        b.iter(|| black_box(fixture.article.create_snapshot(SnapshotOptions::default())))
    });
}

fn bench_relationship_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_many_resolution");

    for size in [10u64, 100, 1000] {
        let fixture = fixture(size);

        group.bench_with_input(BenchmarkId::new("ids", size), &size, |b, _| {
            b.iter(|| {
                let snapshot = fixture.article.create_snapshot(SnapshotOptions::default());
                black_box(snapshot.has_many("comments", HasManyOptions::ids()).ok())
            })
        });

        group.bench_with_input(BenchmarkId::new("snapshots", size), &size, |b, _| {
            b.iter(|| {
                let snapshot = fixture.article.create_snapshot(SnapshotOptions::default());
                black_box(snapshot.has_many("comments", HasManyOptions::default()).ok())
            })
        });

        group.bench_with_input(BenchmarkId::new("cached", size), &size, |b, _| {
            let snapshot = fixture.article.create_snapshot(SnapshotOptions::default());
            b.iter(|| black_box(snapshot.has_many("comments", HasManyOptions::ids()).ok()))
        });
    }

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let fixture = fixture(100);
    c.bench_function("json_serialize", |b| {
        b.iter(|| {
            let snapshot = fixture.article.create_snapshot(SnapshotOptions::default());
            black_box(snapshot.serialize(&SerializeOptions::with_id()).ok())
        })
    });
}

criterion_group!(
    benches,
    bench_snapshot_construction,
    bench_relationship_resolution,
    bench_serialization
);
criterion_main!(benches);
