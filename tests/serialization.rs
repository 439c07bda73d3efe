mod common;

use std::cell::RefCell;
use std::rc::Rc;

use assert_matches::assert_matches;
use common::*;
use netabase_snapshot::prelude::*;
use serde_json::{Value, json};

#[test_log::test]
fn json_payload_uses_frozen_state() -> SnapshotResult<()> {
    let author = Record::new(7u64, user("Ada"));
    let record = Record::new(1u64, post("Hello"));
    record.update(|p| p.tags.push("rust".into()));
    record.set_belongs_to("author", Some(&live(&author)))?;

    let snapshot = record.create_snapshot(SnapshotOptions::default());
    record.update(|p| p.title = "Changed".into());

    let payload = snapshot.serialize(&SerializeOptions::default())?;
    assert_eq!(
        payload,
        json!({
            "title": "Hello",
            "body": null,
            "tags": ["rust"],
            "publishedAt": null,
            "author": "7",
        })
    );
    Ok(())
}

#[test]
fn include_id_adds_primary_key() -> SnapshotResult<()> {
    let first = Record::new(2u64, comment("First"));
    let second = Record::new(3u64, comment("Second"));
    let record = Record::new(1u64, post("Hello"));
    record.set_belongs_to("author", None)?;
    record.set_has_many("comments", &[live(&first), live(&second)])?;

    let payload = record
        .create_snapshot(SnapshotOptions::default())
        .serialize(&SerializeOptions::with_id())?;

    assert_eq!(payload["id"], json!("1"));
    assert_eq!(payload["author"], Value::Null);
    assert_eq!(payload["comments"], json!(["2", "3"]));
    Ok(())
}

#[test]
fn unsaved_record_has_no_id_key() -> SnapshotResult<()> {
    let payload = Record::new_unsaved(comment("Draft"))
        .create_snapshot(SnapshotOptions::default())
        .serialize(&SerializeOptions::with_id())?;

    assert_eq!(payload, json!({ "body": "Draft" }));
    Ok(())
}

#[test]
fn custom_primary_key() -> SnapshotResult<()> {
    let store = Store::with_serializers(SerializerRegistry::new(JsonSerializer::with_primary_key("_key")));
    let record = store.push("c-1", comment("Hi"));

    let payload = record
        .create_snapshot(SnapshotOptions::default())
        .serialize(&SerializeOptions::with_id())?;
    assert_eq!(payload, json!({ "_key": "c-1", "body": "Hi" }));
    Ok(())
}

/// Records every title it is asked to serialize.
#[derive(Default)]
struct TitleLog {
    seen: Rc<RefCell<Vec<Value>>>,
}

impl Serializer for TitleLog {
    fn serialize(&self, snapshot: &Snapshot, _: &SerializeOptions) -> SnapshotResult<Value> {
        let title = snapshot.attr("title")?.clone();
        self.seen.borrow_mut().push(title.clone());
        Ok(json!({ "headline": title }))
    }
}

#[test_log::test]
fn model_serializer_overrides_application_serializer() -> SnapshotResult<()> {
    let log = TitleLog::default();
    let seen = Rc::clone(&log.seen);
    let mut registry = SerializerRegistry::default();
    registry.register("post", log);
    let store = Store::with_serializers(registry);

    let record = store.push(1u64, post("Hello"));
    let snapshot = record.create_snapshot(SnapshotOptions::default());
    record.update(|p| p.title = "Later".into());

    assert_eq!(snapshot.serialize(&SerializeOptions::default())?, json!({ "headline": "Hello" }));
    assert_eq!(*seen.borrow(), vec![json!("Hello")]);

    // Models without their own serializer use the application one.
    let user_payload = store
        .push(7u64, user("Ada"))
        .create_snapshot(SnapshotOptions::default())
        .serialize(&SerializeOptions::default())?;
    assert_eq!(user_payload, json!({ "name": "Ada" }));
    Ok(())
}

#[test]
fn store_exposes_serializer_lookup() -> SnapshotResult<()> {
    let mut registry = SerializerRegistry::default();
    registry.register("post", TitleLog::default());
    let store = Store::with_serializers(registry);

    let snapshot = Record::new(1u64, post("Hello")).create_snapshot(SnapshotOptions::default());

    let via_post = store.serializer_for("post").serialize(&snapshot, &SerializeOptions::default())?;
    assert_eq!(via_post, json!({ "headline": "Hello" }));
    assert!(Rc::ptr_eq(&store.serializer_for("user"), &store.serializer_for("comment")));
    Ok(())
}

#[test]
fn serialization_resolves_and_caches_identifier_slots() -> SnapshotResult<()> {
    let ada = Record::new(7u64, user("Ada"));
    let grace = Record::new(8u64, user("Grace"));
    let record = Record::new(1u64, post("Hello"));
    record.set_belongs_to("author", Some(&live(&ada)))?;

    let snapshot = record.create_snapshot(SnapshotOptions::default());
    let first = snapshot.serialize(&SerializeOptions::default())?;
    assert!(snapshot.is_relationship_resolved("author", ResolveMode::Identifier));
    assert!(snapshot.is_relationship_resolved("comments", ResolveMode::Identifier));
    assert!(!snapshot.is_relationship_resolved("author", ResolveMode::Full));

    record.set_belongs_to("author", Some(&live(&grace)))?;
    assert_eq!(snapshot.serialize(&SerializeOptions::default())?, first);
    assert_eq!(first["author"], json!("7"));
    assert!(first.get("comments").is_none());
    Ok(())
}

#[test]
fn attribute_named_like_primary_key_is_rejected() -> SnapshotResult<()> {
    let store = Store::with_serializers(SerializerRegistry::new(JsonSerializer::with_primary_key("name")));
    let snapshot = store
        .push(5u64, user("Ada"))
        .create_snapshot(SnapshotOptions::default());

    assert_matches!(
        snapshot.serialize(&SerializeOptions::with_id()),
        Err(SnapshotError::PayloadKeyConflict { model_name: "user", ref key }) if key == "name"
    );
    // Without the id there is nothing to collide with.
    assert_eq!(snapshot.serialize(&SerializeOptions::default())?, json!({ "name": "Ada" }));
    Ok(())
}

#[test]
fn unsaved_related_records_follow_id_listing() -> SnapshotResult<()> {
    let saved = Record::new(2u64, comment("Saved"));
    let draft = Record::new_unsaved(comment("Draft"));
    let draft_author = Record::new_unsaved(user("Anonymous"));
    let record = Record::new(1u64, post("Hello"));
    record.set_has_many("comments", &[live(&saved), live(&draft)])?;
    record.set_belongs_to("author", Some(&live(&draft_author)))?;

    let snapshot = record.create_snapshot(SnapshotOptions::default());
    let payload = snapshot.serialize(&SerializeOptions::default())?;

    let listed = snapshot.has_many("comments", HasManyOptions::ids())?;
    assert_eq!(listed.ids(), Some(vec![&RecordId::from(2u64)]));
    assert_eq!(payload["comments"], json!(["2"]));
    assert_eq!(payload["author"], Value::Null);
    Ok(())
}

/// Fails the way a real serializer might: on malformed JSON or with a message.
struct Failing {
    malformed: bool,
}

impl Serializer for Failing {
    fn serialize(&self, snapshot: &Snapshot, _: &SerializeOptions) -> SnapshotResult<Value> {
        if self.malformed {
            let parsed: Value = serde_json::from_str("{ \"title\": ")?;
            return Ok(parsed);
        }
        Err(SnapshotError::Other(format!("cannot serialize {}", snapshot.identity())))
    }
}

#[test]
fn serializer_errors_reach_the_caller() {
    let mut registry = SerializerRegistry::new(Failing { malformed: false });
    registry.register("post", Failing { malformed: true });
    let store = Store::with_serializers(registry);

    let post_snapshot = store
        .push(1u64, post("Hello"))
        .create_snapshot(SnapshotOptions::default());
    assert_matches!(
        post_snapshot.serialize(&SerializeOptions::default()),
        Err(SnapshotError::Serialization(_))
    );

    let user_snapshot = store
        .push(7u64, user("Ada"))
        .create_snapshot(SnapshotOptions::default());
    let err = user_snapshot
        .serialize(&SerializeOptions::default())
        .expect_err("application serializer fails");
    assert_matches!(err, SnapshotError::Other(ref message) if message == "cannot serialize user:7");
}
