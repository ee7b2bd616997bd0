use super::*;
use chrono::{TimeZone, Utc};
use tempfile::tempdir;

fn post(slug: &str, day: u32) -> NewBlogPost {
    NewBlogPost {
        title: format!("Post {slug}"),
        slug: slug.to_string(),
        excerpt: format!("Excerpt for {slug}"),
        content: "<p>Opening a coffee shop takes planning.</p>".into(),
        date: Some(Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()),
        author: "Admin".into(),
        category: "Guides".into(),
        image: "/uploads/a.jpg".into(),
        is_published: true,
        ..Default::default()
    }
}

fn open_store(dir: &tempfile::TempDir) -> BlogStore {
    BlogStore::open(&dir.path().join("data").join("blog.redb")).unwrap()
}

#[test]
fn test_create_assigns_sequential_ids() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let a = store.create(post("first", 1)).unwrap();
    let b = store.create(post("second", 2)).unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(a.read_time, "1 min read");
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_duplicate_slug_conflicts() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    store.create(post("same", 1)).unwrap();
    let err = store.create(post("same", 2)).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_create_rejects_invalid() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let mut bad = post("x", 1);
    bad.title = " ".into();
    assert!(matches!(store.create(bad), Err(StoreError::Validation(_))));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_list_published_newest_first() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    store.create(post("old", 1)).unwrap();
    store.create(post("new", 20)).unwrap();
    let mut draft = post("draft", 25);
    draft.is_published = false;
    store.create(draft).unwrap();

    let slugs: Vec<String> = store
        .list_published()
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(slugs, vec!["new", "old"]);
    assert_eq!(store.list_all().unwrap().len(), 3);
}

#[test]
fn test_get_by_slug_and_id() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let created = store.create(post("cafe-guide", 1)).unwrap();
    assert_eq!(store.get_by_slug("cafe-guide").unwrap(), Some(created.clone()));
    assert_eq!(store.get_by_id(created.id).unwrap(), Some(created));
    assert!(store.get_by_slug("missing").unwrap().is_none());
    assert!(store.get_by_id(99).unwrap().is_none());
}

#[test]
fn test_update_moves_slug_index() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let created = store.create(post("before", 1)).unwrap();
    let updated = store
        .update(
            created.id,
            BlogPostPatch {
                slug: Some("after".into()),
                title: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert!(updated.updated_at >= created.updated_at);
    assert!(store.get_by_slug("before").unwrap().is_none());
    assert_eq!(store.get_by_slug("after").unwrap().unwrap().id, created.id);

    // the old slug is free again
    store.create(post("before", 2)).unwrap();
}

#[test]
fn test_update_slug_conflict() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    store.create(post("taken", 1)).unwrap();
    let other = store.create(post("other", 2)).unwrap();
    let err = store
        .update(
            other.id,
            BlogPostPatch {
                slug: Some("taken".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    assert_eq!(store.get_by_id(other.id).unwrap().unwrap().slug, "other");
}

#[test]
fn test_update_missing_returns_none() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);
    assert!(store.update(42, BlogPostPatch::default()).unwrap().is_none());
}

#[test]
fn test_delete() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let created = store.create(post("gone", 1)).unwrap();
    assert!(store.delete(created.id).unwrap());
    assert!(!store.delete(created.id).unwrap());
    assert!(store.get_by_slug("gone").unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_ids_not_reused_after_delete() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let a = store.create(post("a", 1)).unwrap();
    store.delete(a.id).unwrap();
    let b = store.create(post("b", 2)).unwrap();
    assert_eq!(b.id, 2);
}

#[test]
fn test_search() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let mut tea = post("tea", 1);
    tea.title = "Bubble Tea Shops".into();
    tea.content = "<p>Milk tea is popular.</p>".into();
    store.create(tea).unwrap();
    store.create(post("coffee", 2)).unwrap();
    let mut hidden = post("hidden-tea", 3);
    hidden.title = "Tea draft".into();
    hidden.is_published = false;
    store.create(hidden).unwrap();

    // drafts are searchable, newest first
    let hits: Vec<String> = store.search("TEA").unwrap().into_iter().map(|p| p.slug).collect();
    assert_eq!(hits, vec!["hidden-tea", "tea"]);

    assert_eq!(store.search("coffee shop").unwrap().len(), 2);
    assert!(store.search("espresso").unwrap().is_empty());
    assert!(matches!(store.search("ab"), Err(StoreError::Validation(_))));
    assert!(matches!(store.search("  ab  "), Err(StoreError::Validation(_))));
}

#[test]
fn test_reopen_persists() {
    let dir = tempdir().unwrap();
    {
        let store = open_store(&dir);
        store.create(post("kept", 1)).unwrap();
    }
    let store = open_store(&dir);
    assert!(store.get_by_slug("kept").unwrap().is_some());
    assert_eq!(store.create(post("next", 2)).unwrap().id, 2);
}

#[test]
fn test_find_by_id_or_slug() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);

    let created = store.create(post("guide", 1)).unwrap();
    assert_eq!(store.find("1").unwrap().unwrap().id, created.id);
    assert_eq!(store.find("guide").unwrap().unwrap().id, created.id);
    assert!(store.find("7").unwrap().is_none());
}

#[test]
fn test_score_post() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);
    let engine = RuleEngine::default();

    let mut p = post("coffee-shop-guide", 1);
    p.meta_keywords = Some("coffee shop".into());
    store.create(p).unwrap();

    let scored = store.score_post(&engine, "coffee-shop-guide", None).unwrap();
    assert_eq!(scored.keyword.as_deref(), Some("coffee shop"));
    assert_eq!(scored.result.total(), crate::rules::RULE_COUNT);
    assert_eq!(
        scored.result.bucket_of("slug-keyword"),
        Some(crate::models::Bucket::Passed)
    );

    let err = store.score_post(&engine, "nope", Some("cafe")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_audit_covers_every_post() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir);
    store.create(post("one", 1)).unwrap();
    store.create(post("two", 2)).unwrap();

    let scores = store.audit(&RuleEngine::default(), Some("coffee")).unwrap();
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s.result.total() == crate::rules::RULE_COUNT));
}
