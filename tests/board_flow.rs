use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;

use project_board::model::{Draft, DraftMode, Filter, ProjectStatus};
use project_board::store::{Fields, Observer};
use project_board::{
    BoardError, Document, DocumentStore, LocalStore, NoticeKind, ProjectBoard, StoreError,
    Subscription,
};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Insert(Fields),
    Update(String, Fields),
    Delete(String),
}

/// Records every request and forwards to an in-memory store.
#[derive(Clone, Default)]
struct RecordingStore {
    inner: LocalStore,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingStore {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocumentStore for RecordingStore {
    fn subscribe(&self, collection: &str, observer: Observer) -> Result<Subscription, StoreError> {
        self.inner.subscribe(collection, observer)
    }

    fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.calls.lock().unwrap().push(Call::Insert(fields.clone()));
        self.inner.insert(collection, fields)
    }

    fn update_by_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(id.to_string(), fields.clone()));
        self.inner.update_by_id(collection, id, fields)
    }

    fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
        self.inner.delete_by_id(collection, id)
    }
}

/// Accepts subscriptions, pushes whatever snapshot the test asks for, and
/// rejects every request.
#[derive(Clone, Default)]
struct FailingStore {
    observer: Arc<Mutex<Option<Observer>>>,
    releases: Arc<AtomicUsize>,
}

impl FailingStore {
    fn push(&self, docs: Vec<Document>) {
        if let Some(observer) = self.observer.lock().unwrap().as_ref() {
            observer(docs);
        }
    }

    fn refused() -> StoreError {
        StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }
}

impl DocumentStore for FailingStore {
    fn subscribe(&self, _collection: &str, observer: Observer) -> Result<Subscription, StoreError> {
        *self.observer.lock().unwrap() = Some(observer);
        let slot = self.observer.clone();
        let releases = self.releases.clone();
        Ok(Subscription::new(move || {
            releases.fetch_add(1, Ordering::SeqCst);
            slot.lock().unwrap().take();
        }))
    }

    fn insert(&self, _collection: &str, _fields: Fields) -> Result<String, StoreError> {
        Err(Self::refused())
    }

    fn update_by_id(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<(), StoreError> {
        Err(Self::refused())
    }

    fn delete_by_id(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(Self::refused())
    }
}

fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("fields must be an object"),
    }
}

fn alpha_doc() -> Document {
    Document {
        id: "1".into(),
        fields: fields(json!({
            "title": "Alpha",
            "techStack": "Go",
            "status": "In Progress",
            "dueDate": "2024-01-01"
        })),
    }
}

fn fill(draft: &mut Draft) {
    draft.title = "Alpha".into();
    draft.description = "first".into();
    draft.tech_stack = "Go".into();
    draft.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    draft.status = Some(ProjectStatus::InProgress);
}

#[test]
fn test_new_draft_sends_exactly_one_insert() {
    let store = RecordingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    fill(board.draft_mut());

    board.submit().unwrap();
    assert!(board.wait_idle(WAIT));

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    let Call::Insert(sent) = &calls[0] else {
        panic!("expected an insert, got {:?}", calls[0]);
    };
    assert_eq!(
        sent,
        &fields(json!({
            "title": "Alpha",
            "description": "first",
            "techStack": "Go",
            "dueDate": "2024-01-01",
            "status": "In Progress"
        }))
    );
    assert_eq!(board.draft(), &Draft::default());
}

#[test]
fn test_editing_draft_sends_exactly_one_update() {
    let store = RecordingStore::default();
    let id = store
        .inner
        .insert("projects", alpha_doc().fields)
        .unwrap();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();

    let project = board.project(&id).cloned().unwrap();
    board.begin_edit(&project);
    assert_eq!(board.draft().mode, DraftMode::Editing(id.clone()));
    board.draft_mut().title = "Alpha v2".into();

    board.submit().unwrap();
    assert!(board.wait_idle(WAIT));

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    let Call::Update(target, sent) = &calls[0] else {
        panic!("expected an update, got {:?}", calls[0]);
    };
    assert_eq!(target, &id);
    assert!(!sent.contains_key("id"));
    assert_eq!(sent["title"], json!("Alpha v2"));
    assert_eq!(board.projects()[0].title, "Alpha v2");
    assert_eq!(board.draft(), &Draft::default());
}

#[test]
fn test_scenario_filters_single_in_progress_row() {
    let store = FailingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    store.push(vec![alpha_doc()]);
    board.poll();

    board.set_filter(Filter::Active);
    let visible = board.visible_projects();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Alpha");
    assert_eq!(visible[0].due_date_display(), "1/1/2024");

    board.set_filter(Filter::Completed);
    assert!(board.visible_projects().is_empty());
}

#[test]
fn test_delete_waits_for_snapshot_to_remove_row() {
    let store = RecordingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    let id = store.inner.insert("projects", alpha_doc().fields).unwrap();
    board.poll();
    assert_eq!(board.projects().len(), 1);

    board.delete(&id);
    // Nothing is removed locally until a snapshot is applied.
    assert_eq!(board.projects().len(), 1);

    assert!(board.wait_idle(WAIT));
    assert_eq!(store.calls(), vec![Call::Delete(id)]);
    assert!(board.projects().is_empty());
    assert_eq!(board.notice().map(|n| n.kind), Some(NoticeKind::Success));
}

#[test]
fn test_delete_without_snapshot_keeps_row() {
    let store = FailingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    store.push(vec![alpha_doc()]);
    board.poll();

    board.delete("1");
    assert!(board.wait_idle(WAIT));

    assert_eq!(board.projects().len(), 1);
    let notice = board.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.starts_with("Error deleting project:"));
}

#[test]
fn test_failed_submit_keeps_draft_for_retry() {
    let store = FailingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    fill(board.draft_mut());
    let before = board.draft().clone();

    board.submit().unwrap();
    assert!(board.wait_idle(WAIT));

    assert_eq!(board.draft(), &before);
    let notice = board.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("Store operation failed"));
    assert_eq!(board.in_flight(), 0);
}

#[test]
fn test_failed_update_stays_in_edit_mode() {
    let store = FailingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    store.push(vec![alpha_doc()]);
    board.poll();

    let project = board.project("1").cloned().unwrap();
    board.begin_edit(&project);
    board.draft_mut().title = "Alpha v2".into();
    let before = board.draft().clone();

    board.submit().unwrap();
    assert!(board.wait_idle(WAIT));

    assert_eq!(board.draft().mode, DraftMode::Editing("1".into()));
    assert_eq!(board.draft(), &before);
    assert_eq!(board.draft().title, "Alpha v2");
    let notice = board.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.starts_with("Error saving project:"));
    assert_eq!(board.projects()[0].title, "Alpha");
}

#[test]
fn test_every_stored_document_becomes_a_row() {
    let store = LocalStore::in_memory();
    store
        .insert("projects", alpha_doc().fields)
        .unwrap();
    store
        .insert(
            "projects",
            fields(json!({ "title": "Nulls", "description": null, "status": "New" })),
        )
        .unwrap();
    store
        .insert(
            "projects",
            fields(json!({ "title": "Millis", "dueDate": 1704067200000_i64 })),
        )
        .unwrap();

    let board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();

    assert_eq!(board.projects().len(), 3);
    let mut titles: Vec<&str> = board.projects().iter().map(|p| p.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Alpha", "Millis", "Nulls"]);
    let millis = board.projects().iter().find(|p| p.title == "Millis").unwrap();
    assert_eq!(millis.due_date_display(), "1/1/2024");
}

#[test]
fn test_incomplete_draft_is_rejected_without_request() {
    let store = RecordingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    fill(board.draft_mut());
    board.draft_mut().due_date = None;

    let err = board.submit().unwrap_err();
    assert!(matches!(err, BoardError::Incomplete(_)));
    assert!(store.calls().is_empty());
}

#[test]
fn test_two_rapid_submits_are_independent_requests() {
    let store = RecordingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    fill(board.draft_mut());

    board.submit().unwrap();
    board.submit().unwrap();
    assert_eq!(board.in_flight(), 2);
    assert!(board.wait_idle(WAIT));

    assert_eq!(store.calls().len(), 2);
    assert_eq!(board.projects().len(), 2);
}

#[test]
fn test_subscription_released_exactly_once() {
    let store = FailingStore::default();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();

    board.unmount();
    board.unmount();
    drop(board);

    assert_eq!(store.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_waker_fires_for_snapshots_and_outcomes() {
    let store = LocalStore::in_memory();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    let mut board = ProjectBoard::mount(Arc::new(store.clone()), "projects", move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    let after_mount = wakes.load(Ordering::SeqCst);
    assert_eq!(after_mount, 1);

    fill(board.draft_mut());
    board.submit().unwrap();
    assert!(board.wait_idle(WAIT));

    // The snapshot wake happens before the insert returns; the outcome wake
    // follows the outcome send on the worker thread.
    assert!(wakes.load(Ordering::SeqCst) > after_mount);
    let deadline = std::time::Instant::now() + WAIT;
    while wakes.load(Ordering::SeqCst) < after_mount + 2 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(wakes.load(Ordering::SeqCst), after_mount + 2);
}

#[test]
fn test_boards_sharing_a_store_see_each_others_changes() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = LocalStore::open(tmp.path().join("projects.json")).unwrap();
    let mut writer = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();
    let mut reader = ProjectBoard::mount(Arc::new(store.clone()), "projects", || {}).unwrap();

    fill(writer.draft_mut());
    writer.submit().unwrap();
    assert!(writer.wait_idle(WAIT));

    reader.poll();
    assert_eq!(reader.projects().len(), 1);
    assert_eq!(reader.projects()[0].tech_stack, "Go");

    let reopened = LocalStore::open(tmp.path().join("projects.json")).unwrap();
    assert_eq!(reopened.documents("projects").unwrap().len(), 1);
}
