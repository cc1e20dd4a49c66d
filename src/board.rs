//! Board state: a live mirror of the project collection plus the edit form.
//!
//! The project list only ever changes by applying a snapshot pushed by the
//! store. Requests run on worker threads and their outcomes are applied on
//! the caller's thread in [`ProjectBoard::poll`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{BoardError, Result, StoreError};
use crate::model::{Draft, DraftMode, Filter, Project};
use crate::store::{Document, DocumentStore, Fields, Subscription};

/// Called whenever a snapshot or request outcome is waiting to be polled.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The latest acknowledgement or failure shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Insert,
    Update,
    Delete,
}

enum Request {
    Insert(Fields),
    Update { id: String, fields: Fields },
    Delete { id: String },
}

impl Request {
    fn kind(&self) -> RequestKind {
        match self {
            Request::Insert(_) => RequestKind::Insert,
            Request::Update { .. } => RequestKind::Update,
            Request::Delete { .. } => RequestKind::Delete,
        }
    }

    fn run(self, store: &dyn DocumentStore, collection: &str) -> std::result::Result<(), StoreError> {
        match self {
            Request::Insert(fields) => {
                let id = store.insert(collection, fields)?;
                tracing::info!(collection, %id, "project inserted");
            }
            Request::Update { id, fields } => {
                store.update_by_id(collection, &id, fields)?;
                tracing::info!(collection, %id, "project updated");
            }
            Request::Delete { id } => {
                store.delete_by_id(collection, &id)?;
                tracing::info!(collection, %id, "project deleted");
            }
        }
        Ok(())
    }
}

struct Outcome {
    kind: RequestKind,
    result: std::result::Result<(), StoreError>,
}

pub struct ProjectBoard {
    store: Arc<dyn DocumentStore>,
    collection: String,
    projects: Vec<Project>,
    draft: Draft,
    filter: Filter,
    notice: Option<Notice>,
    in_flight: usize,
    subscription: Option<Subscription>,
    snapshots: Receiver<Vec<Document>>,
    outcomes_tx: Sender<Outcome>,
    outcomes: Receiver<Outcome>,
    waker: Waker,
}

impl ProjectBoard {
    /// Subscribe to `collection` and mirror it. The initial snapshot is
    /// applied before this returns if the store delivers it synchronously.
    pub fn mount(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        waker: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self> {
        let collection = collection.into();
        let waker: Waker = Arc::new(waker);

        let (snapshot_tx, snapshots) = mpsc::channel();
        let notify = Arc::clone(&waker);
        let subscription = store.subscribe(
            &collection,
            Box::new(move |docs| {
                if snapshot_tx.send(docs).is_ok() {
                    notify();
                }
            }),
        )?;
        tracing::info!(%collection, "board mounted");

        let (outcomes_tx, outcomes) = mpsc::channel();
        let mut board = Self {
            store,
            collection,
            projects: Vec::new(),
            draft: Draft::default(),
            filter: Filter::default(),
            notice: None,
            in_flight: 0,
            subscription: Some(subscription),
            snapshots,
            outcomes_tx,
            outcomes,
            waker,
        };
        board.poll();
        Ok(board)
    }

    /// Release the subscription. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::info!(collection = %self.collection, "board unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    // ── State ───────────────────────────────────────────────────

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Form fields write straight into the draft.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn visible_projects(&self) -> Vec<&Project> {
        self.filter.apply(&self.projects)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Replace the notice with an application-level message.
    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    // ── Operations ──────────────────────────────────────────────

    pub fn begin_edit(&mut self, project: &Project) {
        self.draft = Draft::editing(project);
    }

    pub fn cancel_edit(&mut self) {
        self.draft = Draft::default();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Send the draft to the store: an update when editing, an insert
    /// otherwise. The draft is reset once the store acknowledges.
    pub fn submit(&mut self) -> Result<()> {
        let fields = match self.draft.to_fields() {
            Ok(fields) => fields,
            Err(missing) => {
                let err = BoardError::Incomplete(missing);
                self.notice = Some(Notice::error(err.to_string()));
                return Err(err);
            }
        };
        let fields = fields
            .into_document_fields()
            .map_err(|e| BoardError::Store(e.into()))?;
        let request = match &self.draft.mode {
            DraftMode::New => Request::Insert(fields),
            DraftMode::Editing(id) => Request::Update {
                id: id.clone(),
                fields,
            },
        };
        self.dispatch(request);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) {
        self.dispatch(Request::Delete { id: id.to_string() });
    }

    // ── Event loop plumbing ─────────────────────────────────────

    /// Apply waiting request outcomes and the newest snapshot. Returns true
    /// if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.settle(outcome);
            changed = true;
        }
        if let Some(docs) = self.snapshots.try_iter().last() {
            self.apply_snapshot(docs);
            changed = true;
        }
        changed
    }

    /// Block until every outstanding request has settled or `timeout`
    /// elapses, then poll. Returns true if nothing is left in flight.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.outcomes.recv_timeout(remaining) {
                Ok(outcome) => self.settle(outcome),
                Err(_) => break,
            }
        }
        self.poll();
        self.in_flight == 0
    }

    fn apply_snapshot(&mut self, docs: Vec<Document>) {
        self.projects = docs.iter().map(Project::from_document).collect();
        tracing::debug!(count = self.projects.len(), "snapshot applied");
    }

    fn dispatch(&mut self, request: Request) {
        self.in_flight += 1;
        let kind = request.kind();
        let store = Arc::clone(&self.store);
        let collection = self.collection.clone();
        let tx = self.outcomes_tx.clone();
        let waker = Arc::clone(&self.waker);

        let spawned = thread::Builder::new()
            .name("store-request".into())
            .spawn(move || {
                let result = request.run(store.as_ref(), &collection);
                if tx.send(Outcome { kind, result }).is_ok() {
                    waker();
                }
            });
        if let Err(e) = spawned {
            self.settle(Outcome {
                kind,
                result: Err(StoreError::Io(e)),
            });
        }
    }

    fn settle(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match (outcome.kind, outcome.result) {
            (RequestKind::Insert, Ok(())) => {
                self.notice = Some(Notice::success("Project added successfully!"));
                self.draft = Draft::default();
            }
            (RequestKind::Update, Ok(())) => {
                self.notice = Some(Notice::success("Project updated successfully!"));
                self.draft = Draft::default();
            }
            (RequestKind::Delete, Ok(())) => {
                self.notice = Some(Notice::success("Project deleted successfully!"));
            }
            (RequestKind::Insert | RequestKind::Update, Err(e)) => {
                let err = BoardError::from(e);
                tracing::error!(error = %err, "error saving project");
                self.notice = Some(Notice::error(format!("Error saving project: {err}")));
            }
            (RequestKind::Delete, Err(e)) => {
                let err = BoardError::from(e);
                tracing::error!(error = %err, "error deleting project");
                self.notice = Some(Notice::error(format!("Error deleting project: {err}")));
            }
        }
    }
}

impl Drop for ProjectBoard {
    fn drop(&mut self) {
        self.unmount();
    }
}
