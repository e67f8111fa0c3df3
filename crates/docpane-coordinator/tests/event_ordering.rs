//! End-to-end tests that drive the coordinator through its handle, the
//! same way an embedding host would: events are enqueued on the channel
//! and processed by the spawned task in arrival order.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use docpane_common::{CoordinatorError, DocumentUri, LineRange, Placement, SurfaceError, SurfaceId};
use docpane_coordinator::{
    CoordinatorHandle, EditorHost, EditorView, PreviewCoordinator, PreviewFileParams,
    PreviewFileResult, RenderClient, ScrollEditorParams, SurfaceFactory, SurfacePort, VisibleRange,
};

const DOC: &str = "file:///docs/index.rst";
const CONTENT: &str = "http://localhost:5500/index.html";

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Everything the fakes record, in one shared journal so relative order
/// across collaborators is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Recorded {
    RenderRequest(String),
    ScrollView(u32),
    SurfaceCreated(SurfaceId),
    ShowUrl(SurfaceId, String),
    ShowNothing(SurfaceId),
    Reveal(String, LineRange),
}

type Journal = Rc<RefCell<Vec<Recorded>>>;

#[derive(Clone)]
struct FakeHost {
    editors: Rc<RefCell<Vec<EditorView>>>,
    journal: Journal,
}

impl EditorHost for FakeHost {
    fn visible_editors(&self) -> Vec<EditorView> {
        self.editors.borrow().clone()
    }

    fn reveal_range(&self, uri: &DocumentUri, range: LineRange) {
        self.journal
            .borrow_mut()
            .push(Recorded::Reveal(uri.as_str().to_string(), range));
    }
}

#[derive(Clone)]
struct FakeRender {
    content: Option<String>,
    journal: Journal,
}

#[async_trait(?Send)]
impl RenderClient for FakeRender {
    async fn preview_file(
        &self,
        params: PreviewFileParams,
    ) -> Result<PreviewFileResult, CoordinatorError> {
        self.journal
            .borrow_mut()
            .push(Recorded::RenderRequest(params.uri));
        Ok(PreviewFileResult {
            uri: self.content.clone(),
        })
    }

    fn scroll_view(&self, line: u32) {
        self.journal.borrow_mut().push(Recorded::ScrollView(line));
    }
}

struct FakeSurface {
    id: SurfaceId,
    journal: Journal,
}

impl SurfacePort for FakeSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn show_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.journal
            .borrow_mut()
            .push(Recorded::ShowUrl(self.id, url.to_string()));
        Ok(())
    }

    fn show_nothing(&mut self) -> Result<(), SurfaceError> {
        self.journal.borrow_mut().push(Recorded::ShowNothing(self.id));
        Ok(())
    }
}

#[derive(Clone)]
struct FakeFactory {
    next_id: Rc<RefCell<u32>>,
    journal: Journal,
}

impl SurfaceFactory for FakeFactory {
    fn create(&mut self, _placement: Placement) -> Result<Box<dyn SurfacePort>, SurfaceError> {
        let mut next = self.next_id.borrow_mut();
        let id = SurfaceId(*next);
        *next += 1;
        self.journal.borrow_mut().push(Recorded::SurfaceCreated(id));
        Ok(Box::new(FakeSurface {
            id,
            journal: Rc::clone(&self.journal),
        }))
    }
}

struct Harness {
    handle: CoordinatorHandle,
    journal: Journal,
    editors: Rc<RefCell<Vec<EditorView>>>,
    task: tokio::task::JoinHandle<()>,
}

fn spawn_coordinator(content: Option<&str>) -> Harness {
    init_tracing();
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let editors = Rc::new(RefCell::new(Vec::new()));

    let host = FakeHost {
        editors: Rc::clone(&editors),
        journal: Rc::clone(&journal),
    };
    let render = FakeRender {
        content: content.map(String::from),
        journal: Rc::clone(&journal),
    };
    let factory = FakeFactory {
        next_id: Rc::new(RefCell::new(0)),
        journal: Rc::clone(&journal),
    };

    let (coordinator, handle) =
        PreviewCoordinator::new(Box::new(host), Box::new(render), Box::new(factory));
    let task = tokio::task::spawn_local(coordinator.run());

    Harness {
        handle,
        journal,
        editors,
        task,
    }
}

fn editor_at(uri: &str, start_line: u32) -> EditorView {
    EditorView::new(
        uri,
        vec![VisibleRange {
            start_line,
            end_line: start_line + 30,
        }],
    )
}

#[tokio::test]
async fn events_are_processed_in_arrival_order() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let harness = spawn_coordinator(Some(CONTENT));

            harness.handle.open_preview_to_side(editor_at(DOC, 0));
            harness.handle.show_document(
                serde_json::from_value(serde_json::json!({
                    "params": { "uri": CONTENT },
                    "default": null,
                }))
                .unwrap(),
            );
            harness.handle.visible_ranges_changed(editor_at(DOC, 41));
            harness.handle.shutdown();
            harness.task.await.unwrap();

            let journal = harness.journal.borrow();
            assert_eq!(
                *journal,
                vec![
                    Recorded::SurfaceCreated(SurfaceId(0)),
                    Recorded::RenderRequest(DOC.to_string()),
                    Recorded::ShowUrl(SurfaceId(0), CONTENT.to_string()),
                    Recorded::ScrollView(42),
                ]
            );
        })
        .await;
}

#[tokio::test]
async fn server_bounce_recreates_the_session() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let harness = spawn_coordinator(Some(CONTENT));
            harness.editors.borrow_mut().push(editor_at(DOC, 0));

            harness.handle.open_preview_to_side(editor_at(DOC, 0));
            harness.handle.server_stopped();
            harness.handle.server_started();
            harness.handle.shutdown();
            harness.task.await.unwrap();

            let journal = harness.journal.borrow();
            let created: Vec<_> = journal
                .iter()
                .filter(|r| matches!(r, Recorded::SurfaceCreated(_)))
                .collect();
            assert_eq!(created.len(), 2, "restart must create a fresh surface");
        })
        .await;
}

#[tokio::test]
async fn scroll_editor_reveals_through_the_host() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let harness = spawn_coordinator(Some(CONTENT));
            harness.editors.borrow_mut().push(editor_at(DOC, 0));

            harness.handle.open_preview(editor_at(DOC, 0));
            harness.handle.scroll_editor(ScrollEditorParams { line: 50 });
            harness.handle.shutdown();
            harness.task.await.unwrap();

            let journal = harness.journal.borrow();
            assert!(journal.contains(&Recorded::Reveal(
                DOC.to_string(),
                LineRange::new(48, 52)
            )));
        })
        .await;
}

#[tokio::test]
async fn no_content_response_shows_explanatory_state() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let harness = spawn_coordinator(None);

            harness.handle.open_preview_to_side(editor_at(DOC, 0));
            harness.handle.shutdown();
            harness.task.await.unwrap();

            let journal = harness.journal.borrow();
            assert!(journal.contains(&Recorded::ShowNothing(SurfaceId(0))));
        })
        .await;
}
