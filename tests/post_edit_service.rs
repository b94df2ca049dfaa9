use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::macros::datetime;

use quire::application::admin::posts::{AdminPostEditService, AdminPostError, PostEditOptions};
use quire::application::repos::{PostsWriteRepo, RepoError, UpdatePostParams};
use quire::domain::editor::{EditorPhase, EditorTab};
use quire::domain::entities::{CategoryRecord, PostRecord};
use quire::domain::form::{FieldChange, PostField, ValidatedPost};
use quire::domain::types::PostStatus;
use quire::infra::memory::InMemoryRepositories;

/// Writer that records every dispatched update and echoes it back.
#[derive(Default)]
struct RecordingWriter {
    calls: Mutex<Vec<UpdatePostParams>>,
}

impl RecordingWriter {
    fn calls(&self) -> Vec<UpdatePostParams> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl PostsWriteRepo for RecordingWriter {
    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        self.calls.lock().expect("calls lock").push(params.clone());
        Ok(PostRecord {
            id: params.id,
            title: params.title,
            content: params.content,
            status: params.status,
            category_id: params.category_id,
            created_at: datetime!(2024-01-01 00:00 UTC),
            updated_at: datetime!(2024-01-02 00:00 UTC),
        })
    }
}

fn fixture() -> (Arc<InMemoryRepositories>, Arc<RecordingWriter>, AdminPostEditService) {
    let repos = Arc::new(InMemoryRepositories::with_records(
        vec![PostRecord {
            id: 1,
            title: "Hello".into(),
            content: "# Heading\n\nBody".into(),
            status: PostStatus::Published,
            category_id: 2,
            created_at: datetime!(2024-01-01 00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00 UTC),
        }],
        vec![
            CategoryRecord {
                id: 1,
                title: "Tech".into(),
            },
            CategoryRecord {
                id: 2,
                title: "Life".into(),
            },
        ],
    ));
    let writer = Arc::new(RecordingWriter::default());
    let service = AdminPostEditService::new(
        repos.clone(),
        writer.clone(),
        repos.clone(),
        PostEditOptions {
            warn_when_unsaved_changes: true,
            category_page_size: 1,
        },
    );
    (repos, writer, service)
}

#[tokio::test]
async fn load_seeds_defaults_without_marking_unsaved() {
    let (_, _, service) = fixture();

    let loaded = service.load_editor(1).await.expect("load");

    assert_eq!(loaded.editor.phase(), EditorPhase::Ready);
    assert!(!loaded.editor.has_unsaved_changes());
    assert_eq!(loaded.editor.value(PostField::Category), "2");
    assert_eq!(loaded.editor.value(PostField::Status), "published");
    let titles: Vec<_> = loaded.categories.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Tech", "Life"]);
}

#[tokio::test]
async fn load_of_missing_post_is_not_found() {
    let (_, _, service) = fixture();

    let result = service.load_editor(9).await;

    assert!(matches!(result, Err(AdminPostError::NotFound(9))));
}

#[tokio::test]
async fn empty_title_blocks_dispatch() {
    let (_, writer, service) = fixture();
    let mut editor = service.load_editor(1).await.expect("load").editor;
    editor
        .change(&[FieldChange::new(PostField::Title, "   ")])
        .expect("change");

    let result = service.submit(&mut editor).await;

    match result {
        Err(AdminPostError::Validation(errors)) => {
            assert_eq!(errors.get(PostField::Title), Some("Title is required"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(writer.calls().is_empty());
    assert!(editor.has_unsaved_changes());
}

#[tokio::test]
async fn draft_selection_is_dispatched() {
    let (_, writer, service) = fixture();
    let mut editor = service.load_editor(1).await.expect("load").editor;
    editor
        .change(&[FieldChange::new(PostField::Status, "draft")])
        .expect("change");
    editor.select_tab(EditorTab::Preview);
    editor.select_tab(EditorTab::Write);

    let saved = service.submit(&mut editor).await.expect("submit");

    assert_eq!(saved.status, PostStatus::Draft);
    assert_eq!(editor.phase(), EditorPhase::Done);
    assert!(!editor.has_unsaved_changes());

    let calls = writer.calls();
    assert_eq!(calls.len(), 1);
    let dispatched = ValidatedPost {
        title: calls[0].title.clone(),
        content: calls[0].content.clone(),
        status: calls[0].status,
        category_id: calls[0].category_id,
    };
    insta::assert_json_snapshot!(dispatched, @r###"
    {
      "title": "Hello",
      "content": "# Heading\n\nBody",
      "status": "draft",
      "category_id": 2
    }
    "###);
}

#[tokio::test]
async fn unknown_category_is_rejected_without_dispatch() {
    let (_, writer, service) = fixture();
    let mut editor = service.load_editor(1).await.expect("load").editor;
    editor
        .change(&[FieldChange::new(PostField::Category, "5")])
        .expect("change");

    let result = service.submit(&mut editor).await;

    assert!(matches!(result, Err(AdminPostError::Validation(_))));
    assert_eq!(
        editor.errors().get(PostField::Category),
        Some("Category does not exist")
    );
    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert!(writer.calls().is_empty());
}

#[tokio::test]
async fn store_failure_leaves_the_record_and_the_flag() {
    let (repos, _, _) = fixture();
    let service = AdminPostEditService::new(
        repos.clone(),
        repos.clone(),
        repos.clone(),
        PostEditOptions::default(),
    );
    let mut editor = service.load_editor(1).await.expect("load").editor;
    editor
        .change(&[FieldChange::new(PostField::Title, "Changed")])
        .expect("change");
    repos.set_fail_writes(true);

    let result = service.submit(&mut editor).await;

    assert!(matches!(
        result,
        Err(AdminPostError::Repo(RepoError::Persistence(_)))
    ));
    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert!(editor.has_unsaved_changes());
    assert_eq!(repos.post(1).expect("post").title, "Hello");
}
