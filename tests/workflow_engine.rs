// tests/workflow_engine.rs
use pressroom::application::{
    commands::post_versions::{
        AcceptCommand, AssignModeratorCommand, PostVersionChangesCommand, RejectCommand,
        RequestChangesCommand,
    },
    error::ApplicationError,
};
use pressroom::domain::{
    category::CategoryId,
    errors::DomainError,
    post::{Post, PostId, PostSlug},
    post_version::{
        CoverPath, PostVersion, PostVersionActionKind, PostVersionContent,
        PostVersionDescription, PostVersionId, PostVersionStatus, PostVersionTitle,
    },
    user::UserId,
};
use serde_json::json;
use std::sync::Arc;

mod support;

use support::{
    FailingCoverStorage, TestApp, admin, author, cover_upload, fixed_now, moderator, new_command,
    other_author,
};

fn seeded_version(id: i64, status: PostVersionStatus, post_id: Option<i64>) -> PostVersion {
    PostVersion {
        id: PostVersionId::new(id).unwrap(),
        post_id: post_id.map(|id| PostId::new(id).unwrap()),
        author_id: Some(UserId::new(1).unwrap()),
        assigned_moderator_id: None,
        category_id: CategoryId::new(1).unwrap(),
        title: PostVersionTitle::new("Seeded title").unwrap(),
        description: PostVersionDescription::new("Seeded description").unwrap(),
        content: PostVersionContent::new("Seeded content").unwrap(),
        cover: CoverPath::new("images/seeded.png").unwrap(),
        status,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

fn assert_invalid_transition(
    err: ApplicationError,
    current: PostVersionStatus,
    expected: PostVersionStatus,
) {
    match err {
        ApplicationError::Domain(DomainError::InvalidTransition {
            current: got_current,
            expected: got_expected,
        }) => {
            assert_eq!(got_current, current);
            assert_eq!(got_expected, expected);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
}

async fn pending_version(app: &TestApp, title: &str) -> i64 {
    app.services
        .post_version_commands
        .submit_new(&author(), new_command(title))
        .await
        .expect("submit new")
        .id
}

#[tokio::test]
async fn create_draft_has_no_log_and_no_post() {
    let app = TestApp::new();
    let dto = app
        .services
        .post_version_commands
        .create_draft(&author(), new_command("First draft"))
        .await
        .unwrap();

    assert_eq!(dto.status, PostVersionStatus::Draft);
    assert_eq!(dto.post_id, None);
    assert_eq!(dto.author_id, Some(1));
    assert_eq!(dto.cover, "images/cover-1.png");
    assert!(app.store.actions_of(dto.id).await.is_empty());
    assert!(app.store.snapshot().await.posts.is_empty());
}

#[tokio::test]
async fn submit_new_logs_a_submit_entry() {
    let app = TestApp::new();
    let id = pending_version(&app, "Straight to review").await;

    let actions = app.store.actions_of(id).await;
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, PostVersionActionKind::Submit);
    assert_eq!(actions[0].user_id, Some(UserId::new(1).unwrap()));
    assert_eq!(actions[0].kind.details(), json!({}));
    assert_eq!(
        app.store.version(id).await.unwrap().status,
        PostVersionStatus::Pending
    );
}

#[tokio::test]
async fn accept_with_explicit_slug_creates_post() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let draft = commands
        .create_draft(&author(), new_command("My Article"))
        .await
        .unwrap();
    commands
        .submit(&author(), draft.id, PostVersionChangesCommand::default())
        .await
        .unwrap();

    let accepted = commands
        .accept(
            &moderator(),
            draft.id,
            AcceptCommand {
                slug: Some("my-article".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(accepted.status, PostVersionStatus::Accepted);
    assert_eq!(accepted.assigned_moderator_id, Some(2));

    let state = app.store.snapshot().await;
    assert_eq!(state.posts.len(), 1);
    let post = state.posts.values().next().unwrap();
    assert_eq!(post.slug.as_str(), "my-article");
    assert_eq!(accepted.post_id, Some(i64::from(post.id)));

    let actions = app.store.actions_of(draft.id).await;
    let last = actions.last().unwrap();
    assert_eq!(last.kind, PostVersionActionKind::Accept);
    assert_eq!(last.user_id, Some(UserId::new(2).unwrap()));
    assert_eq!(last.kind.details(), json!({}));
}

#[tokio::test]
async fn accepting_a_linked_version_touches_its_post() {
    let app = TestApp::new();
    let created = fixed_now() - chrono::Duration::days(1);
    app.store
        .seed_post(Post {
            id: PostId::new(7).unwrap(),
            slug: PostSlug::new("existing").unwrap(),
            created_at: created,
            updated_at: created,
        })
        .await;
    app.store
        .seed_version(seeded_version(5, PostVersionStatus::Pending, Some(7)))
        .await;

    let accepted = app
        .services
        .post_version_commands
        .accept(
            &moderator(),
            5,
            AcceptCommand {
                slug: Some("ignored".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(accepted.post_id, Some(7));
    let state = app.store.snapshot().await;
    assert_eq!(state.posts.len(), 1);
    let post = &state.posts[&7];
    assert_eq!(post.slug.as_str(), "existing");
    assert!(post.updated_at > created);
    assert_eq!(post.created_at, created);
}

#[tokio::test]
async fn request_changes_returns_same_version_to_draft() {
    let app = TestApp::new();
    let id = pending_version(&app, "Needs work").await;

    let dto = app
        .services
        .post_version_commands
        .request_changes(
            &admin(),
            id,
            RequestChangesCommand {
                message: "fix typo".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(dto.id, id);
    assert_eq!(dto.status, PostVersionStatus::Draft);
    assert_eq!(dto.assigned_moderator_id, Some(3));

    let actions = app.store.actions_of(id).await;
    assert_eq!(actions.len(), 2);
    assert_eq!(
        actions[1].kind,
        PostVersionActionKind::RequestChanges {
            message: "fix typo".into()
        }
    );
    assert_eq!(actions[1].kind.details(), json!({ "message": "fix typo" }));
    assert_eq!(actions[1].user_id, Some(UserId::new(3).unwrap()));
}

#[tokio::test]
async fn rejected_versions_are_terminal() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let id = pending_version(&app, "Off topic").await;

    commands
        .reject(
            &moderator(),
            id,
            RejectCommand {
                reason: "off topic".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let log_len = app.store.actions_of(id).await.len();
    assert_eq!(
        app.store.actions_of(id).await[1].kind.details(),
        json!({ "reason": "off topic" })
    );

    let err = commands
        .accept(&moderator(), id, AcceptCommand::default())
        .await
        .unwrap_err();
    assert_invalid_transition(err, PostVersionStatus::Rejected, PostVersionStatus::Pending);

    let err = commands
        .submit(&author(), id, PostVersionChangesCommand::default())
        .await
        .unwrap_err();
    assert_invalid_transition(err, PostVersionStatus::Rejected, PostVersionStatus::Draft);

    assert_eq!(app.store.actions_of(id).await.len(), log_len);
    assert!(app.store.snapshot().await.posts.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_accepts_publish_exactly_once() {
    let app = TestApp::new();
    let id = pending_version(&app, "Race").await;

    let first = Arc::clone(&app.services.post_version_commands);
    let second = Arc::clone(&app.services.post_version_commands);
    let a = tokio::spawn(async move {
        first
            .accept(&moderator(), id, AcceptCommand::default())
            .await
    });
    let b = tokio::spawn(async move {
        second
            .accept(&admin(), id, AcceptCommand::default())
            .await
    });
    let (a, b) = tokio::join!(a, b);
    let results = [a.unwrap(), b.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let err = results
        .into_iter()
        .find_map(Result::err)
        .expect("one accept must fail");
    assert_invalid_transition(err, PostVersionStatus::Accepted, PostVersionStatus::Pending);

    let state = app.store.snapshot().await;
    assert_eq!(state.posts.len(), 1);
    let accepts = state
        .actions
        .iter()
        .filter(|a| a.kind == PostVersionActionKind::Accept)
        .count();
    assert_eq!(accepts, 1);
}

#[tokio::test]
async fn update_draft_changes_only_given_fields() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let draft = commands
        .create_draft(&author(), new_command("Original"))
        .await
        .unwrap();

    let updated = commands
        .update_draft(
            &author(),
            draft.id,
            PostVersionChangesCommand::default().with_title("Renamed"),
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, draft.description);
    assert_eq!(updated.content, draft.content);
    assert_eq!(updated.cover, draft.cover);
    assert_eq!(updated.category_id, draft.category_id);
    assert_eq!(updated.status, PostVersionStatus::Draft);
    assert!(updated.updated_at > draft.updated_at);
    assert!(app.store.actions_of(draft.id).await.is_empty());
}

#[tokio::test]
async fn drafts_belong_to_their_author() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let draft = commands
        .create_draft(&author(), new_command("Mine"))
        .await
        .unwrap();

    let err = commands
        .update_draft(
            &other_author(),
            draft.id,
            PostVersionChangesCommand::default().with_title("Hijacked"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)), "{err:?}");

    let err = commands
        .submit(&other_author(), draft.id, PostVersionChangesCommand::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)), "{err:?}");
    assert_eq!(app.store.version(draft.id).await.unwrap().title.as_str(), "Mine");
}

#[tokio::test]
async fn update_draft_requires_draft_status() {
    let app = TestApp::new();
    let id = pending_version(&app, "Queued").await;

    let err = app
        .services
        .post_version_commands
        .update_draft(
            &author(),
            id,
            PostVersionChangesCommand::default().with_title("Too late"),
        )
        .await
        .unwrap_err();
    assert_invalid_transition(err, PostVersionStatus::Pending, PostVersionStatus::Draft);
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let draft = commands
        .create_draft(&author(), new_command("Categorised"))
        .await
        .unwrap();

    let err = commands
        .update_draft(
            &author(),
            draft.id,
            PostVersionChangesCommand::default().with_category(99),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn authors_cannot_review() {
    let app = TestApp::new();
    let id = pending_version(&app, "Self review").await;

    let err = app
        .services
        .post_version_commands
        .accept(&author(), id, AcceptCommand::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)), "{err:?}");
    assert_eq!(
        app.store.version(id).await.unwrap().status,
        PostVersionStatus::Pending
    );
}

#[tokio::test]
async fn blank_review_message_is_rejected() {
    let app = TestApp::new();
    let id = pending_version(&app, "Quiet").await;

    let err = app
        .services
        .post_version_commands
        .request_changes(
            &moderator(),
            id,
            RequestChangesCommand {
                message: "   ".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    match err {
        ApplicationError::InvalidInput(fields) => assert!(fields.get("message").is_some()),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    assert_eq!(app.store.actions_of(id).await.len(), 1);
}

#[tokio::test]
async fn assign_moderator_requires_a_reviewer() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let id = pending_version(&app, "Assignment").await;

    for target in [1, 99] {
        let err = commands
            .assign_moderator(
                &moderator(),
                id,
                AssignModeratorCommand {
                    moderator_id: target,
                },
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApplicationError::Domain(DomainError::ReviewerNotFound(got)) if got == target),
            "{err:?}"
        );
    }

    let before = app.store.version(id).await.unwrap();
    let dto = commands
        .assign_moderator(&moderator(), id, AssignModeratorCommand { moderator_id: 3 })
        .await
        .unwrap();
    assert_eq!(dto.assigned_moderator_id, Some(3));
    assert_eq!(dto.status, PostVersionStatus::Pending);
    assert_eq!(dto.updated_at, before.updated_at);

    let actions = app.store.actions_of(id).await;
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1].kind.details(), json!({ "moderator_id": 3 }));
}

#[tokio::test]
async fn explicit_slug_collision_rolls_back() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let first = pending_version(&app, "One").await;
    let second = pending_version(&app, "Two").await;
    let with_slug = || AcceptCommand {
        slug: Some("shared".into()),
        ..Default::default()
    };

    commands.accept(&moderator(), first, with_slug()).await.unwrap();
    let err = commands
        .accept(&moderator(), second, with_slug())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApplicationError::Domain(DomainError::Conflict(_))),
        "{err:?}"
    );

    let version = app.store.version(second).await.unwrap();
    assert_eq!(version.status, PostVersionStatus::Pending);
    assert_eq!(version.post_id, None);
    assert_eq!(app.store.actions_of(second).await.len(), 1);
    assert_eq!(app.store.snapshot().await.posts.len(), 1);
}

#[tokio::test]
async fn derived_slugs_get_a_counter_suffix() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let first = pending_version(&app, "Hello World").await;
    let second = pending_version(&app, "Hello World").await;

    commands
        .accept(&moderator(), first, AcceptCommand::default())
        .await
        .unwrap();
    commands
        .accept(&moderator(), second, AcceptCommand::default())
        .await
        .unwrap();

    let mut slugs: Vec<String> = app
        .store
        .snapshot()
        .await
        .posts
        .values()
        .map(|post| post.slug.as_str().to_string())
        .collect();
    slugs.sort();
    assert_eq!(slugs, vec!["hello-world", "hello-world-1"]);
}

#[tokio::test]
async fn transliterated_titles_are_shortened_to_a_valid_slug() {
    let app = TestApp::new();
    let commands = &app.services.post_version_commands;
    let cyrillic = "щ".repeat(150);
    let first = pending_version(&app, &cyrillic).await;
    let second = pending_version(&app, &cyrillic).await;
    let cjk = pending_version(&app, &"中文标题".repeat(15)).await;

    for id in [first, second, cjk] {
        commands
            .accept(&moderator(), id, AcceptCommand::default())
            .await
            .unwrap();
    }

    let slugs: Vec<String> = app
        .store
        .snapshot()
        .await
        .posts
        .values()
        .map(|post| post.slug.as_str().to_string())
        .collect();
    assert_eq!(slugs.len(), 3);
    assert!(slugs.iter().all(|slug| slug.len() <= 255));
    assert!(slugs.iter().any(|slug| slug.starts_with("shch") && slug.ends_with("-1")));

    let cjk_slug = slugs
        .iter()
        .find(|slug| slug.starts_with("zhong-wen"))
        .expect("slug derived from the CJK title");
    assert!(!cjk_slug.ends_with('-'));
}

#[tokio::test]
async fn accept_edits_feed_the_derived_slug() {
    let app = TestApp::new();
    let id = pending_version(&app, "Working title").await;

    let dto = app
        .services
        .post_version_commands
        .accept(
            &moderator(),
            id,
            AcceptCommand {
                changes: PostVersionChangesCommand::default().with_title("Final Title"),
                slug: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(dto.title, "Final Title");
    let state = app.store.snapshot().await;
    assert_eq!(state.posts.values().next().unwrap().slug.as_str(), "final-title");
}

#[tokio::test]
async fn failed_cover_write_leaves_version_untouched() {
    let app = TestApp::with_cover_storage(Arc::new(FailingCoverStorage));
    app.store
        .seed_version(seeded_version(1, PostVersionStatus::Draft, None))
        .await;

    let err = app
        .services
        .post_version_commands
        .update_draft(
            &author(),
            1,
            PostVersionChangesCommand::default()
                .with_title("With new cover")
                .with_cover(cover_upload()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)), "{err:?}");

    let version = app.store.version(1).await.unwrap();
    assert_eq!(version.title.as_str(), "Seeded title");
    assert_eq!(version.cover.as_str(), "images/seeded.png");

    let err = app
        .services
        .post_version_commands
        .create_draft(&author(), new_command("No cover store"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)), "{err:?}");
    assert_eq!(app.store.snapshot().await.versions.len(), 1);
}
