use std::sync::Arc;

use chrono::TimeDelta;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::{execute, page_of, run, spends, Context};
use crate::{
    core::{
        api::ApiClient,
        bootstrap::Page,
        cli::{Command, SpendsCommand},
        configuration::{ApiConfiguration, Configuration, CoreConfiguration, LogConfiguration},
        session::{
            session_storage::{memory::MemoryStorage, SessionKey},
            ValidationOutcome,
        },
    },
    view::{testing::RecordingView, NoticeLevel},
};

fn logged_storage() -> Box<MemoryStorage> {
    Box::new(MemoryStorage::with(&[
        (SessionKey::Username, "alice"),
        (SessionKey::SessionId, "tok123"),
    ]))
}

async fn mount_check(mock_server: &MockServer, message: &str) {
    Mock::given(method("POST"))
        .and(path("/users/login/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200, "isError": false, "message": message
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn invalidated_session_redraws_navigation_logged_out() {
    let mock_server = MockServer::start().await;
    mount_check(&mock_server, "false").await;

    let view = Arc::new(RecordingView::default());
    let ctx = Context::with_storage(
        Page::Spends,
        ApiClient::new(mock_server.uri()),
        logged_storage(),
        view.clone(),
        TimeDelta::seconds(60),
    );

    assert_eq!(ValidationOutcome::Invalidated, ctx.load().await);

    let navigations = view.navigations.lock().unwrap();
    assert_eq!(2, navigations.len());
    assert!(!navigations[0].show_login_form());
    assert_eq!(Page::Spends, navigations[1].page());
    assert!(navigations[1].show_login_form());
    assert!(!navigations[1].is_visible(Page::Spends));

    let notices = view.notices_of(NoticeLevel::Info);
    assert_eq!(1, notices.len());
    assert_eq!("Must login!!", notices[0].message);
}

#[tokio::test]
async fn delete_without_login_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let view = Arc::new(RecordingView::default());
    let ctx = Context::with_storage(
        Page::Spends,
        ApiClient::new(mock_server.uri()),
        Box::new(MemoryStorage::default()),
        view.clone(),
        TimeDelta::seconds(60),
    );

    let res = spends(
        &ctx,
        SpendsCommand::Delete {
            id: "10".to_string(),
        },
    )
    .await;

    assert!(res.is_err());
    assert_eq!(1, view.notices_of(NoticeLevel::Error).len());
}

#[tokio::test]
async fn status_reports_valid_session() {
    let mock_server = MockServer::start().await;
    mount_check(&mock_server, "true").await;

    let view = Arc::new(RecordingView::default());
    let ctx = Context::with_storage(
        Page::Home,
        ApiClient::new(mock_server.uri()),
        logged_storage(),
        view.clone(),
        TimeDelta::seconds(60),
    );

    execute(&ctx, Command::Status).await.unwrap();

    let notices = view.notices_of(NoticeLevel::Success);
    assert_eq!(1, notices.len());
    assert_eq!("alice is logged in", notices[0].message);
}

#[tokio::test]
async fn status_without_session_needs_no_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let conf = Configuration {
        api: ApiConfiguration {
            url: Some(mock_server.uri()),
            session_check_interval: None,
        },
        core: CoreConfiguration {
            data_directory: Some("./test_core_status_no_session".to_string()),
        },
        log: LogConfiguration {
            level: None,
            retention: None,
        },
    };
    let view = Arc::new(RecordingView::default());

    run(conf, Command::Status, view.clone()).await.unwrap();

    let notices = view.notices_of(NoticeLevel::Info);
    assert_eq!(1, notices.len());
    assert_eq!("not logged in", notices[0].message);
    assert_eq!(Page::Home, view.navigations.lock().unwrap()[0].page());
}

#[test]
fn commands_map_to_pages() {
    assert_eq!(
        Page::Register,
        page_of(&Command::Register {
            username: "john".to_string(),
            password: "boston".to_string(),
            email: None,
        })
    );
    assert_eq!(Page::Home, page_of(&Command::Status));
    assert_eq!(Page::Spends, page_of(&Command::Kinds));
    assert_eq!(
        Page::Spends,
        page_of(&Command::Spends {
            command: SpendsCommand::List
        })
    );
    assert_eq!(Page::Debug, page_of(&Command::Users));
}
