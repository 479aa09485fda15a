use log::{debug, error, info};

use crate::{
    core::{
        api::{models::Registration, ApiClient},
        common::completion::with_completion,
    },
    view::{Notice, View},
};

use super::FeatureError;

const TITLE: &str = "Register";

/// Creates an account, only emptiness is checked here, the server owns every other rule.
pub async fn register(
    api: &ApiClient,
    view: &dyn View,
    username: &str,
    password: &str,
    email: Option<&str>,
) -> Result<(), FeatureError> {
    if username.trim().is_empty() || password.is_empty() {
        error!("username | password empty");
        let err = FeatureError::Validation("username and password are required".to_string());
        view.notify(&Notice::error(TITLE, err.user_message()));
        return Err(err);
    }

    let registration = Registration {
        username: username.to_string(),
        password: password.to_string(),
        email: email.filter(|e| !e.trim().is_empty()).map(str::to_string),
    };

    let res = with_completion(api.register(&registration), || {
        debug!("register request complete");
    })
    .await;

    let envelope = match res {
        Ok(r) => r,
        Err(e) => {
            error!("register error: {e}");
            view.notify(&Notice::error(TITLE, e.to_string()));
            return Err(e.into());
        }
    };

    if let Err(e) = envelope.into_result() {
        view.notify(&Notice::error(TITLE, e.reason.as_str()));
        return Err(FeatureError::Rejected(e.reason));
    }

    info!("user {username} registered");
    view.notify(&Notice::success(
        TITLE,
        format!("user [{username}] created, you can login now"),
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::register;
    use crate::{
        core::api::ApiClient,
        features::FeatureError,
        view::{testing::RecordingView, NoticeLevel},
    };

    #[tokio::test]
    async fn empty_fields_never_reach_server() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let api = ApiClient::new(mock_server.uri());
        let view = RecordingView::default();

        let res = register(&api, &view, "", "secret", None).await;
        let res2 = register(&api, &view, "john", "", None).await;

        assert!(matches!(res, Err(FeatureError::Validation(_))));
        assert!(matches!(res2, Err(FeatureError::Validation(_))));
        assert_eq!(2, view.notices_of(NoticeLevel::Error).len());
    }

    #[tokio::test]
    async fn successful_registration_is_confirmed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_string_contains("username=john"))
            .and(body_string_contains("email=john%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200, "isError": false, "message": "success"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ApiClient::new(mock_server.uri());
        let view = RecordingView::default();

        register(&api, &view, "john", "boston", Some("john@example.com"))
            .await
            .unwrap();

        assert_eq!(1, view.notices_of(NoticeLevel::Success).len());
    }

    #[tokio::test]
    async fn server_message_is_surfaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "status": 409, "isError": true, "message": "error, user exists"
            })))
            .mount(&mock_server)
            .await;

        let api = ApiClient::new(mock_server.uri());
        let view = RecordingView::default();

        let res = register(&api, &view, "john", "boston", None).await;

        assert!(matches!(res, Err(FeatureError::Rejected(ref m)) if m == "error, user exists"));
        assert_eq!(
            "error, user exists",
            view.notices_of(NoticeLevel::Error)[0].message
        );
    }
}
