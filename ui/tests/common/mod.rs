use std::time::Duration;

use egui_kittest::Harness;
use gove_ui::AdminApp;
use gove_ui::state::State;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, AdminApp>,
}

impl<'a> TestCtx<'a> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, AdminApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps frames while giving spawned requests time to finish.
    pub async fn settle(&mut self) {
        for _ in 0..15 {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

pub fn user_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@gove.br", name.to_lowercase()),
        "phone": "(61) 98888-7777",
        "last_login": null,
        "user_type": "user",
        "sector": "SEPLAG",
        "created_at": "2024-03-05T14:07:00Z",
        "updated_at": "2024-03-05T14:07:00Z",
        "deleted_at": null,
        "permissions": []
    })
}

pub fn page_json(users: Vec<Value>, total: u64) -> Value {
    json!({
        "data": users,
        "total": total,
        "current_page": 1,
        "last_page": total.div_ceil(10).max(1),
    })
}

/// Starts a mock server answering the users list with `users` and the
/// permission tree, then the app on the users page.
pub async fn setup(users: Vec<Value>) -> TestCtx<'static> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock_server = MockServer::start().await;

    let total = users.len() as u64;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(users, total)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Usuários", "parent_id": null, "children": [
                {"id": 11, "name": "Listar", "parent_id": 1},
                {"id": 12, "name": "Editar usuários", "parent_id": 1}
            ]}
        ])))
        .mount(&mock_server)
        .await;

    let state = State::test(format!("{}/api", mock_server.uri()));
    let app = AdminApp::new(state);
    let harness = Harness::new_eframe(|_| app);

    TestCtx {
        mock_server,
        harness,
    }
}
