//! Users list page rendered by the full app against a mock user service.

mod common;

use common::{setup, user_json};
use gove_business::Notifications;
use gove_business::format::format_date;
use gove_ui::widgets::data_table::MENU_TRIGGER;
use kittest::Queryable;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_initial_load_shows_rows() {
    let mut ctx = setup(vec![user_json(1, "Ana"), user_json(2, "Bruno")]).await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Ana").is_some());
    assert!(harness.query_by_label("bruno@gove.br").is_some());
    let created = format_date("2024-03-05T14:07:00Z");
    assert_eq!(harness.query_all_by_label(&created).count(), 2);
    assert!(harness.query_by_label("Total: 2").is_some());
}

#[tokio::test]
async fn test_empty_list_shows_message() {
    let mut ctx = setup(vec![]).await;
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label("Nenhum registro encontrado")
            .is_some()
    );
}

#[tokio::test]
async fn test_header_click_refetches_sorted() {
    let mut ctx = setup(vec![user_json(1, "Ana")]).await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("order_by", "name"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![user_json(3, "Zeca")],
            1,
        )))
        .with_priority(1)
        .expect(1)
        .mount(ctx.mock_server())
        .await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Nome").click();
    ctx.settle().await;

    assert!(ctx.harness_mut().query_by_label("Zeca").is_some());
    assert!(ctx.harness_mut().query_by_label("Ana").is_none());
}

#[tokio::test]
async fn test_delete_from_row_menu() {
    let mut ctx = setup(vec![user_json(1, "Ana")]).await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(ctx.mock_server())
        .await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label(MENU_TRIGGER).click();
    ctx.settle().await;
    ctx.harness_mut().get_by_label("🗑 Excluir").click();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label("Você deseja excluir o usuário Ana?")
            .is_some()
    );

    ctx.harness_mut().get_by_label("Excluir").click();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Você deseja excluir o usuário Ana?").is_none());
    assert!(harness.query_by_label("O usuário foi removido da lista.").is_some());

    harness.get_by_label("OK").click();
    ctx.settle().await;
    assert!(
        ctx.harness_mut()
            .state()
            .state()
            .ctx
            .state::<Notifications>()
            .current()
            .is_none()
    );
}

#[tokio::test]
async fn test_cancel_delete_keeps_row() {
    let mut ctx = setup(vec![user_json(1, "Ana")]).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(ctx.mock_server())
        .await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label(MENU_TRIGGER).click();
    ctx.settle().await;
    ctx.harness_mut().get_by_label("🗑 Excluir").click();
    ctx.settle().await;
    ctx.harness_mut().get_by_label("Cancelar").click();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Você deseja excluir o usuário Ana?").is_none());
    assert!(harness.query_by_label("Ana").is_some());
}
