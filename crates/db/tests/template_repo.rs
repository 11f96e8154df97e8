//! Integration tests for the PostgreSQL template store.
//!
//! Requires a live database (`DATABASE_URL`); run with
//! `cargo test -p dockyard-db --features postgres-tests`.

use assert_matches::assert_matches;
use dockyard_core::template::{TemplateKind, TemplateType};
use dockyard_core::update::decode_update;
use dockyard_db::repositories::TemplateRepo;
use dockyard_db::{PgTemplateStore, StoreError, TemplateStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_container(pool: &PgPool) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO templates
            (template_type, title, categories, image, ports, privileged, hostname)
         VALUES ('container', 'Nginx', '[\"webserver\"]', 'nginx', '[\"80/tcp\"]', false, 'a')
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

async fn insert_stack(pool: &PgPool) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO templates (template_type, title, repository_url, repository_stackfile)
         VALUES ('stack', 'Wordpress', 'r1', 'f1')
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetch_maps_container_row(pool: PgPool) {
    let id = insert_container(&pool).await;
    let store = PgTemplateStore::new(pool);

    let template = store.fetch(id).await.unwrap();

    assert_eq!(template.id, id);
    assert_eq!(template.title, "Nginx");
    assert_eq!(template.categories, vec!["webserver"]);
    assert_matches!(
        &template.kind,
        TemplateKind::Container(spec) if spec.image == "nginx" && spec.ports == vec!["80/tcp"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetch_missing_template_is_not_found(pool: PgPool) {
    let store = PgTemplateStore::new(pool);
    assert_matches!(store.fetch(999_999).await, Err(StoreError::NotFound(999_999)));
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn merged_update_round_trips(pool: PgPool) {
    let id = insert_container(&pool).await;
    let store = PgTemplateStore::new(pool);

    let mut template = store.fetch(id).await.unwrap();
    decode_update(br#"{"hostname": "b", "privileged": true}"#)
        .unwrap()
        .apply(&mut template);
    store.store(&template).await.unwrap();

    let reloaded = store.fetch(id).await.unwrap();
    assert_eq!(reloaded, template);
    assert_matches!(
        &reloaded.kind,
        TemplateKind::Container(spec) if spec.hostname == "b" && spec.privileged && spec.image == "nginx"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn type_change_clears_old_subtype_columns(pool: PgPool) {
    let id = insert_container(&pool).await;
    let store = PgTemplateStore::new(pool.clone());

    let mut template = store.fetch(id).await.unwrap();
    decode_update(br#"{"type": "stack", "repository": {"url": "r2", "stackfile": "f2"}}"#)
        .unwrap()
        .apply(&mut template);
    store.store(&template).await.unwrap();

    let row = TemplateRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.template_type, "stack");
    assert!(row.image.is_none());
    assert!(row.hostname.is_none());
    assert_eq!(row.repository_url.as_deref(), Some("r2"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stack_repository_update_persists(pool: PgPool) {
    let id = insert_stack(&pool).await;
    let store = PgTemplateStore::new(pool);

    let mut template = store.fetch(id).await.unwrap();
    decode_update(br#"{"repository": {"url": "r2", "stackfile": "f2"}}"#)
        .unwrap()
        .apply(&mut template);
    store.store(&template).await.unwrap();

    let reloaded = store.fetch(id).await.unwrap();
    assert_eq!(reloaded.template_type(), TemplateType::Stack);
    assert_matches!(
        &reloaded.kind,
        TemplateKind::Stack(spec) if spec.repository.url == "r2" && spec.repository.stackfile == "f2"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_missing_template_is_not_found(pool: PgPool) {
    let id = insert_stack(&pool).await;
    let store = PgTemplateStore::new(pool.clone());
    let template = store.fetch(id).await.unwrap();

    sqlx::query("DELETE FROM templates WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    assert_matches!(store.store(&template).await, Err(StoreError::NotFound(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ping_succeeds_on_live_pool(pool: PgPool) {
    let store = PgTemplateStore::new(pool);
    assert!(store.ping().await.is_ok());
}
