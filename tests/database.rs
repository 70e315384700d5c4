use sqlx::PgPool;

use vessel_tracker::{
    database::CustomFieldStore,
    errors::{TrackerError, Violation},
    models::{CustomDataEntry, CustomFieldUpdate, NewCustomField},
};

fn draft_field() -> NewCustomField {
    NewCustomField {
        header: "Draft".to_string(),
        header_type: "number".to_string(),
        custom_data: vec![CustomDataEntry::new("9074729", "11.2")],
    }
}

async fn count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM custom_fields")
        .fetch_one(pool)
        .await
        .expect("Failed to count custom fields")
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = false)]
async fn test_insert_custom_field(pool: PgPool) {
    let store = CustomFieldStore::new(pool.clone()).await.unwrap();

    let stored = store
        .insert(draft_field())
        .await
        .expect("Failed to insert custom field");

    assert_eq!(stored.created_at, stored.updated_at);
    assert_eq!(stored.custom_data, draft_field().custom_data);

    let fetched = store.get(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched, stored);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = false)]
async fn test_insert_rejects_missing_data(pool: PgPool) {
    let store = CustomFieldStore::new(pool.clone()).await.unwrap();
    let mut field = draft_field();
    field.custom_data.push(CustomDataEntry::new("9267560", ""));

    let err = store.insert(field).await.unwrap_err();

    match err {
        TrackerError::InvalidCustomField(e) => {
            assert_eq!(e.violations, vec![Violation::MissingData { index: 1 }])
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(count(&pool).await, 0);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = false)]
async fn test_update_changes_updated_at(pool: PgPool) {
    let store = CustomFieldStore::new(pool).await.unwrap();
    let stored = store.insert(draft_field()).await.unwrap();

    let unchanged = store
        .update(
            stored.id,
            CustomFieldUpdate {
                header: Some("Draft".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unchanged.updated_at, stored.updated_at);

    let updated = store
        .update(
            stored.id,
            CustomFieldUpdate {
                header_type: Some("text".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.header_type, "text");
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at > stored.updated_at);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = false)]
async fn test_add_entry_keeps_order(pool: PgPool) {
    let store = CustomFieldStore::new(pool).await.unwrap();
    let stored = store.insert(draft_field()).await.unwrap();

    let updated = store
        .add_entry(stored.id, CustomDataEntry::new("9267560", "7.9"))
        .await
        .unwrap();

    let imos: Vec<&str> = updated
        .custom_data
        .iter()
        .map(|e| e.imo_number.as_str())
        .collect();
    assert_eq!(imos, vec!["9074729", "9267560"]);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = false)]
async fn test_invalid_update_writes_nothing(pool: PgPool) {
    let store = CustomFieldStore::new(pool).await.unwrap();
    let stored = store.insert(draft_field()).await.unwrap();

    let result = store
        .update(
            stored.id,
            CustomFieldUpdate {
                header: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidCustomField(_))));

    let fetched = store.get(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched, stored);
}

#[ignore = "requires DATABASE_URL"]
#[sqlx::test(migrations = false)]
async fn test_update_unknown_id(pool: PgPool) {
    let store = CustomFieldStore::new(pool).await.unwrap();

    let result = store.add_entry(404, CustomDataEntry::new("9074729", "1")).await;

    assert!(matches!(result, Err(TrackerError::CustomFieldNotFound(404))));
}
