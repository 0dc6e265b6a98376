//! SQL store tests against SeaORM's mock connection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use futures::TryStreamExt;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use serde_json::json;
use uuid::Uuid;

use common::AppError;
use customer_service_lib::repository::entities::CustomerModel;
use customer_service_lib::repository::{CustomerRepository, CustomerStore, FIND_ALL_PAGE_SIZE};
use domain::{Customer, CustomerId, CustomerType, Gender, PhoneType};

// =============================================================================
// Fixtures
// =============================================================================

fn company_row(id: Uuid) -> CustomerModel {
    CustomerModel {
        id,
        first_name: None,
        last_name: Some("Acme Corp.".to_string()),
        gender: None,
        birth_date: None,
        marital_status: None,
        address: Some(json!({ "country": "USA", "city": "Springfield", "street_number": 1 })),
        phones: Some(json!({ "HOME": "111111111", "FAX": "444444444" })),
        email: Some("contact@acme.example".to_string()),
        customer_type: "COMPANY".to_string(),
    }
}

fn person_row(id: Uuid) -> CustomerModel {
    CustomerModel {
        id,
        first_name: Some("Chun".to_string()),
        last_name: Some("Li".to_string()),
        gender: Some("FEMALE".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1990, 8, 16),
        marital_status: None,
        address: None,
        phones: None,
        email: None,
        customer_type: "PERSON".to_string(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

// =============================================================================
// Find
// =============================================================================

#[tokio::test]
async fn test_find_by_id_maps_row_to_customer() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![company_row(id)]])
        .into_connection();
    let store = CustomerStore::new(db);

    let customer = store.find_by_id(CustomerId::from(id)).await.unwrap().unwrap();

    assert_eq!(customer.id(), Some(CustomerId::from(id)));
    assert_eq!(customer.customer_type(), CustomerType::Company);
    assert_eq!(customer.last_name(), Some("Acme Corp."));
    assert!(customer.first_name().is_none());
    assert!(customer.gender().is_none());
    assert!(customer.birth_date().is_none());
    assert!(customer.marital_status().is_none());
    assert_eq!(customer.phones()[&PhoneType::Fax], "444444444");
    let address = customer.address().unwrap();
    assert_eq!(address.country(), "USA");
    assert_eq!(address.street_number(), Some(1));
    assert!(address.zipcode().is_none());
}

#[tokio::test]
async fn test_find_by_id_missing_row_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<CustomerModel>::new()])
        .into_connection();
    let store = CustomerStore::new(db);

    let found = store.find_by_id(CustomerId::generate()).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_by_id_rejects_unknown_customer_type() {
    let id = Uuid::new_v4();
    let mut row = person_row(id);
    row.customer_type = "ROBOT".to_string();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let store = CustomerStore::new(db);

    let result = store.find_by_id(CustomerId::from(id)).await;

    assert!(matches!(result.unwrap_err(), AppError::Database(DbErr::Custom(_))));
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let store = CustomerStore::new(db);

    let result = store.find_by_id(CustomerId::generate()).await;

    assert!(matches!(result.unwrap_err(), AppError::Database(_)));
}

#[tokio::test]
async fn test_exists_by_id_uses_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .append_query_results([[count_row(0)]])
        .into_connection();
    let store = CustomerStore::new(db);

    assert!(store.exists_by_id(CustomerId::generate()).await.unwrap());
    assert!(!store.exists_by_id(CustomerId::generate()).await.unwrap());
}

#[tokio::test]
async fn test_find_all_streams_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![company_row(Uuid::new_v4()), person_row(Uuid::new_v4())]])
        .into_connection();
    let store = CustomerStore::new(db);

    let customers: Vec<Customer> = store.find_all().try_collect().await.unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[1].gender(), Some(Gender::Female));
}

#[tokio::test]
async fn test_find_all_empty_table() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<CustomerModel>::new()])
        .into_connection();
    let store = CustomerStore::new(db);

    let customers: Vec<Customer> = store.find_all().try_collect().await.unwrap();

    assert!(customers.is_empty());
}

#[tokio::test]
async fn test_find_all_fetches_next_page_after_full_page() {
    let full_page: Vec<CustomerModel> = (0..FIND_ALL_PAGE_SIZE)
        .map(|_| person_row(Uuid::new_v4()))
        .collect();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([full_page])
        .append_query_results([vec![
            company_row(Uuid::new_v4()),
            company_row(Uuid::new_v4()),
            person_row(Uuid::new_v4()),
        ]])
        .into_connection();
    let store = CustomerStore::new(db);

    let customers: Vec<Customer> = store.find_all().try_collect().await.unwrap();

    assert_eq!(customers.len(), FIND_ALL_PAGE_SIZE as usize + 3);
    assert!(customers[FIND_ALL_PAGE_SIZE as usize].is_company());
}

#[tokio::test]
async fn test_find_all_stops_on_empty_page_after_full_page() {
    let full_page: Vec<CustomerModel> = (0..FIND_ALL_PAGE_SIZE)
        .map(|_| person_row(Uuid::new_v4()))
        .collect();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([full_page])
        .append_query_results([Vec::<CustomerModel>::new()])
        .into_connection();
    let store = CustomerStore::new(db.clone());

    let customers: Vec<Customer> = store.find_all().try_collect().await.unwrap();

    assert_eq!(customers.len(), FIND_ALL_PAGE_SIZE as usize);
    // One select per page, no third query
    assert_eq!(db.into_transaction_log().len(), 2);
}

// =============================================================================
// Save / Delete
// =============================================================================

#[tokio::test]
async fn test_save_new_customer_upserts_with_fresh_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let store = CustomerStore::new(db.clone());

    let customer = Customer::of_type(CustomerType::Person)
        .unwrap()
        .with_first_name("Chun")
        .build();
    let saved = store.save(customer).await.unwrap();

    assert!(saved.id().is_some());
    assert_eq!(saved.first_name(), Some("Chun"));

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("INSERT INTO"));
    assert!(log.contains("ON CONFLICT"));
}

#[tokio::test]
async fn test_save_keeps_existing_id() {
    let id = CustomerId::generate();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let store = CustomerStore::new(db);

    let customer = Customer::of_type(CustomerType::Company)
        .unwrap()
        .with_id(id)
        .build();
    let saved = store.save(customer).await.unwrap();

    assert_eq!(saved.id(), Some(id));
}

#[tokio::test]
async fn test_delete_by_id_without_match_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let store = CustomerStore::new(db);

    assert!(store.delete_by_id(CustomerId::generate()).await.is_ok());
}

#[tokio::test]
async fn test_delete_unsaved_customer_skips_database() {
    // No exec results queued: any statement would fail
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let store = CustomerStore::new(db);

    let unsaved = Customer::of_type(CustomerType::Person).unwrap().build();

    assert!(store.delete(&unsaved).await.is_ok());
}
