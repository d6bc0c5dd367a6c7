//! Database integration tests
//!
//! These tests exercise the TursoClient against in-memory and file-backed
//! SQLite.

use campaign_desk::db::{DatabaseClient, DatabaseProvider, TursoClient};
use campaign_desk::types::{
    Advert, AdvertChannel, AdvertStatus, AppError, Budget, Campaign, CampaignFilter,
    CampaignStatus, Client, Role, Tenant, User,
};
use campaign_desk::AppConfig;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tempfile::TempDir;

/// Test helper to create a TursoClient with in-memory database
async fn create_test_client() -> TursoClient {
    TursoClient::new_memory()
        .await
        .expect("Failed to create in-memory database")
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn tenant(id: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        name: format!("Tenant {}", id),
        created_at: at(1_700_000_000),
    }
}

fn user(id: &str, tenant_id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        email: email.to_string(),
        name: "Test User".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: Role::Admin,
        created_at: at(1_700_000_000),
        updated_at: at(1_700_000_000),
    }
}

fn client(id: &str, tenant_id: &str, created: i64) -> Client {
    Client {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        name: format!("Client {}", id),
        contact_name: None,
        contact_email: Some("ops@example.com".to_string()),
        phone: None,
        notes: None,
        created_at: at(created),
        updated_at: at(created),
    }
}

fn campaign(id: &str, tenant_id: &str, client_id: &str, status: CampaignStatus) -> Campaign {
    Campaign {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        client_id: client_id.to_string(),
        name: format!("Campaign {}", id),
        description: Some("Brief".to_string()),
        status,
        start_date: NaiveDate::from_ymd_opt(2026, 1, 15),
        end_date: None,
        created_at: at(1_700_000_100),
        updated_at: at(1_700_000_100),
    }
}

fn budget(id: &str, campaign_id: &str, amount_cents: i64, currency: &str) -> Budget {
    Budget {
        id: id.to_string(),
        tenant_id: "t1".to_string(),
        campaign_id: campaign_id.to_string(),
        category: "Media".to_string(),
        amount_cents,
        currency: currency.to_string(),
        notes: None,
        created_at: at(1_700_000_200),
        updated_at: at(1_700_000_200),
    }
}

async fn seeded() -> TursoClient {
    let db = create_test_client().await;
    db.create_tenant_with_admin(&tenant("t1"), &user("u1", "t1", "a@t1.test"))
        .await
        .unwrap();
    db.create_tenant_with_admin(&tenant("t2"), &user("u2", "t2", "b@t2.test"))
        .await
        .unwrap();
    db.insert_client(&client("c1", "t1", 1_700_000_000))
        .await
        .unwrap();
    db
}

#[tokio::test]
async fn test_create_memory_client() {
    let db = create_test_client().await;
    assert!(db.connection().await.is_ok());
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_file_database_persists_across_clients() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("campaign.db");
    let path = path.to_str().unwrap();

    {
        let db = TursoClient::new_local(path).await.unwrap();
        db.create_tenant_with_admin(&tenant("t1"), &user("u1", "t1", "a@t1.test"))
            .await
            .unwrap();
    }

    let reopened = TursoClient::new_local(path).await.unwrap();
    let found = reopened.get_user_by_email("a@t1.test").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some("u1".to_string()));
}

#[tokio::test]
async fn test_provider_from_config() {
    let mut config = AppConfig::default();
    config.database.url = ":memory:".to_string();
    assert!(matches!(
        DatabaseProvider::from_config(&config),
        DatabaseProvider::Memory
    ));

    config.database.url = "./data/x.db".to_string();
    assert!(matches!(
        DatabaseProvider::from_config(&config),
        DatabaseProvider::SQLite { .. }
    ));

    let db = DatabaseProvider::Memory.create_client().await.unwrap();
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_user_round_trip_and_duplicate_email() {
    let db = seeded().await;

    let stored = db.get_user_by_id("u1").await.unwrap().unwrap();
    assert_eq!(stored.email, "a@t1.test");
    assert_eq!(stored.role, Role::Admin);
    assert_eq!(stored.created_at, at(1_700_000_000));

    let err = db
        .create_user(&user("u3", "t1", "a@t1.test"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(db.list_users("t1").await.unwrap().len(), 1);
    assert!(db.get_user_by_email("missing@t1.test").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_registration_leaves_no_tenant() {
    let db = seeded().await;

    let err = db
        .create_tenant_with_admin(&tenant("t3"), &user("u3", "t3", "a@t1.test"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(db.get_tenant("t3").await.unwrap().is_none());
}

#[tokio::test]
async fn test_reads_are_tenant_scoped() {
    let db = seeded().await;

    assert!(db.get_client("t1", "c1").await.unwrap().is_some());
    assert!(db.get_client("t2", "c1").await.unwrap().is_none());
    assert!(!db.delete_client("t2", "c1").await.unwrap());
    assert!(db.list_clients("t2").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lists_keep_insertion_order() {
    let db = seeded().await;
    db.insert_client(&client("c2", "t1", 1_700_000_000))
        .await
        .unwrap();
    db.insert_client(&client("c0", "t1", 1_700_000_000))
        .await
        .unwrap();

    let ids: Vec<String> = db
        .list_clients("t1")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec!["c1", "c2", "c0"]);
}

#[tokio::test]
async fn test_campaign_round_trip_and_filters() {
    let db = seeded().await;
    let draft = campaign("k1", "t1", "c1", CampaignStatus::Draft);
    db.insert_campaign(&draft).await.unwrap();
    db.insert_campaign(&campaign("k2", "t1", "c1", CampaignStatus::Active))
        .await
        .unwrap();

    assert_eq!(db.get_campaign("t1", "k1").await.unwrap(), Some(draft.clone()));

    let drafts = db
        .list_campaigns(
            "t1",
            &CampaignFilter {
                status: Some(CampaignStatus::Draft),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(drafts, vec![draft]);

    assert_eq!(db.count_campaigns_for_client("t1", "c1").await.unwrap(), 2);
    assert_eq!(db.count_campaigns_for_client("t2", "c1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_campaign_cascades() {
    let db = seeded().await;
    db.insert_campaign(&campaign("k1", "t1", "c1", CampaignStatus::Active))
        .await
        .unwrap();
    db.insert_advert(&Advert {
        id: "a1".to_string(),
        tenant_id: "t1".to_string(),
        campaign_id: "k1".to_string(),
        title: "Banner".to_string(),
        channel: AdvertChannel::Display,
        content: None,
        status: AdvertStatus::Live,
        created_at: at(1_700_000_200),
        updated_at: at(1_700_000_200),
    })
    .await
    .unwrap();
    db.insert_budget(&Budget {
        id: "b1".to_string(),
        tenant_id: "t1".to_string(),
        campaign_id: "k1".to_string(),
        category: "Media".to_string(),
        amount_cents: 50_000,
        currency: "USD".to_string(),
        notes: None,
        created_at: at(1_700_000_200),
        updated_at: at(1_700_000_200),
    })
    .await
    .unwrap();

    let stats = db.dashboard_stats("t1").await.unwrap();
    assert_eq!((stats.campaigns, stats.adverts, stats.budgets), (1, 1, 1));

    // Another tenant cannot delete it
    assert!(!db.delete_campaign("t2", "k1").await.unwrap());
    assert!(db.get_advert("t1", "a1").await.unwrap().is_some());

    assert!(db.delete_campaign("t1", "k1").await.unwrap());
    assert!(db.get_advert("t1", "a1").await.unwrap().is_none());
    assert!(db.get_budget("t1", "b1").await.unwrap().is_none());
    assert!(db.budget_totals("t1", "k1").await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registrations_on_memory_database() {
    let db = Arc::new(create_test_client().await);

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move {
                let tenant_id = format!("t{}", i);
                db.create_tenant_with_admin(
                    &tenant(&tenant_id),
                    &user(&format!("u{}", i), &tenant_id, &format!("user{}@load.test", i)),
                )
                .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for i in [0, 99, 199] {
        let found = db
            .get_user_by_email(&format!("user{}@load.test", i))
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.tenant_id), Some(format!("t{}", i)));
    }
}

#[tokio::test]
async fn test_client_with_campaigns_cannot_be_deleted() {
    let db = seeded().await;
    db.insert_campaign(&campaign("k1", "t1", "c1", CampaignStatus::Draft))
        .await
        .unwrap();

    let err = db.delete_client("t1", "c1").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(db.get_client("t1", "c1").await.unwrap().is_some());

    assert!(db.delete_campaign("t1", "k1").await.unwrap());
    assert!(db.delete_client("t1", "c1").await.unwrap());
}

#[tokio::test]
async fn test_client_guard_holds_on_file_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("campaign.db");
    let db = TursoClient::new_local(path.to_str().unwrap()).await.unwrap();
    db.create_tenant_with_admin(&tenant("t1"), &user("u1", "t1", "a@t1.test"))
        .await
        .unwrap();
    db.insert_client(&client("c1", "t1", 1_700_000_000))
        .await
        .unwrap();
    db.insert_campaign(&campaign("k1", "t1", "c1", CampaignStatus::Active))
        .await
        .unwrap();

    assert!(matches!(
        db.delete_client("t1", "c1").await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_budget_totals_overflow_is_rejected() {
    let db = seeded().await;
    db.insert_campaign(&campaign("k1", "t1", "c1", CampaignStatus::Active))
        .await
        .unwrap();
    db.insert_budget(&budget("b1", "k1", i64::MAX, "USD"))
        .await
        .unwrap();
    db.insert_budget(&budget("b2", "k1", 25, "EUR")).await.unwrap();

    assert!(matches!(
        db.budget_totals("t1", "k1").await,
        Ok(ref totals) if totals.len() == 2
    ));

    db.insert_budget(&budget("b3", "k1", i64::MAX, "USD"))
        .await
        .unwrap();
    assert!(matches!(
        db.budget_totals("t1", "k1").await,
        Err(AppError::InvalidInput(_))
    ));
}
