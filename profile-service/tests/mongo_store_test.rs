//! Round trips against a live MongoDB. Run with a local server:
//! `MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored`

use mongodb::bson::doc;
use profile_service::services::{DocumentStore, MongoStore};
use secrecy::Secret;
use uuid::Uuid;

async fn connect() -> (MongoStore, String) {
    let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let db_name = format!("profile_test_{}", Uuid::new_v4().simple());
    let store = MongoStore::connect(&Secret::new(uri), &db_name)
        .await
        .expect("Failed to connect to MongoDB");
    store
        .initialize_indexes()
        .await
        .expect("Failed to create indexes");
    (store, db_name)
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn users_and_goals_round_trip() {
    let (store, _db_name) = connect().await;

    store.health_check().await.expect("ping failed");

    store
        .set_user("user-1", doc! { "name": "Asha", "age": 31_i64 })
        .await
        .unwrap();
    store
        .set_user("user-1", doc! { "name": "Asha K" })
        .await
        .unwrap();
    let user = store.get_user("user-1").await.unwrap().unwrap();
    assert_eq!(user.id, "user-1");
    assert_eq!(user.fields, doc! { "name": "Asha K" });

    store
        .set_goal("user-1", "vacation", doc! { "goal_line": "travel" })
        .await
        .unwrap();
    store
        .set_goal("user-1", "house", doc! { "goal_line": "property" })
        .await
        .unwrap();
    let ids: Vec<String> = store
        .list_goals("user-1")
        .await
        .unwrap()
        .into_iter()
        .map(|goal| goal.id)
        .collect();
    assert_eq!(ids, vec!["house", "vacation"]);

    assert!(store.get_goal("user-2", "house").await.unwrap().is_none());

    store.database().drop(None).await.unwrap();
}
