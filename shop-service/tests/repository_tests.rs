mod common;

use std::collections::HashSet;
use std::str::FromStr;

use common::TestDb;
use rust_decimal::Decimal;
use shop_service::domain::page::Page;
use shop_service::domain::post::errors::PostError;
use shop_service::domain::post::models::NewPost;
use shop_service::domain::post::models::PostContent;
use shop_service::domain::post::models::PostId;
use shop_service::domain::post::models::PostUpdate;
use shop_service::domain::post::ports::PostRepository;
use shop_service::domain::product::errors::ProductError;
use shop_service::domain::product::models::ImageUrl;
use shop_service::domain::product::models::NewProduct;
use shop_service::domain::product::models::Price;
use shop_service::domain::product::models::ProductDetails;
use shop_service::domain::product::models::ProductId;
use shop_service::domain::product::models::ProductTitle;
use shop_service::domain::product::models::ProductUpdate;
use shop_service::domain::product::ports::ProductRepository;
use shop_service::domain::user::errors::UserError;
use shop_service::domain::user::models::EmailAddress;
use shop_service::domain::user::models::User;
use shop_service::domain::user::models::UserId;
use shop_service::domain::user::ports::UserRepository;
use shop_service::outbound::repositories::PostgresStore;

fn user(email: &str) -> User {
    User {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=1,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

fn content(text: &str) -> PostContent {
    PostContent::new(text.to_string()).unwrap()
}

async fn seeded_user(store: &PostgresStore, email: &str) -> User {
    let user = user(email);
    store.users.insert(&user).await.expect("insert user");
    user
}

async fn seeded_post(store: &PostgresStore, owner: UserId, text: &str) -> PostId {
    store
        .posts
        .insert(NewPost {
            id: PostId::new(),
            content: content(text),
            owner,
        })
        .await
        .expect("insert post")
        .id
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_find_user_by_email_hit_and_miss() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let u1 = seeded_user(&store, "a@x.com").await;

    let found = store
        .users
        .find_by_email(&EmailAddress::new("a@x.com".to_string()).unwrap())
        .await
        .unwrap()
        .expect("user present");
    assert_eq!(found.id, u1.id);
    assert_eq!(found.password_hash, u1.password_hash);

    let missing = store
        .users
        .find_by_email(&EmailAddress::new("b@x.com".to_string()).unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());

    // Emails compare exactly as stored.
    let other_case = store
        .users
        .find_by_email(&EmailAddress::new("A@x.com".to_string()).unwrap())
        .await
        .unwrap();
    assert!(other_case.is_none());

    assert!(store.users.find_by_id(&u1.id).await.unwrap().is_some());
    assert!(store.users.find_by_id(&UserId::new()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_duplicate_email_rejected_by_store() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    seeded_user(&store, "a@x.com").await;

    let result = store.users.insert(&user("a@x.com")).await;

    assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_concurrent_inserts_same_email_keep_one() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());

    let left = user("race@x.com");
    let right = user("race@x.com");

    let (first, second) = tokio::join!(store.users.insert(&left), store.users.insert(&right));

    assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("race@x.com")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_post_insert_returns_store_timestamp() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let owner = seeded_user(&store, "a@x.com").await;

    let created = store
        .posts
        .insert(NewPost {
            id: PostId::new(),
            content: content("hello"),
            owner: owner.id,
        })
        .await
        .unwrap();

    let fetched = store.posts.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_post_update_is_owner_scoped() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let u1 = seeded_user(&store, "u1@x.com").await;
    let u2 = seeded_user(&store, "u2@x.com").await;
    let p1 = seeded_post(&store, u1.id, "x").await;

    // Foreign owner: succeeds, changes nothing.
    store
        .posts
        .update(PostUpdate {
            id: p1,
            owner: u2.id,
            content: content("y"),
        })
        .await
        .unwrap();
    let unchanged = store.posts.find_by_id(&p1).await.unwrap().unwrap();
    assert_eq!(unchanged.content.as_str(), "x");

    store
        .posts
        .update(PostUpdate {
            id: p1,
            owner: u1.id,
            content: content("y"),
        })
        .await
        .unwrap();
    let changed = store.posts.find_by_id(&p1).await.unwrap().unwrap();
    assert_eq!(changed.content.as_str(), "y");
    assert_eq!(changed.created_at, unchanged.created_at);

    // Missing id: also a silent no-op.
    store
        .posts
        .update(PostUpdate {
            id: PostId::new(),
            owner: u1.id,
            content: content("z"),
        })
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_post_delete_is_owner_scoped() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let u1 = seeded_user(&store, "u1@x.com").await;
    let u2 = seeded_user(&store, "u2@x.com").await;
    let p1 = seeded_post(&store, u1.id, "x").await;

    store.posts.delete(&p1, &u2.id).await.unwrap();
    assert!(store.posts.find_by_id(&p1).await.unwrap().is_some());

    store.posts.delete(&p1, &u1.id).await.unwrap();
    assert!(store.posts.find_by_id(&p1).await.unwrap().is_none());

    // Deleting again is still fine.
    store.posts.delete(&p1, &u1.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_post_pagination_windows() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let owner = seeded_user(&store, "a@x.com").await;

    let mut inserted = HashSet::new();
    for i in 0..12 {
        inserted.insert(seeded_post(&store, owner.id, &format!("post {}", i)).await);
    }

    let page0 = store.posts.list(Page::new(0).unwrap()).await.unwrap();
    let page1 = store.posts.list(Page::new(1).unwrap()).await.unwrap();
    let page2 = store.posts.list(Page::new(2).unwrap()).await.unwrap();
    let beyond = store.posts.list(Page::new(3).unwrap()).await.unwrap();

    assert_eq!(page0.len(), 5);
    assert_eq!(page1.len(), 5);
    assert_eq!(page2.len(), 2);
    assert!(beyond.is_empty());

    let seen: HashSet<PostId> = page0
        .iter()
        .chain(&page1)
        .chain(&page2)
        .map(|post| post.id)
        .collect();
    assert_eq!(seen, inserted);
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_list_skips_rows_that_fail_to_decode() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let owner = seeded_user(&store, "a@x.com").await;
    seeded_post(&store, owner.id, "good").await;

    // Written behind the adapter's back; violates the content rules.
    let bad = PostId::new();
    sqlx::query("INSERT INTO posts (id, post_content, user_id) VALUES ($1, '', $2)")
        .bind(bad.0)
        .bind(owner.id.0)
        .execute(&db.pool)
        .await
        .unwrap();

    let listed = store.posts.list(Page::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content.as_str(), "good");

    // A single-row lookup reports it as a store fault.
    let result = store.posts.find_by_id(&bad).await;
    assert!(matches!(result, Err(PostError::DatabaseError(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_stored_user_with_bad_email_is_a_database_error() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let legacy = seeded_user(&store, "legacy@x.com").await;

    sqlx::query("UPDATE users SET email = 'legacy user@x.com' WHERE id = $1")
        .bind(legacy.id.0)
        .execute(&db.pool)
        .await
        .unwrap();

    let result = store.users.find_by_id(&legacy.id).await;
    assert!(matches!(result, Err(UserError::DatabaseError(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_stored_product_with_blank_title_is_a_database_error() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let owner = seeded_user(&store, "a@x.com").await;

    let bad = ProductId::new();
    sqlx::query(
        "INSERT INTO products (id, title, description, image_url, price, user_id) \
         VALUES ($1, '', '', '', 1, $2)",
    )
    .bind(bad.0)
    .bind(owner.id.0)
    .execute(&db.pool)
    .await
    .unwrap();

    let result = store.products.find_by_id(&bad).await;
    assert!(matches!(result, Err(ProductError::DatabaseError(_))));
    assert!(store.products.list(Page::default()).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_product_lifecycle_is_owner_scoped() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let u1 = seeded_user(&store, "u1@x.com").await;
    let u2 = seeded_user(&store, "u2@x.com").await;

    let details = |title: &str, price: &str| ProductDetails {
        title: ProductTitle::new(title.to_string()).unwrap(),
        description: "Oak".to_string(),
        image_url: ImageUrl::new("https://img.example.com/t.png".to_string()).unwrap(),
        price: Price::new(Decimal::from_str(price).unwrap()).unwrap(),
    };

    let created = store
        .products
        .insert(NewProduct {
            id: ProductId::new(),
            details: details("Table", "120.50"),
            owner: u1.id,
        })
        .await
        .unwrap();

    let fetched = store
        .products
        .find_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.details.price.amount(), Decimal::from_str("120.50").unwrap());
    assert_eq!(fetched.owner, u1.id);

    store
        .products
        .update(ProductUpdate {
            id: created.id,
            owner: u2.id,
            details: details("Stolen", "0"),
        })
        .await
        .unwrap();
    let unchanged = store
        .products
        .find_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.details.title.as_str(), "Table");

    store
        .products
        .update(ProductUpdate {
            id: created.id,
            owner: u1.id,
            details: details("Desk", "99.99"),
        })
        .await
        .unwrap();
    let changed = store
        .products
        .find_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(changed.details.title.as_str(), "Desk");

    store.products.delete(&created.id, &u2.id).await.unwrap();
    assert_eq!(store.products.list(Page::default()).await.unwrap().len(), 1);

    store.products.delete(&created.id, &u1.id).await.unwrap();
    assert!(store.products.list(Page::default()).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_closed_store_reports_database_errors() {
    let db = TestDb::new().await;
    let store = PostgresStore::from_pool(db.pool.clone());
    let users = std::sync::Arc::clone(&store.users);

    store.close().await;

    let result = users.find_by_id(&UserId::new()).await;
    assert!(matches!(result, Err(UserError::DatabaseError(_))));
}
