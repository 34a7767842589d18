#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use geopost_service::domain::post::errors::PostError;
use geopost_service::domain::post::models::GeoPoint;
use geopost_service::domain::post::models::NearbyPost;
use geopost_service::domain::post::models::Post;
use geopost_service::domain::post::models::PostCounts;
use geopost_service::domain::post::models::PostId;
use geopost_service::domain::post::ports::PostRepository;
use geopost_service::domain::post::service::PostService;
use geopost_service::domain::user::errors::UserError;
use geopost_service::domain::user::models::EmailAddress;
use geopost_service::domain::user::models::User;
use geopost_service::domain::user::models::UserId;
use geopost_service::domain::user::ports::UserRepository;
use geopost_service::domain::user::service::UserService;
use geopost_service::inbound::http::router::create_router;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = PasswordHasher::with_params(8, 1, 1).expect("Invalid hasher params");
        let authenticator =
            Arc::new(Authenticator::new(TEST_JWT_SECRET).with_password_hasher(hasher));

        let users = Arc::new(InMemoryUserRepository::default());
        let posts = Arc::new(InMemoryPostRepository::default());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
            Some(24),
        ));
        let post_service = Arc::new(PostService::new(posts));

        let router = create_router(user_service, post_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register then log in, returning the access token.
    pub async fn signed_in(&self, email: &str) -> String {
        self.register(email, "password123").await;
        self.login(email, "password123").await
    }

    /// Create a post and return its id.
    pub async fn create_post(
        &self,
        token: &str,
        title: &str,
        longitude: f64,
        latitude: f64,
    ) -> String {
        let response = self
            .post_authenticated("/posts", token)
            .json(&json!({
                "title": title,
                "body": format!("{} body", title),
                "location": { "longitude": longitude, "latitude": latitude }
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().expect("Missing id").to_string()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn remove(&self, id: &UserId) {
        self.users.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<HashMap<PostId, Post>>,
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Post>, PostError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| &p.created_by == owner)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_owned(&self, id: &PostId, owner: &UserId) -> Result<Option<Post>, PostError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .get(id)
            .filter(|p| &p.created_by == owner)
            .cloned())
    }

    async fn find_near(
        &self,
        center: &GeoPoint,
        max_distance_meters: f64,
    ) -> Result<Vec<NearbyPost>, PostError> {
        let mut nearby: Vec<NearbyPost> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .map(|p| NearbyPost {
                post: p.clone(),
                distance_meters: center.distance_to(&p.location),
            })
            .filter(|n| n.distance_meters <= max_distance_meters)
            .collect();
        nearby.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        Ok(nearby)
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<PostCounts, PostError> {
        let posts = self.posts.lock().unwrap();
        let owned = posts.values().filter(|p| &p.created_by == owner);
        let (active, inactive) = owned.fold((0, 0), |(a, i), p| {
            if p.active {
                (a + 1, i)
            } else {
                (a, i + 1)
            }
        });
        Ok(PostCounts { active, inactive })
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        match posts.get(&post.id) {
            Some(existing) if existing.created_by == post.created_by => {
                posts.insert(post.id, post.clone());
                Ok(post)
            }
            _ => Err(PostError::NotFound(post.id.to_string())),
        }
    }

    async fn delete(&self, id: &PostId, owner: &UserId) -> Result<(), PostError> {
        let mut posts = self.posts.lock().unwrap();
        match posts.get(id) {
            Some(existing) if &existing.created_by == owner => {
                posts.remove(id);
                Ok(())
            }
            _ => Err(PostError::NotFound(id.to_string())),
        }
    }
}

/// A throwaway Postgres database with migrations applied.
///
/// Created only when `DATABASE_URL` points at a server the tests may create
/// databases on; store tests skip otherwise.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name, or `None` when no
    /// server is configured.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres store test");
            return None;
        };

        let db_name = format!(
            "test_geopost_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }

    /// Close the pool and drop the database.
    pub async fn teardown(self) {
        self.pool.close().await;

        if let Ok(mut conn) = PgConnection::connect(&self.server_url).await {
            let _ = conn
                .execute(
                    format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE);"#, self.db_name)
                        .as_str(),
                )
                .await;
        }
    }
}
