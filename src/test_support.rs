//! In-process fake of the post API for client tests
//!
//! Serves the same routes as the real backend on `127.0.0.1:0`. The signed-in
//! user is tracked server-wide rather than per cookie so tests can set it up
//! directly. Every request is recorded as `"METHOD /path"` for assertions.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::api::{ApiClient, ResourceClient};
use crate::config::Config;
use crate::models::{Age, Post, PostInput, RegisterInput, UserProfile};
use crate::services::{AutoConfirm, RecordingNotifier, SessionStore};
use crate::shell::AppContext;

#[derive(Clone)]
struct FakeUser {
    profile: UserProfile,
    password: String,
}

#[derive(Default)]
struct BackendState {
    posts: BTreeMap<i64, Post>,
    users: Vec<FakeUser>,
    current: Option<i64>,
    failures: HashMap<String, StatusCode>,
    rejections: Option<Vec<String>>,
    write_delay: Duration,
    requests: Vec<String>,
    next_post_id: i64,
    next_user_id: i64,
    dog_counter: u64,
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// A running fake backend; the server stops with the test runtime
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            next_post_id: 1000,
            next_user_id: 1000,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/users/me", get(current_user))
            .route("/api/users/register", post(register))
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/api/posts/all", get(list_posts))
            .route("/api/posts", post(create_post))
            .route(
                "/api/posts/{id}",
                get(get_post).put(update_post).delete(delete_post),
            )
            .route("/api/ages/all", get(list_ages))
            .route("/dog/random", get(dog_image))
            .layer(middleware::from_fn_with_state(state.clone(), record_and_fail))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Client config pointing at this server
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.base_url = format!("http://{}", self.addr);
        config.api.dog_image_url = format!("http://{}/dog/random", self.addr);
        config.api.timeout_seconds = 5;
        config
    }

    pub fn resources(&self) -> (ResourceClient, Arc<RecordingNotifier>) {
        resources_for(&self.config())
    }

    pub fn session_store(&self) -> (SessionStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let api = Arc::new(ApiClient::new(&self.config().api).unwrap());
        (SessionStore::new(api, notifier.clone()), notifier)
    }

    /// Full context with an initialized session and a fixed confirm answer
    pub async fn context(&self, confirm: bool) -> (AppContext, Arc<RecordingNotifier>) {
        let (ctx, notifier) = self.fresh_context(confirm);
        ctx.session.initialize().await;
        (ctx, notifier)
    }

    /// Full context whose session is still `Loading`
    pub fn fresh_context(&self, confirm: bool) -> (AppContext, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = AppContext::new(self.config(), notifier.clone(), Arc::new(AutoConfirm(confirm))).unwrap();
        (ctx, notifier)
    }

    pub fn insert_post(&self, post: Post) {
        lock(&self.state).posts.insert(post.id, post);
    }

    pub fn post(&self, id: i64) -> Option<Post> {
        lock(&self.state).posts.get(&id).cloned()
    }

    pub fn post_count(&self) -> usize {
        lock(&self.state).posts.len()
    }

    /// Sign in as `user{id}`, creating the account when needed
    pub fn login_as(&self, id: i64) {
        let mut state = lock(&self.state);
        if !state.users.iter().any(|u| u.profile.id == id) {
            state.users.push(FakeUser {
                profile: UserProfile {
                    id,
                    user_name: format!("user{}", id),
                    email: format!("user{}@example.com", id),
                },
                password: "password123".to_string(),
            });
        }
        state.current = Some(id);
    }

    pub fn add_user(&self, id: i64, user_name: &str, email: &str, password: &str) {
        lock(&self.state).users.push(FakeUser {
            profile: UserProfile {
                id,
                user_name: user_name.to_string(),
                email: email.to_string(),
            },
            password: password.to_string(),
        });
    }

    /// Answer every request whose `"METHOD /path"` starts with `prefix`
    /// with `status`
    pub fn fail_route(&self, prefix: &str, status: StatusCode) {
        lock(&self.state).failures.insert(prefix.to_string(), status);
    }

    /// Answer register, create and update with a 400 carrying these messages
    pub fn reject_with(&self, messages: Vec<&str>) {
        lock(&self.state).rejections = Some(messages.into_iter().map(String::from).collect());
    }

    /// Hold create and update responses for `delay`
    pub fn set_write_delay(&self, delay: Duration) {
        lock(&self.state).write_delay = delay;
    }

    /// Number of recorded requests whose `"METHOD /path"` starts with `prefix`
    pub fn request_count(&self, prefix: &str) -> usize {
        lock(&self.state)
            .requests
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }
}

/// Resource client for a config, with a recording notifier
pub fn resources_for(config: &Config) -> (ResourceClient, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let api = Arc::new(ApiClient::new(&config.api).unwrap());
    (ResourceClient::new(api, notifier.clone()), notifier)
}

/// Config aimed at a local port nothing listens on
pub fn unreachable_config() -> Config {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .unwrap();
    let mut config = Config::default();
    config.api.base_url = format!("http://{}", addr);
    config.api.dog_image_url = format!("http://{}/dog/random", addr);
    config.api.timeout_seconds = 2;
    config
}

/// A post with predictable fields owned by `user_id`
pub fn sample_post(id: i64, user_id: i64) -> Post {
    Post {
        id,
        title: format!("Dog {}", id),
        content: "Loves walks".to_string(),
        age_id: 1,
        age_value: Some("Puppy".to_string()),
        image_url: format!("https://images.dog.ceo/breeds/akita/{}.jpg", id),
        user_id,
        created_at: None,
        updated_at: None,
    }
}

async fn record_and_fail(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    let forced = {
        let mut state = lock(&state);
        state.requests.push(key.clone());
        state
            .failures
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix.as_str()))
            .map(|(_, status)| *status)
    };

    match forced {
        Some(status) => (status, "forced failure").into_response(),
        None => next.run(request).await,
    }
}

fn rejection(messages: &[String]) -> Response {
    let body: Vec<_> = messages.iter().map(|m| json!({ "message": m })).collect();
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

async fn current_user(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    let user = state
        .current
        .and_then(|id| state.users.iter().find(|u| u.profile.id == id));
    match user {
        Some(user) => Json(user.profile.clone()).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Form(form): Form<LoginForm>) -> StatusCode {
    let mut state = lock(&state);
    let found = state
        .users
        .iter()
        .find(|u| u.profile.email == form.username && u.password == form.password)
        .map(|u| u.profile.id);
    match found {
        Some(id) => {
            state.current = Some(id);
            StatusCode::OK
        }
        None => StatusCode::UNAUTHORIZED,
    }
}

async fn logout(State(state): State<Shared>) -> StatusCode {
    lock(&state).current = None;
    StatusCode::OK
}

async fn register(State(state): State<Shared>, Json(input): Json<RegisterInput>) -> Response {
    let mut state = lock(&state);
    if let Some(messages) = &state.rejections {
        return rejection(messages);
    }
    state.next_user_id += 1;
    let id = state.next_user_id;
    state.users.push(FakeUser {
        profile: UserProfile {
            id,
            user_name: input.user_name,
            email: input.email,
        },
        password: input.password,
    });
    StatusCode::CREATED.into_response()
}

async fn list_posts(State(state): State<Shared>) -> Json<Vec<Post>> {
    Json(lock(&state).posts.values().cloned().collect())
}

async fn get_post(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match lock(&state).posts.get(&id) {
        Some(post) => Json(post.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn write_delay(state: &Shared) {
    let delay = lock(state).write_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

async fn create_post(State(state): State<Shared>, Json(input): Json<PostInput>) -> Response {
    write_delay(&state).await;
    let mut state = lock(&state);
    let Some(user_id) = state.current else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    if let Some(messages) = &state.rejections {
        return rejection(messages);
    }
    state.next_post_id += 1;
    let post = Post {
        id: state.next_post_id,
        title: input.title,
        content: input.content,
        age_id: input.age_id.unwrap_or_default(),
        age_value: None,
        image_url: input.image_url,
        user_id,
        created_at: None,
        updated_at: None,
    };
    state.posts.insert(post.id, post.clone());
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn update_post(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(input): Json<PostInput>,
) -> Response {
    write_delay(&state).await;
    let mut state = lock(&state);
    let current = state.current;
    let rejections = state.rejections.clone();
    let Some(post) = state.posts.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if current != Some(post.user_id) {
        return StatusCode::FORBIDDEN.into_response();
    }
    if let Some(messages) = rejections {
        return rejection(&messages);
    }
    post.title = input.title;
    post.content = input.content;
    post.age_id = input.age_id.unwrap_or(post.age_id);
    post.image_url = input.image_url;
    Json(post.clone()).into_response()
}

async fn delete_post(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = lock(&state);
    let Some(owner) = state.posts.get(&id).map(|p| p.user_id) else {
        return StatusCode::NOT_FOUND;
    };
    if state.current != Some(owner) {
        return StatusCode::FORBIDDEN;
    }
    state.posts.remove(&id);
    StatusCode::NO_CONTENT
}

async fn list_ages() -> Json<Vec<Age>> {
    Json(
        [(1, "Puppy"), (2, "Adult"), (3, "Senior")]
            .into_iter()
            .map(|(id, value)| Age {
                id,
                value: value.to_string(),
            })
            .collect(),
    )
}

async fn dog_image(State(state): State<Shared>) -> Json<serde_json::Value> {
    let n = {
        let mut state = lock(&state);
        state.dog_counter += 1;
        state.dog_counter
    };
    Json(json!({
        "message": format!("https://images.dog.ceo/breeds/shiba/shiba-{}.jpg", n),
        "status": "success",
    }))
}
