use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::error::ErrorCode;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct StubState {
    titles: Arc<Mutex<Vec<String>>>,
    comments: Arc<Mutex<Vec<(String, String)>>>,
}

async fn stub_create_post(
    State(state): State<StubState>,
    Json(req): Json<CreatePostRequest>,
) -> (StatusCode, Json<Post>) {
    let mut titles = state.titles.lock().await;
    titles.push(req.title.clone());
    let post = Post {
        id: PostId(format!("{:08x}", titles.len())),
        title: req.title,
    };
    (StatusCode::CREATED, Json(post))
}

async fn stub_list_posts(State(state): State<StubState>) -> Json<PostsListing> {
    let titles = state.titles.lock().await;
    let posts = titles
        .iter()
        .enumerate()
        .map(|(i, title)| Post {
            id: PostId(format!("{:08x}", i + 1)),
            title: title.clone(),
        })
        .collect();
    Json(PostsListing::new(posts))
}

async fn stub_create_comment(
    State(state): State<StubState>,
    Path(post_id): Path<String>,
    Json(req): Json<Comment>,
) -> StatusCode {
    state.comments.lock().await.push((post_id, req.content));
    StatusCode::CREATED
}

async fn stub_reject() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::validation("title required")),
    )
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_stub() -> (String, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/posts", get(stub_list_posts).post(stub_create_post))
        .route("/posts/:post_id/comments", post(stub_create_comment))
        .with_state(state.clone());
    (spawn(app).await, state)
}

async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn create_and_list_posts_round_trip_through_http() {
    let (url, _state) = spawn_stub().await;
    let client = BlogClient::new(&url, &url).expect("client");

    let created = client.create_post("Hello").await.expect("create");
    assert_eq!(created.title, "Hello");

    let listing = client.list_posts().await.expect("list");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.get(&created.id).expect("listed").title, "Hello");
}

#[tokio::test]
async fn post_form_clears_title_after_success() {
    let (url, state) = spawn_stub().await;
    let client = BlogClient::new(&url, &url).expect("client");

    let mut form = PostForm::new();
    form.set_title("First post");
    form.submit(&client).await.expect("submit");

    assert_eq!(form.title(), "");
    assert_eq!(*state.titles.lock().await, vec!["First post".to_string()]);
}

#[tokio::test]
async fn post_form_submits_empty_title() {
    let (url, state) = spawn_stub().await;
    let client = BlogClient::new(&url, &url).expect("client");

    let mut form = PostForm::new();
    form.submit(&client).await.expect("submit");

    assert_eq!(*state.titles.lock().await, vec![String::new()]);
}

#[tokio::test]
async fn post_form_keeps_title_when_request_fails() {
    let client = BlogClient::new(&unreachable_url().await, DEFAULT_COMMENTS_URL).expect("client");

    let mut form = PostForm::new();
    form.set_title("keep me");
    let err = form.submit(&client).await.expect_err("should fail");

    assert!(matches!(err, ClientError::Transport { .. }));
    assert_eq!(form.title(), "keep me");
}

#[tokio::test]
async fn server_error_body_is_surfaced() {
    let url = spawn(Router::new().route("/posts", post(stub_reject))).await;
    let client = BlogClient::new(&url, &url).expect("client");

    let mut form = PostForm::new();
    form.set_title("rejected");
    let err = form.submit(&client).await.expect_err("should fail");

    assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    let ClientError::Status { error, .. } = &err else {
        panic!("expected status error");
    };
    assert_eq!(error.as_ref().map(|e| e.code), Some(ErrorCode::Validation));
    assert!(err.to_string().contains("title required"));
    assert_eq!(form.title(), "rejected");
}

#[tokio::test]
async fn comment_form_posts_to_post_scoped_path_and_clears() {
    let (url, state) = spawn_stub().await;
    let client = BlogClient::new(DEFAULT_POSTS_URL, &url).expect("client");

    let mut form = CommentForm::new(PostId::from("1a2b3c4d"));
    form.set_content("Nice post");
    form.submit(&client).await.expect("submit");

    assert_eq!(form.content(), "");
    assert_eq!(
        *state.comments.lock().await,
        vec![("1a2b3c4d".to_string(), "Nice post".to_string())]
    );
}

#[tokio::test]
async fn comment_form_keeps_content_when_request_fails() {
    let client = BlogClient::new(DEFAULT_POSTS_URL, &unreachable_url().await).expect("client");

    let mut form = CommentForm::new(PostId::from("1a2b3c4d"));
    form.set_content("draft");
    assert!(form.submit(&client).await.is_err());
    assert_eq!(form.content(), "draft");
}

#[test]
fn endpoints_append_to_base_path() {
    let base = parse_base("http://localhost:4001/api/").expect("base");
    let url = endpoint(&base, &["posts", "ab/cd", "comments"]).expect("url");
    assert_eq!(url.as_str(), "http://localhost:4001/api/posts/ab%2Fcd/comments");

    let root = parse_base("http://localhost:4000").expect("base");
    assert_eq!(
        endpoint(&root, &["posts"]).expect("url").as_str(),
        "http://localhost:4000/posts"
    );
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(matches!(
        BlogClient::new("not a url", DEFAULT_COMMENTS_URL),
        Err(ClientError::InvalidUrl(_))
    ));
    assert!(matches!(
        BlogClient::new("mailto:someone@example.com", DEFAULT_COMMENTS_URL),
        Err(ClientError::InvalidUrl(_))
    ));
}
