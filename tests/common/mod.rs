//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use movies_api::{
    AppState,
    config::Config,
    db,
    entities::genre,
    poster::PosterPolicy,
    router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----movies-api-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Build the full router over a fresh sqlite file with genres 1 (Action) and 2 (Drama).
pub async fn spawn_app() -> TestApp {
    spawn_app_with_policy(PosterPolicy::default()).await
}

pub async fn spawn_app_with_policy(poster: PosterPolicy) -> TestApp {
    let dir = TempDir::new().unwrap();
    let database_url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());
    let db = db::connect_and_migrate(&database_url).await.unwrap();

    for (id, name) in [(1, "Action"), (2, "Drama")] {
        genre::ActiveModel { id: Set(id), name: Set(name.to_string()) }
            .insert(&db)
            .await
            .unwrap();
    }

    let config = Arc::new(Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url,
        poster,
    });
    let state = Arc::new(AppState::new(config, db.clone()));

    TestApp { router: router(state), db, _dir: dir }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: MultipartForm) -> Response<Body> {
        self.send(form.into_request("POST", uri)).await
    }

    pub async fn put_form(&self, uri: &str, form: MultipartForm) -> Response<Body> {
        self.send(form.into_request("PUT", uri)).await
    }

    /// Create a movie with a small .jpg poster and return the response JSON.
    pub async fn create_movie(&self, title: &str, rate: f64, genre_id: u8) -> serde_json::Value {
        let form = movie_form(title, 2000, rate, genre_id).file("poster", "poster.jpg", &[1, 2, 3]);
        let response = self.post_form("/movies", form).await;
        assert_eq!(response.status(), 200);
        body_json(response).await
    }
}

#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn into_request(mut self, method: &str, uri: &str) -> Request<Body> {
        self.body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// The text fields of a movie form, without a poster.
pub fn movie_form(title: &str, year: i32, rate: f64, genre_id: u8) -> MultipartForm {
    MultipartForm::default()
        .text("title", title)
        .text("year", &year.to_string())
        .text("rate", &rate.to_string())
        .text("storyline", "A storyline.")
        .text("genreId", &genre_id.to_string())
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
