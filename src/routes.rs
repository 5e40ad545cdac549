use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartRejection},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{GenreQuery, Movie, MovieDetails, MovieForm},
    poster::PosterUpload,
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Movie>> {
    let input = read_movie_form(multipart).await?.into_input()?;
    let movie = state.movies.create(input).await?;
    Ok(Json(movie.into()))
}

pub async fn list_all(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieDetails>>> {
    Ok(Json(state.movies.list_all().await?))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieDetails>> {
    Ok(Json(state.movies.get_by_id(id).await?))
}

pub async fn list_by_genre(
    State(state): State<Arc<AppState>>,
    Query(q): Query<GenreQuery>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    Ok(Json(state.movies.list_by_genre(q.genre_id).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Movie>> {
    let input = read_movie_form(multipart).await?.into_input()?;
    let movie = state.movies.update(id, input).await?;
    Ok(Json(movie.into()))
}

pub async fn delete(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> AppResult<()> {
    state.movies.delete(id).await
}

async fn read_movie_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<MovieForm> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut form = MovieForm::default();

    while let Some(field) =
        multipart.next_field().await.map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_ascii_lowercase();

        if name == "poster" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read poster: {e}")))?;

            // Browsers send an empty, unnamed part when no file was picked.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            form.poster = Some(PosterUpload { file_name, bytes: bytes.to_vec() });
            continue;
        }

        let slot = match name.as_str() {
            "title" => &mut form.title,
            "year" => &mut form.year,
            "rate" => &mut form.rate,
            "storyline" => &mut form.storyline,
            "genreid" => &mut form.genre_id,
            _ => continue,
        };
        let value = field.text().await.map_err(|e| AppError::BadRequest(e.to_string()))?;
        *slot = Some(value);
    }

    Ok(form)
}
