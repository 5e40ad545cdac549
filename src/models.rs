use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    entities::{genre, movie},
    error::{AppError, AppResult},
    poster::PosterUpload,
};

/// Validated fields of a create or update request.
#[derive(Clone, Debug)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub storyline: Option<String>,
    pub genre_id: u8,
    pub poster: Option<PosterUpload>,
}

/// Raw multipart fields as received, before any parsing.
#[derive(Debug, Default)]
pub struct MovieForm {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rate: Option<String>,
    pub storyline: Option<String>,
    pub genre_id: Option<String>,
    pub poster: Option<PosterUpload>,
}

impl MovieForm {
    pub fn into_input(self) -> AppResult<MovieInput> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation("Title is required"))?;

        let year = parse_field(self.year, "year")?;
        let rate: f64 = parse_field(self.rate, "rate")?;
        if !rate.is_finite() {
            return Err(AppError::validation("rate is not a valid value"));
        }
        let genre_id = parse_field(self.genre_id, "genreId")?;

        let storyline = self.storyline.filter(|s| !s.trim().is_empty());

        Ok(MovieInput { title, year, rate, storyline, genre_id, poster: self.poster })
    }
}

fn parse_field<T: std::str::FromStr>(raw: Option<String>, name: &str) -> AppResult<T> {
    let raw = raw.ok_or_else(|| AppError::validation(format!("{name} is required")))?;
    raw.trim().parse().map_err(|_| AppError::validation(format!("{name} is not a valid value")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreQuery {
    pub genre_id: u8,
}

/// A stored movie as returned by create and update.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub storyline: Option<String>,
    pub genre_id: i32,
    #[serde(serialize_with = "poster_base64")]
    pub poster: Option<Vec<u8>>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            rate: m.rate,
            storyline: m.storyline,
            genre_id: m.genre_id,
            poster: m.poster,
        }
    }
}

/// A movie flattened with its genre's name for read endpoints.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub storyline: Option<String>,
    pub genre_id: i32,
    pub genre_name: Option<String>,
    #[serde(serialize_with = "poster_base64")]
    pub poster: Option<Vec<u8>>,
}

impl MovieDetails {
    pub fn project(movie: movie::Model, genre: Option<genre::Model>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            year: movie.year,
            rate: movie.rate,
            storyline: movie.storyline,
            genre_id: movie.genre_id,
            genre_name: genre.map(|g| g.name),
            poster: movie.poster,
        }
    }
}

fn poster_base64<S: Serializer>(poster: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
    match poster {
        Some(bytes) => s.serialize_str(&STANDARD.encode(bytes)),
        None => s.serialize_none(),
    }
}
