use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info};

use crate::{
    entities::{genre, movie},
    error::{AppError, AppResult},
    models::{MovieDetails, MovieInput},
    poster::PosterPolicy,
};

/// CRUD operations over movies, with genre and poster validation on writes.
#[derive(Clone)]
pub struct MovieService {
    db: DatabaseConnection,
    policy: PosterPolicy,
}

impl MovieService {
    pub fn new(db: DatabaseConnection, policy: PosterPolicy) -> Self {
        Self { db, policy }
    }

    pub async fn create(&self, input: MovieInput) -> AppResult<movie::Model> {
        let poster = input.poster.ok_or_else(|| AppError::validation("Poster is required"))?;
        self.policy.check(&poster)?;
        self.ensure_genre(input.genre_id).await?;

        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(input.title),
            year: Set(input.year),
            rate: Set(input.rate),
            storyline: Set(input.storyline),
            poster: Set(Some(poster.bytes)),
            genre_id: Set(i32::from(input.genre_id)),
        };

        let movie = model.insert(&self.db).await?;
        info!(movie_id = movie.id, genre_id = movie.genre_id, "movie created");
        Ok(movie)
    }

    pub async fn list_all(&self) -> AppResult<Vec<MovieDetails>> {
        let rows = movie::Entity::find()
            .find_also_related(genre::Entity)
            .order_by_desc(movie::Column::Rate)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        debug!(count = rows.len(), "listed movies");
        Ok(rows.into_iter().map(|(m, g)| MovieDetails::project(m, g)).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MovieDetails> {
        let (movie, genre) = movie::Entity::find_by_id(id)
            .find_also_related(genre::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("You entered wrong id: {id}")))?;

        Ok(MovieDetails::project(movie, genre))
    }

    pub async fn list_by_genre(&self, genre_id: u8) -> AppResult<Vec<MovieDetails>> {
        let rows = movie::Entity::find()
            .filter(movie::Column::GenreId.eq(i32::from(genre_id)))
            .find_also_related(genre::Entity)
            .order_by_desc(movie::Column::Rate)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        debug!(genre_id, count = rows.len(), "listed movies by genre");
        Ok(rows.into_iter().map(|(m, g)| MovieDetails::project(m, g)).collect())
    }

    pub async fn update(&self, id: i32, input: MovieInput) -> AppResult<movie::Model> {
        let existing = movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No movie was found with id: {id}")))?;

        self.ensure_genre(input.genre_id).await?;

        let mut model: movie::ActiveModel = existing.into();

        if let Some(poster) = input.poster {
            self.policy.check(&poster)?;
            model.poster = Set(Some(poster.bytes));
        }

        model.title = Set(input.title);
        model.year = Set(input.year);
        model.rate = Set(input.rate);
        model.storyline = Set(input.storyline);
        model.genre_id = Set(i32::from(input.genre_id));

        let movie = model.update(&self.db).await?;
        info!(movie_id = movie.id, "movie updated");
        Ok(movie)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("The id is not found: {id}")));
        }

        info!(movie_id = id, "movie deleted");
        Ok(())
    }

    async fn ensure_genre(&self, genre_id: u8) -> AppResult<()> {
        let found = genre::Entity::find_by_id(i32::from(genre_id)).count(&self.db).await?;
        if found == 0 {
            return Err(AppError::validation("Invalid genre id!"));
        }
        Ok(())
    }
}
