use std::{env, num::ParseIntError, path::PathBuf, result};

use async_trait::async_trait;
use log::info;
use model::{
    pagination::{Pagination, RidePage},
    ride::Ride,
    WithId,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use utility::id::Id;

pub mod data_model;
pub mod queries;

/// Errors of the store. Both variants display the underlying message
/// unchanged, clients get to see exactly what the driver reported.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    InvalidCursor(#[from] ParseIntError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait RideRepo: Send + Sync {
    /// Stores a ride and returns the id the database assigned to it.
    async fn insert_ride(&self, ride: &Ride) -> Result<Id<Ride>>;

    /// Rides ordered by descending id, see [`queries::ride::get_page`].
    async fn get_rides(&self, pagination: &Pagination) -> Result<RidePage>;

    /// `None` when no ride has this id.
    async fn get_ride(&self, id: Id<Ride>) -> Result<Option<WithId<Ride>>>;
}

pub struct DatabaseConnectionInfo {
    pub path: PathBuf,
}

impl DatabaseConnectionInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Option<Self> {
        let path = env::var("DB_PATH").ok().filter(|path| !path.is_empty())?;
        Some(Self::new(path))
    }

    pub(self) fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
    }
}

#[derive(Clone)]
pub struct SqliteDatabase {
    connection: SqlitePool,
}

impl SqliteDatabase {
    pub async fn connect(database_connection_info: DatabaseConnectionInfo) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .connect_with(database_connection_info.connect_options())
            .await?;
        info!(
            "opened sqlite database at {}",
            database_connection_info.path.display()
        );

        Ok(Self { connection: pool })
    }

    /// Creates the `rides` table unless it already exists.
    pub async fn init_table(&self) -> Result<()> {
        queries::ride::create_table(&self.connection).await
    }

    pub async fn close(&self) {
        self.connection.close().await;
    }
}
