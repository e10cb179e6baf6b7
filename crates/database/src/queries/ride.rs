use std::fmt::{Debug, Display};

use model::{
    pagination::{Pagination, RidePage},
    ride::Ride,
    WithId,
};
use serde::Serialize;
use sqlx::{Executor, QueryBuilder, Sqlite};
use utility::{
    id::{HasId, Id},
    let_also::LetAlso,
};

use crate::data_model::{ride::RideRow, with_id, with_ids};
use crate::Result;

const SELECT_RIDES: &str = "
    SELECT id, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle
    FROM rides";

pub async fn create_table<'c, E>(executor: E) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        "
        CREATE TABLE IF NOT EXISTS rides (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            startLat REAL NOT NULL,
            startLong REAL NOT NULL,
            endLat REAL NOT NULL,
            endLong REAL NOT NULL,
            riderName TEXT NOT NULL,
            driverName TEXT NOT NULL,
            driverVehicle TEXT NOT NULL
        );
        ",
    )
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert<'c, E>(executor: E, ride: &Ride) -> Result<Id<Ride>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        "
        INSERT INTO rides (startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle)
        VALUES (?, ?, ?, ?, ?, ?, ?);
        ",
    )
    .bind(ride.start_latitude)
    .bind(ride.start_longitude)
    .bind(ride.end_latitude)
    .bind(ride.end_longitude)
    .bind(&ride.rider_name)
    .bind(&ride.driver_name)
    .bind(&ride.driver_vehicle)
    .execute(executor)
    .await?
    .let_owned(|result| Ok(Id::new(result.last_insert_rowid())))
}

pub async fn get<'c, E>(executor: E, id: Id<Ride>) -> Result<Option<WithId<Ride>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let row: Option<RideRow> = sqlx::query_as(
        "
        SELECT id, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle
        FROM rides
        WHERE id = ?;
        ",
    )
    .bind(id.raw())
    .fetch_optional(executor)
    .await?;
    Ok(row.map(with_id))
}

/// Keyset pagination over `id DESC`.
///
/// The cursor is an inclusive upper bound. With a limit, one row more than
/// requested is fetched; that lookahead row becomes the next cursor and is
/// not returned.
pub async fn get_page<'c, E>(executor: E, pagination: &Pagination) -> Result<RidePage>
where
    E: Executor<'c, Database = Sqlite>,
{
    let cursor = pagination.cursor_id::<Ride>()?;

    let mut query = QueryBuilder::<Sqlite>::new(SELECT_RIDES);
    if let Some(cursor) = cursor {
        query.push(" WHERE id <= ").push_bind(cursor.raw());
    }
    query.push(" ORDER BY id DESC");
    if pagination.limit > 0 {
        query.push(" LIMIT ").push_bind(lookahead_limit(pagination.limit));
    }

    let rows: Vec<RideRow> = query.build_query_as().fetch_all(executor).await?;
    let (rides, cursor) = split_lookahead(with_ids(rows), pagination.limit);
    Ok(RidePage { rides, cursor })
}

fn lookahead_limit(limit: u64) -> i64 {
    i64::try_from(limit.saturating_add(1)).unwrap_or(i64::MAX)
}

/// Splits the lookahead row off a fetched window and turns its id into the
/// next cursor. Yields an empty cursor when the window is the last one or when
/// `limit` is zero.
pub fn split_lookahead<T>(mut window: Vec<WithId<T>>, limit: u64) -> (Vec<WithId<T>>, String)
where
    T: HasId,
    T::IdType: Debug + Clone + Serialize + Display,
{
    let limit = match usize::try_from(limit) {
        Ok(limit) if limit > 0 && window.len() > limit => limit,
        _ => return (window, String::new()),
    };

    let next_cursor = window[limit].id.to_string();
    window.truncate(limit);
    (window, next_cursor)
}
