use async_trait::async_trait;
use model::{
    pagination::{Pagination, RidePage},
    ride::Ride,
    WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::queries::ride::{get, get_page, insert};
use crate::{RideRepo, Result, SqliteDatabase};

use super::DatabaseRow;

/// Table: rides
///
/// Column names are the short forms (`startLat`, ...), the model uses the
/// long wire names.
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct RideRow {
    pub id: i64,
    pub start_lat: f64,
    pub start_long: f64,
    pub end_lat: f64,
    pub end_long: f64,
    pub rider_name: String,
    pub driver_name: String,
    pub driver_vehicle: String,
}

impl DatabaseRow for RideRow {
    type Model = Ride;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        Ride {
            start_latitude: self.start_lat,
            start_longitude: self.start_long,
            end_latitude: self.end_lat,
            end_longitude: self.end_long,
            rider_name: self.rider_name,
            driver_name: self.driver_name,
            driver_vehicle: self.driver_vehicle,
        }
    }
}

#[async_trait]
impl RideRepo for SqliteDatabase {
    async fn insert_ride(&self, ride: &Ride) -> Result<Id<Ride>> {
        insert(&self.connection, ride).await
    }

    async fn get_rides(&self, pagination: &Pagination) -> Result<RidePage> {
        get_page(&self.connection, pagination).await
    }

    async fn get_ride(&self, id: Id<Ride>) -> Result<Option<WithId<Ride>>> {
        get(&self.connection, id).await
    }
}
