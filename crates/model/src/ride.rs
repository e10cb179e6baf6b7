use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utility::id::{HasId, Id};

use crate::{ExampleData, WithId};

pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A single trip from a start to an end coordinate.
///
/// Missing fields decode to zero or an empty string, so incomplete bodies
/// are caught by [`Ride::validate`] rather than by the decoder. An `id` sent
/// by a client is not part of the content and gets dropped on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Ride {
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    pub rider_name: String,
    pub driver_name: String,
    pub driver_vehicle: String,
}

impl HasId for Ride {
    type IdType = i64;
}

/// Every rule a ride broke, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl Ride {
    /// Checks coordinates and names. Nothing is short-circuited, the error
    /// lists all violations: latitudes, then longitudes, then empty names.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = vec![];

        for latitude in [self.start_latitude, self.end_latitude] {
            if !LATITUDE_RANGE.contains(&latitude) {
                violations.push(format!("{:.6} is not a valid latitude value", latitude));
            }
        }
        for longitude in [self.start_longitude, self.end_longitude] {
            if !LONGITUDE_RANGE.contains(&longitude) {
                violations.push(format!("{:.6} is not a valid longitude value", longitude));
            }
        }
        for (field, value) in [
            ("riderName", &self.rider_name),
            ("driverName", &self.driver_name),
            ("driverVehicle", &self.driver_vehicle),
        ] {
            if value.is_empty() {
                violations.push(format!("{} can't be empty", field));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

impl ExampleData for Ride {
    fn example_data() -> Self {
        Self {
            start_latitude: 54.3233,
            start_longitude: 10.1228,
            end_latitude: 54.3906,
            end_longitude: 10.2052,
            rider_name: "Jane Doe".to_owned(),
            driver_name: "John Roe".to_owned(),
            driver_vehicle: "VW ID.Buzz".to_owned(),
        }
    }
}

impl ExampleData for WithId<Ride> {
    fn example_data() -> Self {
        WithId::new(Id::new(1), Ride::example_data())
    }
}
