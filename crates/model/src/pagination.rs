use std::{num::ParseIntError, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{ride::Ride, WithId};

/// Keyset pagination parameters of a list request.
///
/// `cursor` is an inclusive upper bound on the id, empty meaning "start at the
/// newest row". A `limit` of zero turns pagination off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub cursor: String,
    pub limit: u64,
}

impl Pagination {
    pub fn new(cursor: impl Into<String>, limit: u64) -> Self {
        Self {
            cursor: cursor.into(),
            limit,
        }
    }

    pub fn cursor_id<T>(&self) -> Result<Option<Id<T>>, ParseIntError>
    where
        T: HasId,
        T::IdType: FromStr<Err = ParseIntError>,
    {
        if self.cursor.is_empty() {
            return Ok(None);
        }
        self.cursor.parse().map(Some)
    }
}

/// One page of rides, newest first, plus the cursor of the following page.
/// An empty `cursor` means there is nothing left.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RidePage {
    pub rides: Vec<WithId<Ride>>,
    pub cursor: String,
}
