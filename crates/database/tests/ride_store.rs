use database::{DatabaseConnectionInfo, DatabaseError, RideRepo, SqliteDatabase};
use model::{pagination::Pagination, ride::Ride};
use tempfile::TempDir;
use utility::id::Id;

async fn open(dir: &TempDir) -> SqliteDatabase {
    let info = DatabaseConnectionInfo::new(dir.path().join("rides.db"));
    let database = SqliteDatabase::connect(info).await.expect("connect");
    database.init_table().await.expect("init table");
    database
}

fn ride(n: i64) -> Ride {
    Ride {
        start_latitude: -90.0 + n as f64,
        start_longitude: -180.0,
        end_latitude: 90.0,
        end_longitude: 179.25,
        rider_name: format!("Rider {}", n),
        driver_name: "Driver".to_owned(),
        driver_vehicle: "Car".to_owned(),
    }
}

async fn seed(database: &SqliteDatabase, count: i64) -> Vec<Id<Ride>> {
    let mut ids = vec![];
    for n in 1..=count {
        ids.push(database.insert_ride(&ride(n)).await.expect("insert"));
    }
    ids
}

async fn page_ids(database: &SqliteDatabase, cursor: &str, limit: u64) -> (Vec<i64>, String) {
    let page = database
        .get_rides(&Pagination::new(cursor, limit))
        .await
        .expect("page");
    (
        page.rides.iter().map(|ride| ride.id.raw()).collect(),
        page.cursor,
    )
}

#[tokio::test]
async fn inserted_ride_reads_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;

    let id = database.insert_ride(&ride(7)).await.unwrap();
    let stored = database.get_ride(id).await.unwrap().expect("stored ride");

    assert_eq!(stored.id, id);
    assert_eq!(stored.content, ride(7));
}

#[tokio::test]
async fn ids_are_assigned_increasingly() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;

    let ids = seed(&database, 3).await;
    assert_eq!(
        ids.iter().map(|id| id.raw()).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn unknown_id_is_none() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;

    assert!(database.get_ride(Id::new(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn pages_follow_lookahead_cursor() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;
    seed(&database, 3).await;

    assert_eq!(
        page_ids(&database, "3", 2).await,
        (vec![3, 2], "1".to_owned())
    );
    assert_eq!(page_ids(&database, "1", 2).await, (vec![1], String::new()));
}

#[tokio::test]
async fn walking_all_pages_visits_every_ride_once() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;
    seed(&database, 7).await;

    let mut seen = vec![];
    let mut cursor = String::new();
    loop {
        let (ids, next) = page_ids(&database, &cursor, 3).await;
        assert!(ids.len() <= 3);
        seen.extend(ids);
        if next.is_empty() {
            break;
        }
        cursor = next;
    }
    assert_eq!(seen, vec![7, 6, 5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn zero_limit_returns_everything_newest_first() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;
    seed(&database, 4).await;

    assert_eq!(
        page_ids(&database, "", 0).await,
        (vec![4, 3, 2, 1], String::new())
    );
}

#[tokio::test]
async fn cursor_past_newest_row_still_windows() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;
    seed(&database, 3).await;

    assert_eq!(
        page_ids(&database, "100", 2).await,
        (vec![3, 2], "1".to_owned())
    );
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;

    assert_eq!(page_ids(&database, "", 5).await, (vec![], String::new()));
}

#[tokio::test]
async fn unparsable_cursor_is_an_error() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;

    let result = database.get_rides(&Pagination::new("abc", 2)).await;
    assert!(matches!(result, Err(DatabaseError::InvalidCursor(_))));
}

#[tokio::test]
async fn init_table_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;
    seed(&database, 2).await;

    database.init_table().await.unwrap();
    assert_eq!(page_ids(&database, "", 0).await.0, vec![2, 1]);
}

#[tokio::test]
async fn rides_survive_reopening_the_file() {
    let dir = TempDir::new().unwrap();
    let database = open(&dir).await;
    let id = database.insert_ride(&ride(1)).await.unwrap();
    database.close().await;

    let reopened = open(&dir).await;
    assert_eq!(
        reopened.get_ride(id).await.unwrap().map(|ride| ride.content),
        Some(ride(1))
    );
}

#[tokio::test]
async fn driver_errors_pass_through() {
    let dir = TempDir::new().unwrap();
    let info = DatabaseConnectionInfo::new(dir.path().join("empty.db"));
    let database = SqliteDatabase::connect(info).await.unwrap();

    let error = database.insert_ride(&ride(1)).await.unwrap_err();
    assert!(matches!(error, DatabaseError::Sqlx(_)));
    assert!(error.to_string().contains("no such table: rides"));
}
