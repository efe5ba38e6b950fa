// Car Management
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate cars and engines.

use crate::model::{Car, CarId, CarSpec, Engine, EngineId, EngineSpec, FuelType};
#[cfg(feature = "postgres")]
use carmgmt_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use carmgmt_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use carmgmt_core::db::{DbError, DbResult, Executor, ensure_one_row};
use futures::TryStreamExt;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use std::path::Path;
use time::OffsetDateTime;
use uuid::Uuid;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Initializes the database schema with the statements in the file at `path`.
pub async fn run_schema_file(ex: &mut Executor, path: &Path) -> DbResult<()> {
    let schema = tokio::fs::read_to_string(path).await.map_err(|e| {
        DbError::BackendError(format!("Cannot read schema from {}: {}", path.display(), e))
    })?;

    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, &schema).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, &schema).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Parses a UUID stored as text by the SQLite backend.
#[cfg(any(feature = "sqlite", test))]
fn parse_uuid(column: &str, value: &str) -> DbResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        DbError::DataIntegrityError(format!("Invalid UUID '{}' in {}: {}", value, column, e))
    })
}

/// Rebuilds the engine details of a car from the nullable columns of a car query.
///
/// The columns are either all present, when the query joined the engine in, or all absent.
fn engine_spec_from_columns(
    displacement: Option<i64>,
    no_of_cylinders: Option<i64>,
    car_range: Option<i64>,
) -> DbResult<Option<EngineSpec>> {
    match (displacement, no_of_cylinders, car_range) {
        (Some(displacement), Some(no_of_cylinders), Some(car_range)) => {
            Ok(Some(EngineSpec::new(displacement, no_of_cylinders, car_range)?))
        }
        (None, None, None) => Ok(None),
        (displacement, no_of_cylinders, car_range) => Err(DbError::DataIntegrityError(format!(
            "Inconsistent engine details: displacement={:?}, no_of_cylinders={:?}, car_range={:?}",
            displacement, no_of_cylinders, car_range
        ))),
    }
}

/// Converts the row count returned by a `COUNT(*)` query.
fn count_from_column(count: i64) -> DbResult<u64> {
    u64::try_from(count)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid count {}: {}", count, e)))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Engine {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: Uuid = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let displacement: i64 = row.try_get("displacement").map_err(postgres::map_sqlx_error)?;
        let no_of_cylinders: i64 =
            row.try_get("no_of_cylinders").map_err(postgres::map_sqlx_error)?;
        let car_range: i64 = row.try_get("car_range").map_err(postgres::map_sqlx_error)?;

        let spec = EngineSpec::new(displacement, no_of_cylinders, car_range)?;
        Ok(Engine::new(EngineId::from(id), spec))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Car {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: Uuid = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let year: String = row.try_get("year").map_err(postgres::map_sqlx_error)?;
        let brand: String = row.try_get("brand").map_err(postgres::map_sqlx_error)?;
        let fuel_type: String = row.try_get("fuel_type").map_err(postgres::map_sqlx_error)?;
        let engine_id: Uuid = row.try_get("engine_id").map_err(postgres::map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(postgres::map_sqlx_error)?;
        let displacement: Option<i64> =
            row.try_get("displacement").map_err(postgres::map_sqlx_error)?;
        let no_of_cylinders: Option<i64> =
            row.try_get("no_of_cylinders").map_err(postgres::map_sqlx_error)?;
        let car_range: Option<i64> = row.try_get("car_range").map_err(postgres::map_sqlx_error)?;
        let created_at: OffsetDateTime =
            row.try_get("created_at").map_err(postgres::map_sqlx_error)?;
        let updated_at: OffsetDateTime =
            row.try_get("updated_at").map_err(postgres::map_sqlx_error)?;

        let spec = CarSpec::from_stored(
            name,
            year,
            brand,
            FuelType::parse(&fuel_type)?,
            EngineId::from(engine_id),
            price,
        );
        let engine = engine_spec_from_columns(displacement, no_of_cylinders, car_range)?;
        Ok(Car::new(CarId::from(id), spec, engine, created_at, updated_at))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Engine {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let displacement: i64 = row.try_get("displacement").map_err(sqlite::map_sqlx_error)?;
        let no_of_cylinders: i64 =
            row.try_get("no_of_cylinders").map_err(sqlite::map_sqlx_error)?;
        let car_range: i64 = row.try_get("car_range").map_err(sqlite::map_sqlx_error)?;

        let spec = EngineSpec::new(displacement, no_of_cylinders, car_range)?;
        Ok(Engine::new(EngineId::from(parse_uuid("id", &id)?), spec))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Car {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let year: String = row.try_get("year").map_err(sqlite::map_sqlx_error)?;
        let brand: String = row.try_get("brand").map_err(sqlite::map_sqlx_error)?;
        let fuel_type: String = row.try_get("fuel_type").map_err(sqlite::map_sqlx_error)?;
        let engine_id: String = row.try_get("engine_id").map_err(sqlite::map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(sqlite::map_sqlx_error)?;
        let displacement: Option<i64> =
            row.try_get("displacement").map_err(sqlite::map_sqlx_error)?;
        let no_of_cylinders: Option<i64> =
            row.try_get("no_of_cylinders").map_err(sqlite::map_sqlx_error)?;
        let car_range: Option<i64> = row.try_get("car_range").map_err(sqlite::map_sqlx_error)?;
        let created_at_secs: i64 = row.try_get("created_at_secs").map_err(sqlite::map_sqlx_error)?;
        let created_at_nsecs: i64 =
            row.try_get("created_at_nsecs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_secs: i64 = row.try_get("updated_at_secs").map_err(sqlite::map_sqlx_error)?;
        let updated_at_nsecs: i64 =
            row.try_get("updated_at_nsecs").map_err(sqlite::map_sqlx_error)?;

        let spec = CarSpec::from_stored(
            name,
            year,
            brand,
            FuelType::parse(&fuel_type)?,
            EngineId::from(parse_uuid("engine_id", &engine_id)?),
            price,
        );
        let engine = engine_spec_from_columns(displacement, no_of_cylinders, car_range)?;
        Ok(Car::new(
            CarId::from(parse_uuid("id", &id)?),
            spec,
            engine,
            build_timestamp(created_at_secs, created_at_nsecs)?,
            build_timestamp(updated_at_secs, updated_at_nsecs)?,
        ))
    }
}

/// Stores a new `engine`.
pub async fn create_engine(ex: &mut Executor, engine: &Engine) -> DbResult<()> {
    let spec = engine.spec();
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO engines (id, displacement, no_of_cylinders, car_range)
                VALUES ($1, $2, $3, $4)
            ";
            let done = sqlx::query(query_str)
                .bind(engine.engine_id().as_ref())
                .bind(spec.displacement())
                .bind(spec.no_of_cylinders())
                .bind(spec.car_range())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO engines (id, displacement, no_of_cylinders, car_range)
                VALUES (?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(engine.engine_id().to_string())
                .bind(spec.displacement())
                .bind(spec.no_of_cylinders())
                .bind(spec.car_range())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(rows_affected)
}

/// Gets the engine identified by `id`.
pub async fn get_engine(ex: &mut Executor, id: EngineId) -> DbResult<Engine> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM engines WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Engine::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM engines WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Engine::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all engines.
///
/// Engines do not track their creation time so they are returned in identifier order.
pub async fn list_engines(ex: &mut Executor) -> DbResult<Vec<Engine>> {
    let mut engines = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM engines ORDER BY id";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                engines.push(Engine::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM engines ORDER BY id";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                engines.push(Engine::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(engines)
}

/// Replaces the details of an existing `engine`.
pub async fn update_engine(ex: &mut Executor, engine: &Engine) -> DbResult<()> {
    let spec = engine.spec();
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE engines
                SET displacement = $1, no_of_cylinders = $2, car_range = $3
                WHERE id = $4
            ";
            let done = sqlx::query(query_str)
                .bind(spec.displacement())
                .bind(spec.no_of_cylinders())
                .bind(spec.car_range())
                .bind(engine.engine_id().as_ref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE engines
                SET displacement = ?, no_of_cylinders = ?, car_range = ?
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(spec.displacement())
                .bind(spec.no_of_cylinders())
                .bind(spec.car_range())
                .bind(engine.engine_id().to_string())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(rows_affected)
}

/// Deletes the engine identified by `id`.
///
/// The schema prevents deleting engines that cars still reference, so callers should take
/// `lock_engine` and check with `count_cars_by_engine` first to report a meaningful error.
pub async fn delete_engine(ex: &mut Executor, id: EngineId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM engines WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM engines WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.to_string())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(rows_affected)
}

/// Locks the engine identified by `id` until the current transaction ends so that no car can
/// start referencing it in the meantime.
pub async fn lock_engine(ex: &mut Executor, id: EngineId) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id FROM engines WHERE id = $1 FOR UPDATE";
            let row = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            match row {
                Some(_) => Ok(()),
                None => Err(DbError::NotFound),
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            // SQLite has no row locks: a no-op write takes the database write lock instead.
            let query_str = "UPDATE engines SET id = id WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.to_string())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            ensure_one_row(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Counts how many cars reference the engine identified by `id`.
pub async fn count_cars_by_engine(ex: &mut Executor, id: EngineId) -> DbResult<u64> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM cars WHERE engine_id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM cars WHERE engine_id = ?";
            let row = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    count_from_column(count)
}

/// Stores a new car `id` described by `spec`, marking it as created and updated at `now`.
pub async fn create_car(
    ex: &mut Executor,
    id: CarId,
    spec: &CarSpec,
    now: OffsetDateTime,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO cars
                    (id, name, year, brand, fuel_type, engine_id, price, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .bind(spec.name())
                .bind(spec.year())
                .bind(spec.brand())
                .bind(spec.fuel_type().as_str())
                .bind(spec.engine_id().as_ref())
                .bind(spec.price())
                .bind(now)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now)?;

            let query_str = "
                INSERT INTO cars
                    (id, name, year, brand, fuel_type, engine_id, price,
                    created_at_secs, created_at_nsecs, updated_at_secs, updated_at_nsecs)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(id.to_string())
                .bind(spec.name())
                .bind(spec.year())
                .bind(spec.brand())
                .bind(spec.fuel_type().as_str())
                .bind(spec.engine_id().to_string())
                .bind(spec.price())
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(now_secs)
                .bind(now_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(rows_affected)
}

/// Gets the car identified by `id` along with the details of its engine.
pub async fn get_car(ex: &mut Executor, id: CarId) -> DbResult<Car> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
                    e.displacement, e.no_of_cylinders, e.car_range,
                    c.created_at, c.updated_at
                FROM cars c LEFT JOIN engines e ON e.id = c.engine_id
                WHERE c.id = $1
            ";
            let row = sqlx::query(query_str)
                .bind(id.as_ref())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Car::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
                    e.displacement, e.no_of_cylinders, e.car_range,
                    c.created_at_secs, c.created_at_nsecs, c.updated_at_secs, c.updated_at_nsecs
                FROM cars c LEFT JOIN engines e ON e.id = c.engine_id
                WHERE c.id = ?
            ";
            let row = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Car::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all cars made by `brand`, including the details of their engines if `include_engine` is
/// true.
pub async fn get_cars_by_brand(
    ex: &mut Executor,
    brand: &str,
    include_engine: bool,
) -> DbResult<Vec<Car>> {
    let mut cars = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = if include_engine {
                "
                SELECT
                    c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
                    e.displacement, e.no_of_cylinders, e.car_range,
                    c.created_at, c.updated_at
                FROM cars c LEFT JOIN engines e ON e.id = c.engine_id
                WHERE c.brand = $1
                ORDER BY c.created_at, c.id
                "
            } else {
                "
                SELECT
                    id, name, year, brand, fuel_type, engine_id, price,
                    NULL::BIGINT AS displacement, NULL::BIGINT AS no_of_cylinders,
                    NULL::BIGINT AS car_range,
                    created_at, updated_at
                FROM cars
                WHERE brand = $1
                ORDER BY created_at, id
                "
            };
            let mut rows = sqlx::query(query_str).bind(brand).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                cars.push(Car::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = if include_engine {
                "
                SELECT
                    c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
                    e.displacement, e.no_of_cylinders, e.car_range,
                    c.created_at_secs, c.created_at_nsecs, c.updated_at_secs, c.updated_at_nsecs
                FROM cars c LEFT JOIN engines e ON e.id = c.engine_id
                WHERE c.brand = ?
                ORDER BY c.created_at_secs, c.created_at_nsecs, c.id
                "
            } else {
                "
                SELECT
                    id, name, year, brand, fuel_type, engine_id, price,
                    NULL AS displacement, NULL AS no_of_cylinders, NULL AS car_range,
                    created_at_secs, created_at_nsecs, updated_at_secs, updated_at_nsecs
                FROM cars
                WHERE brand = ?
                ORDER BY created_at_secs, created_at_nsecs, id
                "
            };
            let mut rows = sqlx::query(query_str).bind(brand).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                cars.push(Car::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(cars)
}

/// Gets all cars along with the details of their engines.
pub async fn list_cars(ex: &mut Executor) -> DbResult<Vec<Car>> {
    let mut cars = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT
                    c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
                    e.displacement, e.no_of_cylinders, e.car_range,
                    c.created_at, c.updated_at
                FROM cars c LEFT JOIN engines e ON e.id = c.engine_id
                ORDER BY c.created_at, c.id
            ";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                cars.push(Car::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT
                    c.id, c.name, c.year, c.brand, c.fuel_type, c.engine_id, c.price,
                    e.displacement, e.no_of_cylinders, e.car_range,
                    c.created_at_secs, c.created_at_nsecs, c.updated_at_secs, c.updated_at_nsecs
                FROM cars c LEFT JOIN engines e ON e.id = c.engine_id
                ORDER BY c.created_at_secs, c.created_at_nsecs, c.id
            ";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                cars.push(Car::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(cars)
}

/// Replaces the contents of the existing car `id` with `spec`, marking it as updated at `now`.
///
/// The creation time is left untouched.
pub async fn update_car(
    ex: &mut Executor,
    id: CarId,
    spec: &CarSpec,
    now: OffsetDateTime,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE cars
                SET name = $1, year = $2, brand = $3, fuel_type = $4, engine_id = $5, price = $6,
                    updated_at = $7
                WHERE id = $8
            ";
            let done = sqlx::query(query_str)
                .bind(spec.name())
                .bind(spec.year())
                .bind(spec.brand())
                .bind(spec.fuel_type().as_str())
                .bind(spec.engine_id().as_ref())
                .bind(spec.price())
                .bind(now)
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now)?;

            let query_str = "
                UPDATE cars
                SET name = ?, year = ?, brand = ?, fuel_type = ?, engine_id = ?, price = ?,
                    updated_at_secs = ?, updated_at_nsecs = ?
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(spec.name())
                .bind(spec.year())
                .bind(spec.brand())
                .bind(spec.fuel_type().as_str())
                .bind(spec.engine_id().to_string())
                .bind(spec.price())
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(id.to_string())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(rows_affected)
}

/// Deletes the car identified by `id`.
pub async fn delete_car(ex: &mut Executor, id: CarId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM cars WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_ref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM cars WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.to_string())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    ensure_one_row(rows_affected)
}
