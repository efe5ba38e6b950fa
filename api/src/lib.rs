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

//! REST service to manage a catalog of cars and the engines they use.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

#[cfg(feature = "postgres")]
use carmgmt_authn::driver::{AuthnDriver, AuthnOptions};
#[cfg(feature = "postgres")]
use carmgmt_core::clocks::SystemClock;
#[cfg(feature = "postgres")]
use carmgmt_core::db::Db;
#[cfg(feature = "postgres")]
use carmgmt_core::db::postgres::{PostgresDb, PostgresOptions};
#[cfg(feature = "postgres")]
use carmgmt_core::rest::HttpMetrics;
#[cfg(feature = "postgres")]
use log::info;
#[cfg(feature = "postgres")]
use std::error::Error;
#[cfg(feature = "postgres")]
use std::net::SocketAddr;
#[cfg(feature = "postgres")]
use std::path::PathBuf;
#[cfg(feature = "postgres")]
use std::sync::Arc;

pub mod db;
pub mod driver;
pub mod model;
pub mod rest;

/// Authentication realm reported to clients that fail to authenticate.
pub const REALM: &str = "carmgmt";

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// The database schema is created from `schema_file` if given, or from the embedded schema
/// otherwise.  Returns once the server stops, after closing the database pool.
#[cfg(feature = "postgres")]
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db_opts: PostgresOptions,
    schema_file: Option<PathBuf>,
    authn_opts: AuthnOptions,
) -> Result<(), Box<dyn Error>> {
    let db = Arc::from(PostgresDb::connect(db_opts));
    {
        let mut ex = db.ex().await?;
        match schema_file {
            Some(path) => {
                info!("Initializing database schema from {}", path.display());
                db::run_schema_file(&mut ex, &path).await?;
            }
            None => {
                info!("Initializing database with the embedded schema");
                db::init_schema(&mut ex).await?;
            }
        }
    }

    let clock = Arc::from(SystemClock::default());
    let driver = driver::Driver::new(db.clone(), clock.clone());
    let authn = AuthnDriver::new(clock, REALM, authn_opts);
    let app = rest::app(driver, authn, HttpMetrics::new());

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    let result = axum::serve(listener, app).await;

    db.close().await;
    result?;
    Ok(())
}
