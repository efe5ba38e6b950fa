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

//! Shared scaffolding for the car management services.
//!
//! Services built on top of this crate are split in the following layers, and each service crate
//! should expose modules with these same names:
//!
//! 1.  `model`: Domain types.  Values are validated when constructed so that the rest of the
//!     service can trust them.  Newtypes are preferred over raw strings and numbers.
//!
//! 1.  `db`: Persistence.  Free functions that take an `Executor` and issue the queries for each
//!     supported database backend.
//!
//! 1.  `driver`: Business logic.  A cloneable `Driver` type holds the database, the clock and any
//!     other in-memory state, and every operation runs inside a single transaction.
//!
//! 1.  `rest`: HTTP.  One file per API plus an `app` function returning the `axum::Router`.
//!
//! 1.  `main`: Launcher.  Reads configuration from the environment and starts the server.
//!
//! Each layer has its own error and result types (`ModelError`, `DbError`, `DriverError` and
//! `RestError`).  Errors move up through `?` and become HTTP status codes once they leave the
//! REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
