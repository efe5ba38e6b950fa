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

//! API to list the cars of a brand.

use crate::driver::Driver;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use carmgmt_core::rest::{EmptyBody, RestResult};
use serde::Deserialize;

/// Query parameters accepted by this API.
#[derive(Deserialize)]
pub(crate) struct BrandQuery {
    /// Whether to include engine details.  Only the literal `true` enables them.
    #[serde(rename = "isEngine")]
    is_engine: Option<String>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(brand): Path<String>,
    Query(query): Query<BrandQuery>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let include_engine = query.is_engine.as_deref() == Some("true");
    let cars = driver.get_cars_by_brand(brand, include_engine).await?;
    Ok(Json(cars))
}
