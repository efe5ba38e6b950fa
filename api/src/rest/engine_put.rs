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

//! API to replace the details of an existing engine.

use crate::driver::Driver;
use crate::model::{EngineId, EngineRequest};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use carmgmt_authn::rest::Whoami;
use carmgmt_core::rest::{JsonBody, RestResult};
use log::info;

/// PUT handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Whoami(username): Whoami,
    JsonBody(request): JsonBody<EngineRequest>,
) -> RestResult<impl IntoResponse> {
    let id = EngineId::parse(&id)?;
    let engine = driver.update_engine(id, request).await?;
    info!("User {} updated engine {}", username, id);
    Ok(Json(engine))
}
