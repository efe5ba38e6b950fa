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

//! API to delete an engine that no car uses.

use crate::driver::Driver;
use crate::model::EngineId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use carmgmt_authn::rest::Whoami;
use carmgmt_core::rest::{EmptyBody, RestResult};
use log::info;

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Whoami(username): Whoami,
    _: EmptyBody,
) -> RestResult<StatusCode> {
    let id = EngineId::parse(&id)?;
    driver.delete_engine(id).await?;
    info!("User {} deleted engine {}", username, id);
    Ok(StatusCode::NO_CONTENT)
}
