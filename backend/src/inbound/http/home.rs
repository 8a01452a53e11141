//! Home route naming the two screens.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EntityKind;
use crate::inbound::http::schemas::EntityKindSchema;

/// Link to one screen.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenLink {
    #[schema(value_type = EntityKindSchema)]
    pub screen: EntityKind,
    #[schema(example = "/api/v1/users")]
    pub path: String,
}

/// Home payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub message: String,
    pub screens: Vec<ScreenLink>,
}

/// Welcome message and the screen routes.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome", body = HomeResponse)),
    tags = ["screens"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<HomeResponse> {
    let screens = [EntityKind::Users, EntityKind::Banks]
        .into_iter()
        .map(|screen| ScreenLink {
            screen,
            path: format!("/api/v1/{screen}"),
        })
        .collect();
    web::Json(HomeResponse {
        message: "Welcome to the users and banks workspace".to_owned(),
        screens,
    })
}
