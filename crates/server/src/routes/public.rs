use axum::{extract::State, Json};
use serde::Serialize;

use service::gallery::domain::GalleryImage;
use service::packages::domain::CategoryGroup;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct Pricelist {
    pub categories: Vec<CategoryGroup>,
}

#[derive(Serialize)]
pub struct Gallery {
    pub images: Vec<GalleryImage>,
}

pub async fn pricelist(State(state): State<ServerState>) -> Result<Json<Pricelist>, ApiError> {
    let categories = state.packages.pricelist().await?;
    Ok(Json(Pricelist { categories }))
}

pub async fn gallery(State(state): State<ServerState>) -> Result<Json<Gallery>, ApiError> {
    let images = state.gallery.list_images().await?;
    Ok(Json(Gallery { images }))
}
