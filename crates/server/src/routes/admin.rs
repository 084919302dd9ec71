use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use serde::Serialize;

use service::packages::domain::{Package, PackageForm};

use crate::errors::ApiError;
use crate::routes::auth::{AuthenticatedAdmin, ServerState};

const DASHBOARD: &str = "/admin/dashboard";

#[derive(Serialize)]
pub struct Dashboard {
    pub admin_id: i32,
    pub packages: Vec<Package>,
}

#[derive(Serialize)]
pub struct PackageFormPage {
    pub action: String,
    pub package: Option<Package>,
}

pub async fn dashboard(
    State(state): State<ServerState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
) -> Result<Json<Dashboard>, ApiError> {
    let packages = state.packages.list_admin().await?;
    Ok(Json(Dashboard { admin_id: admin.admin_id, packages }))
}

pub async fn add_form() -> Json<PackageFormPage> {
    Json(PackageFormPage { action: "/admin/packages/add".into(), package: None })
}

pub async fn create_package(
    State(state): State<ServerState>,
    Form(form): Form<PackageForm>,
) -> Result<Redirect, ApiError> {
    let input = form.into_input()?;
    state.packages.create(input).await?;
    Ok(Redirect::to(DASHBOARD))
}

pub async fn edit_form(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<PackageFormPage>, ApiError> {
    let package = state.packages.get(id).await?;
    Ok(Json(PackageFormPage { action: format!("/admin/packages/edit/{id}"), package: Some(package) }))
}

pub async fn update_package(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Form(form): Form<PackageForm>,
) -> Result<Redirect, ApiError> {
    let input = form.into_input()?;
    state.packages.update(id, input).await?;
    Ok(Redirect::to(DASHBOARD))
}

pub async fn delete_package(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    state.packages.delete(id).await?;
    Ok(Redirect::to(DASHBOARD))
}
