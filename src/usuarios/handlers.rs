use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{MessageResponse, UsuarioRequest},
    repo_types::{Usuario, UsuarioPerfil},
    services,
};
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

pub fn usuarios_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route("/usuarios/profile", get(get_profile))
        .route(
            "/usuarios/:id",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
}

#[instrument(skip(state))]
pub async fn list_usuarios(State(state): State<AppState>) -> Result<Json<Vec<Usuario>>, ApiError> {
    let usuarios = state.users.list().await?;
    Ok(Json(usuarios))
}

#[instrument(skip(state, id))]
pub async fn get_usuario(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Usuario>, ApiError> {
    let Path(id) = id?;
    let usuario = state.users.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(usuario))
}

#[instrument(skip(state, payload))]
pub async fn create_usuario(
    State(state): State<AppState>,
    payload: Result<Json<UsuarioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Usuario>), ApiError> {
    let Json(payload) = payload?;
    let fields = payload.into_fields().map_err(|msg| {
        warn!(reason = msg, "create usuario rejected");
        ApiError::validation(msg)
    })?;

    let usuario = services::create_usuario(state.users.as_ref(), fields).await?;
    info!(id_usuario = usuario.id_usuario, "usuario created");
    Ok((StatusCode::CREATED, Json(usuario)))
}

#[instrument(skip(state, id, payload))]
pub async fn update_usuario(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UsuarioRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let fields = payload.into_fields().map_err(|msg| {
        warn!(id_usuario = id, reason = msg, "update usuario rejected");
        ApiError::validation(msg)
    })?;

    services::update_usuario(state.users.as_ref(), id, fields)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(id_usuario = id, "usuario updated");
    Ok(Json(MessageResponse {
        message: "Usuario actualizado correctamente",
    }))
}

#[instrument(skip(state, id))]
pub async fn delete_usuario(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    if !state.users.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!(id_usuario = id, "usuario deleted");
    Ok(Json(MessageResponse {
        message: "Usuario eliminado correctamente",
    }))
}

#[instrument(skip(state, claims))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UsuarioPerfil>, ApiError> {
    let usuario = state
        .users
        .find_by_id(claims.id_usuario)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(UsuarioPerfil::from(usuario)))
}
