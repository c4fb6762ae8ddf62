use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::{
    dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, VerifyResponse},
    extractors::bearer_token,
    jwt::{JwtKeys, TokenError},
    password::{verify_against_dummy_blocking, verify_password_blocking},
};
use crate::{
    error::ApiError,
    state::AppState,
    usuarios::services,
};

const CREDENCIALES_INVALIDAS: &str = "Credenciales inválidas";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(payload) = payload?;
    let fields = payload.into_fields().map_err(|msg| {
        warn!(reason = msg, "register rejected");
        ApiError::validation(msg)
    })?;

    if state.users.find_by_email(&fields.correo).await?.is_some() {
        warn!(correo = %fields.correo, "correo already registered");
        return Err(ApiError::validation("El usuario ya existe con ese correo"));
    }

    let usuario = services::create_usuario(state.users.as_ref(), fields).await?;

    info!(id_usuario = usuario.id_usuario, correo = %usuario.correo, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Usuario registrado exitosamente",
            usuario,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;
    let (correo, contrasena) = payload.into_credentials().map_err(|msg| {
        warn!(reason = msg, "login rejected");
        ApiError::validation(msg)
    })?;

    let Some(usuario) = state.users.find_by_email(&correo).await? else {
        // Same bcrypt cost as a real check, so timing does not reveal the account.
        verify_against_dummy_blocking(contrasena).await;
        warn!(correo = %correo, "login unknown correo");
        return Err(ApiError::unauthorized(CREDENCIALES_INVALIDAS));
    };

    // An unreadable stored digest can never match; answer like a wrong password.
    let ok = match verify_password_blocking(contrasena, usuario.contrasena_hash.clone()).await {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, id_usuario = usuario.id_usuario, "stored digest unusable");
            false
        }
    };
    if !ok {
        warn!(id_usuario = usuario.id_usuario, "login invalid password");
        return Err(ApiError::unauthorized(CREDENCIALES_INVALIDAS));
    }

    let token = state.jwt.sign(&usuario)?;

    info!(id_usuario = usuario.id_usuario, correo = %usuario.correo, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login exitoso",
        token,
        usuario,
    }))
}

#[instrument(skip(keys, headers))]
pub async fn verify(
    State(keys): State<JwtKeys>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| {
        warn!("verify without token");
        ApiError::unauthorized("Token no proporcionado")
    })?;

    let claims = keys.verify(token).map_err(|e| match e {
        TokenError::Invalid => {
            warn!("verify invalid token");
            ApiError::unauthorized("Token inválido")
        }
        TokenError::Expired => {
            warn!("verify expired token");
            ApiError::unauthorized("Token expirado")
        }
        TokenError::Other(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
    })?;

    Ok(Json(VerifyResponse {
        message: "Token válido",
        usuario: claims.into(),
    }))
}
