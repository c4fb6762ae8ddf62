use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::{
    config::AppConfig,
    usuarios::{
        repo::UserRepository,
        repo_types::{NewUsuario, Usuario},
    },
};

pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn bearer(mut req: Request<Body>, token: &str) -> Request<Body> {
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    req
}

/// Runs one request through the router. Non-JSON bodies come back as a string.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Token signed with the test secret that also carries an `aud` claim,
/// the way tokens minted by other clients of the same secret look.
pub fn token_with_audience(usuario: &Usuario) -> String {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = json!({
        "IdUsuario": usuario.id_usuario,
        "Correo": usuario.correo,
        "Nombre": usuario.nombre,
        "iat": now,
        "exp": now + 3600,
        "aud": "usuarios-web",
    });
    let secret = AppConfig::test().jwt.secret;
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Repository whose every call fails like a dropped database connection.
pub struct BrokenRepo;

#[async_trait]
impl UserRepository for BrokenRepo {
    async fn list(&self) -> anyhow::Result<Vec<Usuario>> {
        anyhow::bail!("Database connection failed: 10.0.0.5:5432")
    }
    async fn find_by_id(&self, _id: i32) -> anyhow::Result<Option<Usuario>> {
        anyhow::bail!("Database connection failed")
    }
    async fn find_by_email(&self, _correo: &str) -> anyhow::Result<Option<Usuario>> {
        anyhow::bail!("Database connection failed")
    }
    async fn insert(&self, _nuevo: NewUsuario) -> anyhow::Result<Usuario> {
        anyhow::bail!("Database connection failed")
    }
    async fn update(&self, _id: i32, _c: NewUsuario) -> anyhow::Result<Option<Usuario>> {
        anyhow::bail!("Database connection failed")
    }
    async fn delete(&self, _id: i32) -> anyhow::Result<bool> {
        anyhow::bail!("Database connection failed")
    }
}
