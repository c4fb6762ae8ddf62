use serde::{Deserialize, Serialize};

use super::claims::Claims;
use crate::usuarios::{dto::check_correo, repo_types::Usuario};

pub use crate::usuarios::dto::UsuarioRequest as RegisterRequest;

pub const CREDENCIALES_REQUERIDAS: &str = "Correo y contraseña son requeridos";

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Correo")]
    pub correo: Option<String>,
    #[serde(rename = "Contrasena")]
    pub contrasena: Option<String>,
}

impl LoginRequest {
    /// `(correo, contrasena)`, or the message to return as a 400.
    pub fn into_credentials(self) -> Result<(String, String), &'static str> {
        let (Some(correo), Some(contrasena)) = (
            self.correo.filter(|v| !v.is_empty()),
            self.contrasena.filter(|v| !v.is_empty()),
        ) else {
            return Err(CREDENCIALES_REQUERIDAS);
        };
        check_correo(&correo)?;
        Ok((correo, contrasena))
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub usuario: Usuario,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub usuario: Usuario,
}

/// The identity carried by a token.
#[derive(Debug, Serialize)]
pub struct TokenUser {
    #[serde(rename = "IdUsuario")]
    pub id_usuario: i32,
    #[serde(rename = "Correo")]
    pub correo: String,
    #[serde(rename = "Nombre")]
    pub nombre: String,
}

impl From<Claims> for TokenUser {
    fn from(c: Claims) -> Self {
        Self {
            id_usuario: c.id_usuario,
            correo: c.correo,
            nombre: c.nombre,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: &'static str,
    pub usuario: TokenUser,
}
