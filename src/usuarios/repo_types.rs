use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Row of the `usuarios` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Usuario {
    pub id_usuario: i32,
    pub nombre: String,
    pub correo: String,
    #[serde(skip_serializing)]
    pub contrasena_hash: String, // bcrypt digest, never serialized
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: OffsetDateTime,
}

/// Values written on insert and on wholesale update. The hash is always
/// produced by `usuarios::services`.
#[derive(Debug, Clone)]
pub struct NewUsuario {
    pub nombre: String,
    pub correo: String,
    pub contrasena_hash: String,
}

/// Non-sensitive columns returned by the profile endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsuarioPerfil {
    pub id_usuario: i32,
    pub nombre: String,
    pub correo: String,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: OffsetDateTime,
}

impl From<Usuario> for UsuarioPerfil {
    fn from(u: Usuario) -> Self {
        Self {
            id_usuario: u.id_usuario,
            nombre: u.nombre,
            correo: u.correo,
            fecha_creacion: u.fecha_creacion,
        }
    }
}
