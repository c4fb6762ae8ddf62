use tracing::debug;

use super::{
    dto::UsuarioFields,
    repo::UserRepository,
    repo_types::{NewUsuario, Usuario},
};
use crate::auth::password::hash_password_blocking;

// Every write of a password goes through here, whichever route it came from.
async fn hashed(fields: UsuarioFields) -> anyhow::Result<NewUsuario> {
    let contrasena_hash = hash_password_blocking(fields.contrasena).await?;
    Ok(NewUsuario {
        nombre: fields.nombre,
        correo: fields.correo,
        contrasena_hash,
    })
}

pub async fn create_usuario(
    repo: &dyn UserRepository,
    fields: UsuarioFields,
) -> anyhow::Result<Usuario> {
    let nuevo = hashed(fields).await?;
    let usuario = repo.insert(nuevo).await?;
    debug!(id_usuario = usuario.id_usuario, "usuario inserted");
    Ok(usuario)
}

/// Replaces all mutable fields. `None` when the id does not exist.
pub async fn update_usuario(
    repo: &dyn UserRepository,
    id: i32,
    fields: UsuarioFields,
) -> anyhow::Result<Option<Usuario>> {
    let cambios = hashed(fields).await?;
    repo.update(id, cambios).await
}
