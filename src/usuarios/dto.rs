use serde::{Deserialize, Serialize};

pub const CAMPOS_REQUERIDOS: &str = "Todos los campos son requeridos";

/// Column widths of `usuarios.nombre` and `usuarios.correo`, in characters.
pub const NOMBRE_MAX: usize = 100;
pub const CORREO_MAX: usize = 255;

const NOMBRE_DEMASIADO_LARGO: &str = "El nombre no puede superar 100 caracteres";
const CORREO_DEMASIADO_LARGO: &str = "El correo no puede superar 255 caracteres";

pub fn check_correo(correo: &str) -> Result<(), &'static str> {
    if correo.chars().count() > CORREO_MAX {
        return Err(CORREO_DEMASIADO_LARGO);
    }
    Ok(())
}

/// Body of `POST /usuarios`, `PUT /usuarios/{id}` and `POST /auth/register`.
/// Fields are optional here so that a missing one becomes a 400 with the
/// API's own message instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct UsuarioRequest {
    #[serde(rename = "Nombre")]
    pub nombre: Option<String>,
    #[serde(rename = "Correo")]
    pub correo: Option<String>,
    #[serde(rename = "Contrasena")]
    pub contrasena: Option<String>,
}

/// A `UsuarioRequest` with every field present, non-empty and within the
/// column widths.
#[derive(Debug, Clone)]
pub struct UsuarioFields {
    pub nombre: String,
    pub correo: String,
    pub contrasena: String,
}

impl UsuarioRequest {
    /// Fails with the message to return as a 400.
    pub fn into_fields(self) -> Result<UsuarioFields, &'static str> {
        let (Some(nombre), Some(correo), Some(contrasena)) = (
            self.nombre.filter(|v| !v.is_empty()),
            self.correo.filter(|v| !v.is_empty()),
            self.contrasena.filter(|v| !v.is_empty()),
        ) else {
            return Err(CAMPOS_REQUERIDOS);
        };
        if nombre.chars().count() > NOMBRE_MAX {
            return Err(NOMBRE_DEMASIADO_LARGO);
        }
        check_correo(&correo)?;
        Ok(UsuarioFields {
            nombre,
            correo,
            contrasena,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
