use serde::{Deserialize, Serialize};

/// JWT payload. Field names match the JSON the API has always issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "IdUsuario")]
    pub id_usuario: i32,
    #[serde(rename = "Correo")]
    pub correo: String,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}
