use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{
    dto::{CORREO_MAX, NOMBRE_MAX},
    repo::UserRepository,
    repo_types::{NewUsuario, Usuario},
};

// Same widths as the `usuarios` columns, so oversized values fail here too.
fn check_widths(row: &NewUsuario) -> anyhow::Result<()> {
    anyhow::ensure!(
        row.nombre.chars().count() <= NOMBRE_MAX,
        "value too long for type character varying({NOMBRE_MAX})"
    );
    anyhow::ensure!(
        row.correo.chars().count() <= CORREO_MAX,
        "value too long for type character varying({CORREO_MAX})"
    );
    Ok(())
}

/// `UserRepository` backed by a map, for tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, Usuario>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> anyhow::Result<Vec<Usuario>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Usuario>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, correo: &str) -> anyhow::Result<Option<Usuario>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().find(|u| u.correo == correo).cloned())
    }

    async fn insert(&self, nuevo: NewUsuario) -> anyhow::Result<Usuario> {
        check_widths(&nuevo)?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let usuario = Usuario {
            id_usuario: inner.last_id,
            nombre: nuevo.nombre,
            correo: nuevo.correo,
            contrasena_hash: nuevo.contrasena_hash,
            fecha_creacion: OffsetDateTime::now_utc(),
        };
        inner.rows.insert(usuario.id_usuario, usuario.clone());
        Ok(usuario)
    }

    async fn update(&self, id: i32, cambios: NewUsuario) -> anyhow::Result<Option<Usuario>> {
        check_widths(&cambios)?;
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.nombre = cambios.nombre;
        row.correo = cambios.correo;
        row.contrasena_hash = cambios.contrasena_hash;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuevo(nombre: &str, correo: &str) -> NewUsuario {
        NewUsuario {
            nombre: nombre.into(),
            correo: correo.into(),
            contrasena_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_and_finds_rows() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(nuevo("Ana", "ana@x.com")).await.unwrap();
        let b = repo.insert(nuevo("Bea", "bea@x.com")).await.unwrap();
        assert_eq!((a.id_usuario, b.id_usuario), (1, 2));

        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(b));
        assert_eq!(repo.find_by_email("ana@x.com").await.unwrap(), Some(a));
        assert_eq!(repo.find_by_email("nadie@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = InMemoryUserRepository::new();
        repo.insert(nuevo("Ana", "ana@x.com")).await.unwrap();

        assert!(repo.update(99, nuevo("X", "x@x.com")).await.unwrap().is_none());
        assert!(!repo.delete(99).await.unwrap());
        assert_eq!(repo.len().await, 1);

        let updated = repo.update(1, nuevo("Ana M", "anam@x.com")).await.unwrap().unwrap();
        assert_eq!(updated.nombre, "Ana M");
        assert!(repo.delete(1).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_values_wider_than_the_columns() {
        let repo = InMemoryUserRepository::new();
        let long_nombre = "N".repeat(101);
        let long_correo = "c".repeat(256);

        assert!(repo.insert(nuevo(&long_nombre, "a@x.com")).await.is_err());
        assert!(repo.insert(nuevo("Ana", &long_correo)).await.is_err());
        assert_eq!(repo.len().await, 0);

        repo.insert(nuevo(&"ñ".repeat(100), "ana@x.com")).await.unwrap();
        let err = repo.update(1, nuevo("Ana", &long_correo)).await.unwrap_err();
        assert!(err.to_string().contains("character varying(255)"));
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().correo, "ana@x.com");
    }
}
