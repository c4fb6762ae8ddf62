use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewUsuario, Usuario};

/// Storage capability the handlers depend on.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Usuario>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Usuario>>;
    async fn find_by_email(&self, correo: &str) -> anyhow::Result<Option<Usuario>>;
    async fn insert(&self, nuevo: NewUsuario) -> anyhow::Result<Usuario>;
    /// `None` when no row has that id.
    async fn update(&self, id: i32, cambios: NewUsuario) -> anyhow::Result<Option<Usuario>>;
    /// `false` when no row has that id.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> anyhow::Result<Vec<Usuario>> {
        let rows = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id_usuario, nombre, correo, contrasena_hash, fecha_creacion
            FROM usuarios
            ORDER BY id_usuario
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list usuarios")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Usuario>> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id_usuario, nombre, correo, contrasena_hash, fecha_creacion
            FROM usuarios
            WHERE id_usuario = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find usuario by id")?;
        Ok(row)
    }

    async fn find_by_email(&self, correo: &str) -> anyhow::Result<Option<Usuario>> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id_usuario, nombre, correo, contrasena_hash, fecha_creacion
            FROM usuarios
            WHERE correo = $1
            ORDER BY id_usuario
            LIMIT 1
            "#,
        )
        .bind(correo)
        .fetch_optional(&self.db)
        .await
        .context("find usuario by correo")?;
        Ok(row)
    }

    async fn insert(&self, nuevo: NewUsuario) -> anyhow::Result<Usuario> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nombre, correo, contrasena_hash)
            VALUES ($1, $2, $3)
            RETURNING id_usuario, nombre, correo, contrasena_hash, fecha_creacion
            "#,
        )
        .bind(&nuevo.nombre)
        .bind(&nuevo.correo)
        .bind(&nuevo.contrasena_hash)
        .fetch_one(&self.db)
        .await
        .context("insert usuario")?;
        Ok(row)
    }

    async fn update(&self, id: i32, cambios: NewUsuario) -> anyhow::Result<Option<Usuario>> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
               SET nombre = $2, correo = $3, contrasena_hash = $4
             WHERE id_usuario = $1
            RETURNING id_usuario, nombre, correo, contrasena_hash, fecha_creacion
            "#,
        )
        .bind(id)
        .bind(&cambios.nombre)
        .bind(&cambios.correo)
        .bind(&cambios.contrasena_hash)
        .fetch_optional(&self.db)
        .await
        .context("update usuario")?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id_usuario = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete usuario")?;
        Ok(result.rows_affected() > 0)
    }
}
