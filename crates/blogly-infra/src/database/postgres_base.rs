use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, Iterable, PrimaryKeyToColumn, QueryOrder, SqlErr};

use blogly_core::error::RepoError;
use blogly_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: sea_orm::PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }

        let result = query.all(&self.db).await.map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Translate a SeaORM error, keeping constraint violations distinguishable.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::RecordNotFound(_) => RepoError::NotFound,
            other => RepoError::Query(other.to_string()),
        },
    }
}
