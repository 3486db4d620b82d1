//! Generic repository base for SeaORM entities keyed by a Uuid primary key
//!
//! Domain crates wrap a `BaseRepository` and expose their own typed
//! repository traits on top of it.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

/// Marker trait for entities with a `Uuid` primary key
pub trait UuidEntity: EntityTrait {}

impl<E> UuidEntity for E
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
{
}

/// Shared CRUD plumbing for a SeaORM entity
///
/// Holds the connection and provides the standard insert / find / update /
/// delete operations so each domain repository only implements the queries
/// that are actually specific to it.
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Access the underlying connection for entity-specific queries
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert<A>(&self, model: A) -> Result<E::Model, sea_orm::DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, sea_orm::DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<E::Model>, sea_orm::DbErr> {
        E::find().all(&self.db).await
    }

    pub async fn update<A>(&self, model: A) -> Result<E::Model, sea_orm::DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// Delete by id, returning the number of affected rows (0 or 1)
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, sea_orm::DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}
