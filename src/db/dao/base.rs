use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, Order, PrimaryKeyTrait, QueryFilter, QueryOrder, Select, TransactionTrait,
    sea_query::Value,
};

use super::error::{DaoLayerError, DaoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone)]
pub struct ColumnFilter<C> {
    pub column: C,
    pub op: CompareOp,
    pub value: Value,
}

impl<C: ColumnTrait> ColumnFilter<C> {
    pub fn new(column: C, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }

    fn apply<E>(self, select: Select<E>) -> Select<E>
    where
        E: EntityTrait<Column = C>,
    {
        let expr = match self.op {
            CompareOp::Lt => self.column.lt(self.value),
            CompareOp::Lte => self.column.lte(self.value),
            CompareOp::Gt => self.column.gt(self.value),
            CompareOp::Gte => self.column.gte(self.value),
        };
        select.filter(expr)
    }
}

/// Shared CRUD plumbing for entities keyed by an integer primary key.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel:
        ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i32> + Send + Sync,
{
    type Entity: EntityTrait + Send + Sync;
    const ENTITY_NAME: &'static str;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    fn not_found(id: i32) -> DaoLayerError {
        DaoLayerError::NotFound {
            entity: Self::ENTITY_NAME,
            id,
        }
    }

    async fn create(
        &self,
        active: <Self::Entity as EntityTrait>::ActiveModel,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        Ok(active.insert(self.db()).await?)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find_all(
        &self,
        order: (<Self::Entity as EntityTrait>::Column, Order),
        filters: Vec<ColumnFilter<<Self::Entity as EntityTrait>::Column>>,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        let (column, direction) = order;
        let select = filters
            .into_iter()
            .fold(Self::Entity::find(), |select, filter| filter.apply(select));

        Ok(select.order_by(column, direction).all(self.db()).await?)
    }

    /// Loads the row and writes the changes made by `apply` in one transaction.
    /// A missing row is reported before `apply` runs; an `apply` error rolls back.
    async fn update<F, E>(
        &self,
        id: i32,
        apply: F,
    ) -> Result<<Self::Entity as EntityTrait>::Model, E>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) -> Result<(), E>
            + Send,
        E: From<DaoLayerError> + Send,
    {
        let txn = self.db().begin().await.map_err(DaoLayerError::from)?;
        let model = Self::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(DaoLayerError::from)?
            .ok_or_else(|| Self::not_found(id))?;

        let mut active = model.into_active_model();
        apply(&mut active)?;
        let updated = active.update(&txn).await.map_err(DaoLayerError::from)?;
        txn.commit().await.map_err(DaoLayerError::from)?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> DaoResult<i32> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        Ok(id)
    }
}
