use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, Order, Set};

use super::{ColumnFilter, CompareOp, DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;
use crate::models::{ExpiryFilter, TodoDraft, expiry::start_of_day};

const ID_ASC: (todo::Column, Order) = (todo::Column::Id, Order::Asc);

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;
    const ENTITY_NAME: &'static str = "Todo";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TodoDao {
    pub async fn list_all(&self) -> DaoResult<Vec<todo::Model>> {
        self.find_all(ID_ASC, Vec::new()).await
    }

    pub async fn find_todo(&self, id: i32) -> DaoResult<todo::Model> {
        self.find_by_id(id).await
    }

    pub async fn list_by_filter(&self, filter: ExpiryFilter) -> DaoResult<Vec<todo::Model>> {
        match filter {
            ExpiryFilter::On(date) => self.list_by_expiry_date(date).await,
            ExpiryFilter::Between { after, until } => {
                self.list_by_expiry_range(after, until).await
            }
        }
    }

    /// Todos whose expiry falls on `date` (UTC).
    pub async fn list_by_expiry_date(&self, date: NaiveDate) -> DaoResult<Vec<todo::Model>> {
        let start = start_of_day(date);
        let end = start_of_day(next_day(date)?);
        self.list_expiring_within(start, end).await
    }

    /// Todos whose expiry date is after `after` and no later than `until` (UTC).
    pub async fn list_by_expiry_range(
        &self,
        after: NaiveDate,
        until: NaiveDate,
    ) -> DaoResult<Vec<todo::Model>> {
        if after >= until {
            return Ok(Vec::new());
        }

        let start = start_of_day(next_day(after)?);
        let end = start_of_day(next_day(until)?);
        self.list_expiring_within(start, end).await
    }

    // Half-open instant range [start, end).
    async fn list_expiring_within(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DaoResult<Vec<todo::Model>> {
        let filters = vec![
            ColumnFilter::new(todo::Column::ExpiryDate, CompareOp::Gte, start.naive_utc()),
            ColumnFilter::new(todo::Column::ExpiryDate, CompareOp::Lt, end.naive_utc()),
        ];
        self.find_all(ID_ASC, filters).await
    }

    pub async fn create_todo(&self, draft: TodoDraft) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            title: Set(draft.title),
            description: Set(draft.description),
            expiry_date: Set(draft.expiry_date.naive_utc()),
            percent_complete: Set(draft.percent_complete),
            is_done: Set(draft.is_done),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Overwrites every column except the id. `draft` is only built once the
    /// row is known to exist, inside the same transaction.
    pub async fn replace_todo<F, E>(&self, id: i32, draft: F) -> Result<todo::Model, E>
    where
        F: FnOnce() -> Result<TodoDraft, E> + Send,
        E: From<DaoLayerError> + Send,
    {
        self.update(id, move |active| {
            let draft = draft()?;
            active.title = Set(draft.title);
            active.description = Set(draft.description);
            active.expiry_date = Set(draft.expiry_date.naive_utc());
            active.percent_complete = Set(draft.percent_complete);
            active.is_done = Set(draft.is_done);
            Ok(())
        })
        .await
    }

    pub async fn delete_todo(&self, id: i32) -> DaoResult<()> {
        self.delete(id).await.map(|_| ())
    }
}

fn next_day(date: NaiveDate) -> DaoResult<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or(DaoLayerError::DateOutOfRange(date))
}
