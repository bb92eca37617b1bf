use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// UTC wall-clock time, whole seconds.
    #[sea_orm(indexed)]
    pub expiry_date: DateTime,
    pub percent_complete: i32,
    #[sea_orm(default_value = false)]
    pub is_done: bool,
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, Schema};

    use super::Entity;

    fn create_table_sql(backend: DbBackend) -> String {
        backend
            .build(&Schema::new(backend).create_table_from_entity(Entity))
            .to_string()
    }

    #[test]
    fn mysql_expiry_column_is_a_datetime() {
        let sql = create_table_sql(DbBackend::MySql);

        assert!(sql.contains("`expiry_date` datetime NOT NULL"), "{sql}");
        assert!(!sql.contains("timestamp"), "{sql}");
    }

    #[test]
    fn postgres_expiry_column_has_no_time_zone() {
        let sql = create_table_sql(DbBackend::Postgres);

        assert!(sql.contains(r#""expiry_date" timestamp without time zone NOT NULL"#), "{sql}");
    }
}
