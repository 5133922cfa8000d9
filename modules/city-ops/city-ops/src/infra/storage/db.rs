use city_ops_sdk::PageRequest;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Select,
    SqlErr,
};

use crate::domain::error::DomainError;

pub fn db_err(e: DbErr) -> DomainError {
    DomainError::database(e.to_string())
}

/// Like [`db_err`], but a unique-index violation becomes a `Conflict` on `field`.
pub fn unique_err(field: &'static str) -> impl Fn(DbErr) -> DomainError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => DomainError::conflict(field, message),
        _ => db_err(e),
    }
}

/// A stored row that no longer decodes into its model.
pub(crate) fn corrupt(entity: &'static str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("corrupt {entity} row: {detail}"))
}

/// Counts the filtered rows, then fetches one slice ordered by `order`.
///
/// The two reads are not isolated from concurrent writers.
pub(crate) async fn fetch_page<E>(
    conn: &DatabaseConnection,
    select: Select<E>,
    order: E::Column,
    page: PageRequest,
) -> Result<(Vec<E::Model>, u64), DomainError>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let total = select.clone().count(conn).await.map_err(db_err)?;
    let rows = select
        .order_by_asc(order)
        .offset(page.skip())
        .limit(page.limit())
        .all(conn)
        .await
        .map_err(db_err)?;
    Ok((rows, total))
}
