use async_trait::async_trait;
use city_ops_sdk::{Page, PageRequest, User, UserFilter};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::{UserCredentials, UsersRepository};
use crate::infra::storage::db::{db_err, fetch_page, unique_err};
use crate::infra::storage::entity::user::{Column, Entity as UserEntity};
use crate::infra::storage::mapper::user_active;

/// SeaORM-backed `UsersRepository`.
#[derive(Clone)]
pub struct SeaUsersRepository {
    db: DatabaseConnection,
}

impl SeaUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for SeaUsersRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(User::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let cond = Condition::all()
            .add_option(filter.role.map(|r| Column::Role.eq(r.as_str())))
            .add_option(filter.tenant_id.map(|t| Column::TenantId.eq(t)));
        let (rows, total) =
            fetch_page(&self.db, UserEntity::find().filter(cond), Column::Id, page).await?;
        let items = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, user: User, password_hash: String) -> Result<User, DomainError> {
        user_active(&user, Some(password_hash))
            .insert(&self.db)
            .await
            .map_err(unique_err("email"))?;
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        user_active(&user, None)
            .update(&self.db)
            .await
            .map_err(unique_err("email"))?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let Some(model) = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let password_hash = model.password_hash.clone();
        Ok(Some(UserCredentials {
            user: User::try_from(model)?,
            password_hash,
        }))
    }

    async fn touch_last_login(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError> {
        UserEntity::update_many()
            .col_expr(Column::LastLogin, Expr::value(at))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
