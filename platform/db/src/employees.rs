use chrono::Utc;
use entity::{employee, franchise};
use products_hr::EmployeeFields;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::DbPool;

#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeWithFranchise {
    pub employee: employee::Model,
    pub franchise: Option<franchise::Model>,
}

impl From<(employee::Model, Option<franchise::Model>)> for EmployeeWithFranchise {
    fn from((employee, franchise): (employee::Model, Option<franchise::Model>)) -> Self {
        Self {
            employee,
            franchise,
        }
    }
}

/// All employees, newest first, each with its franchise when it has one.
pub async fn list(db: &DbPool) -> Result<Vec<EmployeeWithFranchise>, DbErr> {
    let rows = employee::Entity::find()
        .find_also_related(franchise::Entity)
        .order_by_desc(employee::Column::CreatedAt)
        .order_by_desc(employee::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(EmployeeWithFranchise::from).collect())
}

pub async fn find(db: &DbPool, id: i32) -> Result<Option<EmployeeWithFranchise>, DbErr> {
    let row = employee::Entity::find_by_id(id)
        .find_also_related(franchise::Entity)
        .one(db)
        .await?;
    Ok(row.map(EmployeeWithFranchise::from))
}

pub async fn exists(db: &DbPool, id: i32) -> Result<bool, DbErr> {
    Ok(employee::Entity::find_by_id(id).one(db).await?.is_some())
}

/// Whether `email` belongs to an employee other than `except`.
pub async fn email_taken(db: &DbPool, email: &str, except: Option<i32>) -> Result<bool, DbErr> {
    let mut query = employee::Entity::find().filter(employee::Column::Email.eq(email));
    if let Some(id) = except {
        query = query.filter(employee::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

pub async fn count(db: &DbPool) -> Result<u64, DbErr> {
    employee::Entity::find().count(db).await
}

pub async fn create(db: &DbPool, fields: EmployeeFields) -> Result<EmployeeWithFranchise, DbErr> {
    let now = Utc::now();
    let model = employee::ActiveModel {
        name: Set(fields.name),
        email: Set(fields.email),
        job_title: Set(fields.job_title),
        salary: Set(fields.salary),
        franchise_id: Set(fields.franchise_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    attach_franchise(db, model).await
}

/// Overwrite every editable column. `None` when the employee does not exist.
pub async fn update(
    db: &DbPool,
    id: i32,
    fields: EmployeeFields,
) -> Result<Option<EmployeeWithFranchise>, DbErr> {
    let Some(existing) = employee::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut active: employee::ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.email = Set(fields.email);
    active.job_title = Set(fields.job_title);
    active.salary = Set(fields.salary);
    active.franchise_id = Set(fields.franchise_id);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(db).await?;
    attach_franchise(db, model).await.map(Some)
}

/// `false` when there was nothing to delete.
pub async fn delete(db: &DbPool, id: i32) -> Result<bool, DbErr> {
    let result = employee::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

async fn attach_franchise(
    db: &DbPool,
    employee: employee::Model,
) -> Result<EmployeeWithFranchise, DbErr> {
    let franchise = match employee.franchise_id {
        Some(franchise_id) => franchise::Entity::find_by_id(franchise_id).one(db).await?,
        None => None,
    };
    Ok(EmployeeWithFranchise {
        employee,
        franchise,
    })
}
