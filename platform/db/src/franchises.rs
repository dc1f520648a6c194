use chrono::Utc;
use entity::{employee, franchise};
use products_hr::FranchiseFields;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, LoaderTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::DbPool;

#[derive(Clone, Debug, PartialEq)]
pub struct FranchiseWithEmployees {
    pub franchise: franchise::Model,
    pub employees: Vec<employee::Model>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FranchiseDeletion {
    Deleted,
    NotFound,
    HasEmployees(u64),
}

/// All franchises, newest first, each with its employees in id order.
pub async fn list(db: &DbPool) -> Result<Vec<FranchiseWithEmployees>, DbErr> {
    let franchises = franchise::Entity::find()
        .order_by_desc(franchise::Column::CreatedAt)
        .order_by_desc(franchise::Column::Id)
        .all(db)
        .await?;
    let employees = franchises
        .load_many(
            employee::Entity::find().order_by_asc(employee::Column::Id),
            db,
        )
        .await?;
    Ok(franchises
        .into_iter()
        .zip(employees)
        .map(|(franchise, employees)| FranchiseWithEmployees {
            franchise,
            employees,
        })
        .collect())
}

pub async fn find(db: &DbPool, id: i32) -> Result<Option<FranchiseWithEmployees>, DbErr> {
    let Some(franchise) = find_model(db, id).await? else {
        return Ok(None);
    };
    let employees = franchise
        .find_related(employee::Entity)
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    Ok(Some(FranchiseWithEmployees {
        franchise,
        employees,
    }))
}

pub async fn find_model(db: &DbPool, id: i32) -> Result<Option<franchise::Model>, DbErr> {
    franchise::Entity::find_by_id(id).one(db).await
}

pub async fn exists(db: &DbPool, id: i32) -> Result<bool, DbErr> {
    Ok(find_model(db, id).await?.is_some())
}

pub async fn employee_count(db: &DbPool, id: i32) -> Result<u64, DbErr> {
    employee::Entity::find()
        .filter(employee::Column::FranchiseId.eq(id))
        .count(db)
        .await
}

pub async fn count(db: &DbPool) -> Result<u64, DbErr> {
    franchise::Entity::find().count(db).await
}

pub async fn create(db: &DbPool, fields: FranchiseFields) -> Result<franchise::Model, DbErr> {
    let now = Utc::now();
    franchise::ActiveModel {
        name: Set(fields.name),
        city: Set(fields.city),
        address: Set(fields.address),
        phone: Set(fields.phone),
        cep: Set(fields.cep),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Overwrite every editable column. `None` when the franchise does not exist.
pub async fn update(
    db: &DbPool,
    id: i32,
    fields: FranchiseFields,
) -> Result<Option<FranchiseWithEmployees>, DbErr> {
    let Some(existing) = find_model(db, id).await? else {
        return Ok(None);
    };
    let mut active: franchise::ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.city = Set(fields.city);
    active.address = Set(fields.address);
    active.phone = Set(fields.phone);
    active.cep = Set(fields.cep);
    active.updated_at = Set(Utc::now().into());
    active.update(db).await?;
    find(db, id).await
}

/// Delete a franchise unless employees still reference it.
pub async fn delete(db: &DbPool, id: i32) -> Result<FranchiseDeletion, DbErr> {
    if !exists(db, id).await? {
        return Ok(FranchiseDeletion::NotFound);
    }
    let employees = employee_count(db, id).await?;
    if employees > 0 {
        return Ok(FranchiseDeletion::HasEmployees(employees));
    }
    franchise::Entity::delete_by_id(id).exec(db).await?;
    Ok(FranchiseDeletion::Deleted)
}
