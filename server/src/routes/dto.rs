use chrono::{DateTime, FixedOffset};
use entity::{employee, franchise};
use platform_db::{employees::EmployeeWithFranchise, franchises::FranchiseWithEmployees};
use rust_decimal::Decimal;
use serde::Serialize;

type Timestamp = DateTime<FixedOffset>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseBody {
    pub id: i32,
    pub nome: String,
    pub cidade: String,
    pub endereco: String,
    pub telefone: String,
    pub cep: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<franchise::Model> for FranchiseBody {
    fn from(model: franchise::Model) -> Self {
        Self {
            id: model.id,
            nome: model.name,
            cidade: model.city,
            endereco: model.address,
            telefone: model.phone,
            cep: model.cep,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBody {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub cargo: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salario: Decimal,
    pub franquia_id: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<employee::Model> for EmployeeBody {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            nome: model.name,
            email: model.email,
            cargo: model.job_title,
            salario: model.salary,
            franquia_id: model.franchise_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeCount {
    pub funcionarios: usize,
}

/// A franchise with its employees and the `_count` summary.
#[derive(Debug, Serialize)]
pub struct FranchiseResponse {
    #[serde(flatten)]
    pub franchise: FranchiseBody,
    pub funcionarios: Vec<EmployeeBody>,
    #[serde(rename = "_count")]
    pub count: EmployeeCount,
}

impl From<FranchiseWithEmployees> for FranchiseResponse {
    fn from(row: FranchiseWithEmployees) -> Self {
        Self::new(row.franchise, row.employees)
    }
}

impl FranchiseResponse {
    pub fn new(franchise: franchise::Model, employees: Vec<employee::Model>) -> Self {
        Self {
            franchise: franchise.into(),
            count: EmployeeCount {
                funcionarios: employees.len(),
            },
            funcionarios: employees.into_iter().map(EmployeeBody::from).collect(),
        }
    }
}

/// An employee with its franchise, or `null` when unassigned.
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    #[serde(flatten)]
    pub employee: EmployeeBody,
    pub franquia: Option<FranchiseBody>,
}

impl From<EmployeeWithFranchise> for EmployeeResponse {
    fn from(row: EmployeeWithFranchise) -> Self {
        Self {
            employee: row.employee.into(),
            franquia: row.franchise.map(FranchiseBody::from),
        }
    }
}
