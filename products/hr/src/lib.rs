//! Franchise and employee domain shared by the storage and HTTP layers.

pub mod cep;
pub mod dashboard;
pub mod money;
pub mod validation;

pub use cep::{CepError, normalize_cep};
pub use dashboard::{
    DashboardError, DashboardSnapshot, DashboardSource, EmployeeRecord, FranchiseRecord,
    OwnedEmployee, compute_dashboard, load_dashboard,
};
pub use money::{MoneyInput, parse_money, round_money, sum_money};
pub use validation::{EmployeeFields, EmployeeForm, FranchiseFields, FranchiseForm, ValidationError};
