//! Feeds the dashboard aggregator from the database.

use async_trait::async_trait;
use products_hr::{
    DashboardError, DashboardSource, EmployeeRecord, FranchiseRecord, OwnedEmployee,
};
use tracing::debug;

use crate::{
    Store,
    employees::{self, EmployeeWithFranchise},
    franchises::{self, FranchiseWithEmployees},
};

#[async_trait]
impl DashboardSource for Store {
    async fn list_franchises_with_employees(
        &self,
    ) -> Result<Vec<FranchiseRecord>, DashboardError> {
        let rows = franchises::list(self.pool())
            .await
            .map_err(DashboardError::unavailable)?;
        debug!(franchises = rows.len(), "loaded franchises for dashboard");
        Ok(rows.into_iter().map(franchise_record).collect())
    }

    async fn list_employees_with_franchise_name(
        &self,
    ) -> Result<Vec<EmployeeRecord>, DashboardError> {
        let rows = employees::list(self.pool())
            .await
            .map_err(DashboardError::unavailable)?;
        debug!(employees = rows.len(), "loaded employees for dashboard");
        Ok(rows.into_iter().map(employee_record).collect())
    }
}

fn franchise_record(row: FranchiseWithEmployees) -> FranchiseRecord {
    FranchiseRecord {
        id: row.franchise.id,
        name: row.franchise.name,
        city: row.franchise.city,
        created_at: row.franchise.created_at,
        employees: row
            .employees
            .into_iter()
            .map(|employee| OwnedEmployee {
                salary: employee.salary.into(),
            })
            .collect(),
    }
}

fn employee_record(row: EmployeeWithFranchise) -> EmployeeRecord {
    EmployeeRecord {
        id: row.employee.id,
        name: row.employee.name,
        job_title: row.employee.job_title,
        salary: row.employee.salary.into(),
        franchise_name: row.franchise.map(|franchise| franchise.name),
        created_at: row.employee.created_at,
    }
}
