//! Dashboard aggregation over franchises and their employees.
//!
//! [`compute_dashboard`] is a pure function of its two inputs. Both
//! collections are expected newest first; the "latest" lists simply take the
//! head of each. Every ranking uses a stable sort, so equal counts keep the
//! order in which their key was first seen.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::money::{MoneyInput, parse_money, round_money, sum_money};

pub const RECENT_LIMIT: usize = 5;
pub const TOP_FRANCHISES_LIMIT: usize = 5;
pub const NO_FRANCHISE_LABEL: &str = "Sem franquia";

pub type Timestamp = DateTime<FixedOffset>;

struct SalaryBand {
    label: &'static str,
    upper: Option<i64>,
}

/// Upper bounds are inclusive; the last band is open-ended.
const SALARY_BANDS: [SalaryBand; 5] = [
    SalaryBand {
        label: "Até R$ 2.000",
        upper: Some(2_000),
    },
    SalaryBand {
        label: "R$ 2.001 - R$ 4.000",
        upper: Some(4_000),
    },
    SalaryBand {
        label: "R$ 4.001 - R$ 6.000",
        upper: Some(6_000),
    },
    SalaryBand {
        label: "R$ 6.001 - R$ 8.000",
        upper: Some(8_000),
    },
    SalaryBand {
        label: "Acima de R$ 8.000",
        upper: None,
    },
];

/// A franchise together with the employees it owns.
#[derive(Clone, Debug)]
pub struct FranchiseRecord {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub created_at: Timestamp,
    pub employees: Vec<OwnedEmployee>,
}

#[derive(Clone, Debug)]
pub struct OwnedEmployee {
    pub salary: MoneyInput,
}

/// An employee with the name of its franchise, if it has one.
#[derive(Clone, Debug)]
pub struct EmployeeRecord {
    pub id: i32,
    pub name: String,
    pub job_title: String,
    pub salary: MoneyInput,
    pub franchise_name: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    #[serde(rename = "totalFranquias")]
    pub total_franchises: usize,
    #[serde(rename = "totalFuncionarios")]
    pub total_employees: usize,
    #[serde(rename = "salarioMedio", with = "rust_decimal::serde::float")]
    pub average_salary: Decimal,
    #[serde(rename = "folhaTotal", with = "rust_decimal::serde::float")]
    pub total_payroll: Decimal,
    #[serde(rename = "franquiasPorCidade")]
    pub franchises_by_city: Vec<CityCount>,
    #[serde(rename = "funcionariosPorCargo")]
    pub employees_by_job_title: Vec<JobTitleCount>,
    #[serde(rename = "faixasSalariais")]
    pub salary_bands: Vec<SalaryBandCount>,
    #[serde(rename = "topFranquias")]
    pub top_franchises: Vec<FranchiseRanking>,
    #[serde(rename = "ultimasFranquias")]
    pub latest_franchises: Vec<RecentFranchise>,
    #[serde(rename = "ultimosFuncionarios")]
    pub latest_employees: Vec<RecentEmployee>,
    #[serde(rename = "franquiasSemFuncionarios")]
    pub franchises_without_employees: Vec<IdleFranchise>,
    #[serde(rename = "funcionariosSemFranquia")]
    pub employees_without_franchise: Vec<UnassignedEmployee>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CityCount {
    #[serde(rename = "cidade")]
    pub city: String,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JobTitleCount {
    #[serde(rename = "cargo")]
    pub job_title: String,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SalaryBandCount {
    #[serde(rename = "faixa")]
    pub label: &'static str,
    #[serde(rename = "quantidade")]
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FranchiseRanking {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "totalFuncionarios")]
    pub employee_count: usize,
    #[serde(rename = "folhaSalarial", with = "rust_decimal::serde::float")]
    pub payroll: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentFranchise {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "totalFuncionarios")]
    pub employee_count: usize,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentEmployee {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "salario", with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    #[serde(rename = "franquia")]
    pub franchise_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdleFranchise {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnassignedEmployee {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "salario", with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

pub fn compute_dashboard(
    franchises: &[FranchiseRecord],
    employees: &[EmployeeRecord],
) -> DashboardSnapshot {
    let total_employees = employees.len();
    let salary_sum = sum_money(employees.iter().map(|e| parse_money(&e.salary)));
    let average_salary = if total_employees > 0 {
        round_money(salary_sum / Decimal::from(total_employees))
    } else {
        Decimal::ZERO
    };

    let franchises_by_city = count_by(franchises.iter().map(|f| f.city.as_str()))
        .into_iter()
        .map(|(city, total)| CityCount { city, total })
        .collect();
    let employees_by_job_title = count_by(employees.iter().map(|e| e.job_title.as_str()))
        .into_iter()
        .map(|(job_title, total)| JobTitleCount { job_title, total })
        .collect();

    let mut top_franchises: Vec<FranchiseRanking> = franchises
        .iter()
        .map(|f| FranchiseRanking {
            id: f.id,
            name: f.name.clone(),
            city: f.city.clone(),
            employee_count: f.employees.len(),
            payroll: round_money(sum_money(
                f.employees.iter().map(|e| parse_money(&e.salary)),
            )),
        })
        .collect();
    top_franchises.sort_by(|a, b| b.employee_count.cmp(&a.employee_count));
    top_franchises.truncate(TOP_FRANCHISES_LIMIT);

    let latest_franchises = franchises
        .iter()
        .take(RECENT_LIMIT)
        .map(|f| RecentFranchise {
            id: f.id,
            name: f.name.clone(),
            city: f.city.clone(),
            employee_count: f.employees.len(),
            created_at: f.created_at,
        })
        .collect();

    let latest_employees = employees
        .iter()
        .take(RECENT_LIMIT)
        .map(|e| RecentEmployee {
            id: e.id,
            name: e.name.clone(),
            job_title: e.job_title.clone(),
            salary: parse_money(&e.salary),
            franchise_name: e
                .franchise_name
                .clone()
                .unwrap_or_else(|| NO_FRANCHISE_LABEL.to_string()),
            created_at: e.created_at,
        })
        .collect();

    let franchises_without_employees = franchises
        .iter()
        .filter(|f| f.employees.is_empty())
        .map(|f| IdleFranchise {
            id: f.id,
            name: f.name.clone(),
            city: f.city.clone(),
            created_at: f.created_at,
        })
        .collect();

    let employees_without_franchise = employees
        .iter()
        .filter(|e| e.franchise_name.is_none())
        .map(|e| UnassignedEmployee {
            id: e.id,
            name: e.name.clone(),
            job_title: e.job_title.clone(),
            salary: parse_money(&e.salary),
            created_at: e.created_at,
        })
        .collect();

    DashboardSnapshot {
        total_franchises: franchises.len(),
        total_employees,
        average_salary,
        total_payroll: round_money(salary_sum),
        franchises_by_city,
        employees_by_job_title,
        salary_bands: salary_bands(employees),
        top_franchises,
        latest_franchises,
        latest_employees,
        franchises_without_employees,
        employees_without_franchise,
    }
}

/// Count occurrences per key, most frequent first, ties in first-seen order.
fn count_by<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match slots.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn salary_bands(employees: &[EmployeeRecord]) -> Vec<SalaryBandCount> {
    let mut counts = [0usize; SALARY_BANDS.len()];
    for employee in employees {
        counts[band_index(parse_money(&employee.salary))] += 1;
    }
    SALARY_BANDS
        .iter()
        .zip(counts)
        .map(|(band, count)| SalaryBandCount {
            label: band.label,
            count,
        })
        .collect()
}

fn band_index(salary: Decimal) -> usize {
    SALARY_BANDS
        .iter()
        .position(|band| band.upper.is_none_or(|upper| salary <= Decimal::from(upper)))
        .unwrap_or(SALARY_BANDS.len() - 1)
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard data unavailable")]
    DataUnavailable(#[source] anyhow::Error),
}

impl DashboardError {
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::DataUnavailable(err.into())
    }
}

/// Where the dashboard reads its two collections from.
///
/// Both lists must come back newest first.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn list_franchises_with_employees(
        &self,
    ) -> Result<Vec<FranchiseRecord>, DashboardError>;

    async fn list_employees_with_franchise_name(
        &self,
    ) -> Result<Vec<EmployeeRecord>, DashboardError>;
}

/// Load both collections and aggregate them. Fails as a whole if either load fails.
pub async fn load_dashboard<S>(source: &S) -> Result<DashboardSnapshot, DashboardError>
where
    S: DashboardSource + ?Sized,
{
    let franchises = source.list_franchises_with_employees().await?;
    let employees = source.list_employees_with_franchise_name().await?;
    Ok(compute_dashboard(&franchises, &employees))
}
