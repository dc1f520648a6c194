//! Demo data for a fresh database.

use anyhow::{Context, Result};
use platform_db::{Store, employees, franchises};
use products_hr::{EmployeeFields, FranchiseFields};
use rust_decimal::Decimal;
use tracing::info;

struct DemoFranchise {
    name: &'static str,
    city: &'static str,
    address: &'static str,
    phone: &'static str,
    cep: &'static str,
}

struct DemoEmployee {
    name: &'static str,
    email: &'static str,
    job_title: &'static str,
    salary_cents: i64,
    franchise: Option<usize>,
}

const FRANCHISES: &[DemoFranchise] = &[
    DemoFranchise {
        name: "Franquia Centro",
        city: "São Paulo",
        address: "Av. Paulista, 1000",
        phone: "(11) 3000-1000",
        cep: "01310100",
    },
    DemoFranchise {
        name: "Franquia Copacabana",
        city: "Rio de Janeiro",
        address: "Av. Atlântica, 500",
        phone: "(21) 3000-2000",
        cep: "22010000",
    },
    DemoFranchise {
        name: "Franquia Savassi",
        city: "Belo Horizonte",
        address: "Rua Pernambuco, 300",
        phone: "(31) 3000-3000",
        cep: "30130150",
    },
];

const EMPLOYEES: &[DemoEmployee] = &[
    DemoEmployee {
        name: "Ana Souza",
        email: "ana.souza@example.com",
        job_title: "Gerente",
        salary_cents: 750_000,
        franchise: Some(0),
    },
    DemoEmployee {
        name: "Bruno Lima",
        email: "bruno.lima@example.com",
        job_title: "Vendedor",
        salary_cents: 250_000,
        franchise: Some(0),
    },
    DemoEmployee {
        name: "Carla Mendes",
        email: "carla.mendes@example.com",
        job_title: "Vendedor",
        salary_cents: 280_000,
        franchise: Some(1),
    },
    DemoEmployee {
        name: "Diego Rocha",
        email: "diego.rocha@example.com",
        job_title: "Caixa",
        salary_cents: 180_000,
        franchise: Some(1),
    },
    DemoEmployee {
        name: "Elisa Martins",
        email: "elisa.martins@example.com",
        job_title: "Analista",
        salary_cents: 520_000,
        franchise: None,
    },
];

#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { franchises: usize, employees: usize },
    Skipped,
}

/// Insert the demo set unless any franchise or employee already exists.
pub async fn seed_demo_data(store: &Store) -> Result<SeedOutcome> {
    let pool = store.pool();
    let existing = franchises::count(pool).await? + employees::count(pool).await?;
    if existing > 0 {
        info!(existing, "database already has data; skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let mut franchise_ids = Vec::with_capacity(FRANCHISES.len());
    for demo in FRANCHISES {
        let model = franchises::create(
            pool,
            FranchiseFields {
                name: demo.name.to_string(),
                city: demo.city.to_string(),
                address: demo.address.to_string(),
                phone: demo.phone.to_string(),
                cep: Some(demo.cep.to_string()),
            },
        )
        .await
        .with_context(|| format!("failed to seed franchise {}", demo.name))?;
        franchise_ids.push(model.id);
    }

    for demo in EMPLOYEES {
        employees::create(
            pool,
            EmployeeFields {
                name: demo.name.to_string(),
                email: demo.email.to_string(),
                job_title: demo.job_title.to_string(),
                salary: Decimal::new(demo.salary_cents, 2),
                franchise_id: demo.franchise.and_then(|idx| franchise_ids.get(idx).copied()),
            },
        )
        .await
        .with_context(|| format!("failed to seed employee {}", demo.email))?;
    }

    info!(
        franchises = FRANCHISES.len(),
        employees = EMPLOYEES.len(),
        "demo data seeded"
    );
    Ok(SeedOutcome::Seeded {
        franchises: FRANCHISES.len(),
        employees: EMPLOYEES.len(),
    })
}
