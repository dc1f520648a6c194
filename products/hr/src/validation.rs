//! Request payloads for franchises and employees and their validation.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cep::{CepError, normalize_cep},
    money::{MONEY_SCALE, MoneyInput},
};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_SHORT_TEXT_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_ADDRESS_LEN: usize = 500;

/// Largest salary the `numeric(12, 2)` column holds.
pub const MAX_SALARY: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todos os campos são obrigatórios")]
    MissingFields,
    #[error("O campo {field} deve ter no máximo {max} caracteres")]
    TooLong { field: &'static str, max: usize },
    #[error("Email inválido")]
    InvalidEmail,
    #[error("Salário inválido")]
    InvalidSalary,
    #[error("Franquia inválida")]
    InvalidFranchiseId,
    #[error(transparent)]
    Cep(#[from] CepError),
}

/// Body of `POST`/`PUT /api/franquias`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FranchiseForm {
    pub nome: Option<String>,
    pub cidade: Option<String>,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub cep: Option<String>,
}

/// Validated franchise columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FranchiseFields {
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub cep: Option<String>,
}

impl FranchiseForm {
    pub fn validate(&self) -> Result<FranchiseFields, ValidationError> {
        let (Some(name), Some(city), Some(address), Some(phone)) = (
            present(&self.nome),
            present(&self.cidade),
            present(&self.endereco),
            present(&self.telefone),
        ) else {
            return Err(ValidationError::MissingFields);
        };
        check_len("nome", name, MAX_NAME_LEN)?;
        check_len("cidade", city, MAX_SHORT_TEXT_LEN)?;
        check_len("endereco", address, MAX_ADDRESS_LEN)?;
        check_len("telefone", phone, MAX_SHORT_TEXT_LEN)?;
        let cep = present(&self.cep).map(normalize_cep).transpose()?;

        Ok(FranchiseFields {
            name: name.to_string(),
            city: city.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            cep,
        })
    }
}

/// A franchise reference as clients send it: `3` or `"3"`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    fn resolve(&self) -> Result<Option<i32>, ValidationError> {
        match self {
            IdInput::Number(value) => i32::try_from(*value)
                .map(Some)
                .map_err(|_| ValidationError::InvalidFranchiseId),
            IdInput::Text(raw) if raw.trim().is_empty() => Ok(None),
            IdInput::Text(raw) => raw
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| ValidationError::InvalidFranchiseId),
        }
    }
}

/// Body of `POST`/`PUT /api/funcionarios`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeForm {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub cargo: Option<String>,
    pub salario: MoneyInput,
    #[serde(rename = "franquiaId")]
    pub franquia_id: Option<IdInput>,
}

/// Validated employee columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub salary: Decimal,
    pub franchise_id: Option<i32>,
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<EmployeeFields, ValidationError> {
        let (Some(name), Some(email), Some(job_title)) = (
            present(&self.nome),
            present(&self.email),
            present(&self.cargo),
        ) else {
            return Err(ValidationError::MissingFields);
        };
        if self.salario.is_missing() {
            return Err(ValidationError::MissingFields);
        }
        check_len("nome", name, MAX_NAME_LEN)?;
        check_len("email", email, MAX_EMAIL_LEN)?;
        check_len("cargo", job_title, MAX_SHORT_TEXT_LEN)?;
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let salary = self
            .salario
            .to_decimal()
            .filter(|value| !value.is_sign_negative())
            .ok_or(ValidationError::InvalidSalary)?;
        if salary.scale() > MONEY_SCALE || salary > MAX_SALARY {
            return Err(ValidationError::InvalidSalary);
        }

        let franchise_id = match &self.franquia_id {
            Some(raw) => raw.resolve()?,
            None => None,
        };

        Ok(EmployeeFields {
            name: name.to_string(),
            email: email.to_string(),
            job_title: job_title.to_string(),
            salary,
            franchise_id,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn franchise_form() -> FranchiseForm {
        serde_json::from_value(json!({
            "nome": "Loja Centro",
            "cidade": "São Paulo",
            "endereco": "Rua A, 10",
            "telefone": "11 5555-0000",
            "cep": "01001-000"
        }))
        .unwrap()
    }

    #[test]
    fn franchise_form_is_trimmed_and_cep_normalized() {
        let mut form = franchise_form();
        form.nome = Some("  Loja Centro ".into());
        let fields = form.validate().unwrap();
        assert_eq!(fields.name, "Loja Centro");
        assert_eq!(fields.cep.as_deref(), Some("01001000"));
    }

    #[test]
    fn franchise_requires_all_fields() {
        let mut form = franchise_form();
        form.telefone = Some("   ".into());
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));

        let empty: FranchiseForm = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn franchise_cep_is_optional_but_checked() {
        let mut form = franchise_form();
        form.cep = None;
        assert_eq!(form.validate().unwrap().cep, None);

        form.cep = Some("123".into());
        assert_eq!(
            form.validate(),
            Err(ValidationError::Cep(CepError::InvalidLength))
        );
    }

    #[test]
    fn franchise_name_length_is_bounded() {
        let mut form = franchise_form();
        form.nome = Some("x".repeat(MAX_NAME_LEN + 1));
        assert_eq!(
            form.validate(),
            Err(ValidationError::TooLong {
                field: "nome",
                max: MAX_NAME_LEN
            })
        );
    }

    #[test]
    fn employee_accepts_string_salary_and_id() {
        let form: EmployeeForm = serde_json::from_value(json!({
            "nome": "Ana",
            "email": "ana@example.com",
            "cargo": "Gerente",
            "salario": "3500.50",
            "franquiaId": "7"
        }))
        .unwrap();
        let fields = form.validate().unwrap();
        assert_eq!(fields.salary, Decimal::new(350050, 2));
        assert_eq!(fields.franchise_id, Some(7));
    }

    #[test]
    fn employee_without_franchise_is_allowed() {
        let form: EmployeeForm = serde_json::from_value(json!({
            "nome": "Bia",
            "email": "bia@example.com",
            "cargo": "Caixa",
            "salario": 0
        }))
        .unwrap();
        let fields = form.validate().unwrap();
        assert_eq!(fields.salary, Decimal::ZERO);
        assert_eq!(fields.franchise_id, None);
    }

    #[test]
    fn employee_rejects_bad_salary() {
        for salary in [
            json!("abc"),
            json!(-10),
            json!("12.345"),
            json!(10_000_000_000u64),
            json!("9999999999.991"),
        ] {
            let form: EmployeeForm = serde_json::from_value(json!({
                "nome": "Caio",
                "email": "caio@example.com",
                "cargo": "Caixa",
                "salario": salary
            }))
            .unwrap();
            assert_eq!(form.validate(), Err(ValidationError::InvalidSalary));
        }
    }

    #[test]
    fn employee_accepts_salary_at_column_limit() {
        assert_eq!(MAX_SALARY.to_string(), "9999999999.99");
        let form: EmployeeForm = serde_json::from_value(json!({
            "nome": "Caio",
            "email": "caio@example.com",
            "cargo": "Diretor",
            "salario": "9999999999.99"
        }))
        .unwrap();
        assert_eq!(form.validate().unwrap().salary, MAX_SALARY);
    }

    #[test]
    fn employee_requires_salary_and_valid_email() {
        let missing: EmployeeForm = serde_json::from_value(json!({
            "nome": "Caio",
            "email": "caio@example.com",
            "cargo": "Caixa"
        }))
        .unwrap();
        assert_eq!(missing.validate(), Err(ValidationError::MissingFields));

        let bad_email: EmployeeForm = serde_json::from_value(json!({
            "nome": "Caio",
            "email": "caio.example.com",
            "cargo": "Caixa",
            "salario": 100
        }))
        .unwrap();
        assert_eq!(bad_email.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn employee_rejects_non_numeric_franchise_id() {
        let form: EmployeeForm = serde_json::from_value(json!({
            "nome": "Caio",
            "email": "caio@example.com",
            "cargo": "Caixa",
            "salario": 100,
            "franquiaId": "abc"
        }))
        .unwrap();
        assert_eq!(form.validate(), Err(ValidationError::InvalidFranchiseId));
    }
}
