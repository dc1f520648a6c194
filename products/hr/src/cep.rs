//! Brazilian postal codes (CEP).

use thiserror::Error;

pub const CEP_DIGITS: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CepError {
    #[error("O campo CEP deve conter 8 dígitos")]
    InvalidLength,
}

/// Strip punctuation and require exactly eight digits: `01001-000` → `01001000`.
pub fn normalize_cep(raw: &str) -> Result<String, CepError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != CEP_DIGITS {
        return Err(CepError::InvalidLength);
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting() {
        assert_eq!(normalize_cep("01001-000").unwrap(), "01001000");
        assert_eq!(normalize_cep(" 01.001 000 ").unwrap(), "01001000");
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(normalize_cep("1234"), Err(CepError::InvalidLength));
        assert_eq!(normalize_cep("123456789"), Err(CepError::InvalidLength));
        assert_eq!(normalize_cep("abcdefgh"), Err(CepError::InvalidLength));
    }
}
