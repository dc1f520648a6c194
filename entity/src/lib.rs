pub mod employee;
pub mod franchise;
