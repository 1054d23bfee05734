pub mod dashboard;
pub mod document;
pub mod employee;
pub mod leave;
