//! Pure helpers consumed by page-rendering code.

pub mod date;
pub mod route;
pub mod sort;
pub mod url;
