pub mod file;
pub mod portfolio;
