pub mod health;
pub mod observations;
pub mod planning;
pub mod reports;
