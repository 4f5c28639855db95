pub mod incident;
pub mod person;
pub mod ranking;
pub mod shared;
