pub mod incident;
pub mod person;
pub mod timestamp;

pub use incident::Incident;
pub use person::Person;
