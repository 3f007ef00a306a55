//! Date and time operators

pub mod year;

pub use year::YearFun;
