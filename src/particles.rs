pub mod cpu;
pub mod driver;
pub mod field;
pub mod surface;
