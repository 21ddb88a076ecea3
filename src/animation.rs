pub mod ease;
pub mod frame;
pub mod signals;
pub mod spring;
