pub mod email;
pub mod form;
pub mod transport;
