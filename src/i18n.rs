pub mod locale;
pub mod preference;
pub mod table;
