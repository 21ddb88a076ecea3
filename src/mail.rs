pub mod dispatch;
pub mod payload;
pub mod provider;
pub mod templates;
