// server/src/web/handlers/mod.rs

pub mod checkout_handlers;
pub mod health_handlers;
pub mod project_handlers;
pub mod reservation_handlers;
