pub mod activities;
pub mod health;
pub mod notifications;
pub mod profiles;
