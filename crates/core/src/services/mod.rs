pub mod access_service;
pub mod currency_service;
pub mod spending_service;
pub mod stat_service;
