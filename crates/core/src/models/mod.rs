pub mod category;
pub mod currency;
pub mod ledger;
pub mod period;
pub mod settings;
pub mod spending;
pub mod stat;
pub mod user;
