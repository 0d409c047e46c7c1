pub mod db;
pub mod errors;
pub mod guard;
pub mod helpers;
pub mod query_params;
pub mod toggle;
