pub mod alert;
pub mod asset;
pub mod incident;
pub mod incident_asset;
pub mod recommendation;
pub mod tenant;
pub mod user;
