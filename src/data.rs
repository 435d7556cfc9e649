pub mod database;
pub mod migrations;
pub mod models;
pub mod repos;
