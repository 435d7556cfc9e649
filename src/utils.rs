pub mod logger;
pub mod mappers;
pub mod money;
pub mod validation;
