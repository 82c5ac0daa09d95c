pub mod cache;
pub mod dto;
pub mod use_cases;
