pub mod error;
pub mod llm_config;
pub mod steps;
pub mod story;
pub mod test_case;
