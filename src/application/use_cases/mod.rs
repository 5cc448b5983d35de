pub mod chat;
pub mod generate_cases;
pub mod prompts;
