pub mod use_cases;

pub use use_cases::chat::ChatUseCase;
pub use use_cases::generate_cases::GenerateCasesUseCase;
