pub mod bank;
pub mod types;

pub use bank::{load_bank, load_question, save_bank, BankError, QuestionBank};
pub use types::Question;
