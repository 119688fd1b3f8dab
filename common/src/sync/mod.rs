pub mod flag;
pub use flag::RequestFlag;
