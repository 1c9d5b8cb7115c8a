pub mod accounts;
pub mod passwords;

pub use accounts::AccountService;
