pub mod cipher;
pub mod runner;
pub mod store;

pub use cipher::CipherError;
pub use runner::{Outcome, Runner};
pub use store::{EntryStore, StoreError};
