pub mod config;
pub mod error;
pub mod id;
pub mod output;
pub mod receipt;
pub mod scoring;
pub mod server;
pub mod service;
pub mod store;

pub use error::{ReceiptError, ReceiptResult};
pub use receipt::{Item, Receipt};
pub use service::ReceiptService;
