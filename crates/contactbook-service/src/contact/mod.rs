//! Contact queries, mutations, search and the birthday window.

pub mod birthday;
pub mod search;
pub mod service;

pub use birthday::BirthdayService;
pub use search::SearchService;
pub use service::ContactService;
