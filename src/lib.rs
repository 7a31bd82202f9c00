pub mod cache;
pub mod meta;
pub mod search;
pub mod service;

pub use search::JavadocSearch;
pub use service::JavadocService;
