//! Storage module - the document store abstraction and its local backends.

mod local;
mod memory;
mod repository;
mod storage_traits;

pub use local::LocalDocumentStore;
pub use memory::InMemoryDocumentStore;
pub use repository::DocumentRepository;
pub use storage_traits::DocumentStore;
