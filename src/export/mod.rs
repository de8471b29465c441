//! Model persistence
//!
//! Fitted forests are written as a single artifact file, either bincode
//! (default) or JSON depending on the extension.

mod serializer;

pub use serializer::{load_model, save_model, ModelArtifact, ModelMetadata, SerializationFormat};
