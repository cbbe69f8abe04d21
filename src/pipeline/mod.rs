//! Pipeline module - preprocessing stages, cluster model and artifact I/O

pub mod aggregate;
pub mod artifact;
pub mod error;
pub mod imputer;
pub mod loader;
pub mod model;
pub mod reconcile;
pub mod record;
pub mod schema;
pub mod segmenter;
pub mod stage;
pub mod stats;

pub use aggregate::*;
pub use artifact::*;
pub use error::*;
pub use imputer::*;
pub use loader::*;
pub use model::*;
pub use reconcile::*;
pub use record::*;
pub use schema::*;
pub use segmenter::*;
pub use stage::*;
