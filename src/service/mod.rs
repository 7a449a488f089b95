mod directory;
mod pagination;
mod reconcile;
mod service;

pub use directory::*;
pub use pagination::*;
pub use reconcile::*;
pub use service::*;
