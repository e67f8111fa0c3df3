pub mod errors;
pub mod types;

pub use errors::{CoordinatorError, DocpaneError, SurfaceError};
pub use types::{DocumentUri, LineRange, Placement, SurfaceId};

pub type Result<T> = std::result::Result<T, DocpaneError>;
