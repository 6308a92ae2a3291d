//! # media-handlers
//!
//! Built-in [`linkpost_core::Handler`] implementations and the static registry that builds the
//! configured handler list at startup.

pub mod direct;
pub mod opengraph;
pub mod registry;

pub use direct::{DirectMediaConfig, DirectMediaHandler};
pub use opengraph::{OpenGraphConfig, OpenGraphHandler, PageMeta};
pub use registry::{available, build_handlers, create_handler, HandlerSettings};
