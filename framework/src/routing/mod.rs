mod group;
mod router;

pub use group::{GroupBuilder, GroupRouter};
pub use router::{BoxedHandler, RouteBuilder, RouteMatch, Router};
