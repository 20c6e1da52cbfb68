mod connector;

pub use connector::{rewrite_for_dialect, Connector};
