pub mod origin;

pub use origin::{OriginAllowList, origin_guard};
