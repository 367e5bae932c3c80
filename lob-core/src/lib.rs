pub mod engine;
pub mod exchange;
pub mod sim;

pub mod prelude {
    pub use crate::engine::prelude::*;
    pub use crate::exchange::*;
}
