pub mod chain;
pub mod combine;
pub mod pack;
pub mod validate;

pub use chain::*;
pub use combine::*;
pub use pack::*;
pub use validate::*;
