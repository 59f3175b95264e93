pub mod decode;
pub mod encode;
pub mod info;
pub mod keygen;
pub mod selftest;

pub use decode::*;
pub use encode::*;
pub use info::*;
pub use keygen::*;
pub use selftest::*;
