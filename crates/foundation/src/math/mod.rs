pub mod affine;
pub mod vec;

pub use affine::*;
pub use vec::*;
