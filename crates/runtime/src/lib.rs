pub mod budget;
pub mod dispatch;
pub mod frame;
pub mod gate;
pub mod host;
pub mod virtual_host;

pub use budget::*;
pub use dispatch::*;
pub use frame::*;
pub use gate::*;
pub use host::*;
pub use virtual_host::*;
