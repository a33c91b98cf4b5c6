pub mod contribution;
pub mod event;
pub mod person;

pub use contribution::*;
pub use event::*;
pub use person::*;
