mod command;
pub mod contact;

pub use command::*;
pub use contact::*;
