pub mod client;
pub mod form;
pub mod schema;
pub mod toast;
pub mod view;

pub use client::*;
pub use form::*;
pub use schema::*;
pub use toast::*;
pub use view::*;
