mod context;
mod key;
mod store;

pub use context::DialogContext;
pub use key::SessionKey;
pub use store::SessionStore;
