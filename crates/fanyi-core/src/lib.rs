pub mod builtin;
pub mod dictionary;
pub mod settings;
pub mod store;
pub mod suggest;
pub mod wire;
