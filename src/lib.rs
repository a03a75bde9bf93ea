pub mod api;
pub mod canonical;
pub mod config;
pub mod emit;
pub mod error;
pub mod format;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod rules;
pub mod source;
pub mod store;
pub mod utils;

pub use api::{analyze, Analysis};
pub use model::{FlatId, Layer, Variable};
