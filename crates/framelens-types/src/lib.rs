pub mod error;
pub mod field;
pub mod level;
pub mod mode;
pub mod renderable;
pub mod sampling;
pub mod value;

pub use error::{Error, Result};
pub use field::*;
pub use level::*;
pub use mode::*;
pub use renderable::*;
pub use sampling::*;
pub use value::*;
