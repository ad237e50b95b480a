// Data structures

mod error;
pub use error::*;

mod environment;
pub use environment::*;

mod deployment;
pub use deployment::*;

// Services

mod setup;
pub use setup::*;

mod tool;
pub use tool::*;
