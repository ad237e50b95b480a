pub mod utils;

mod deploy_layout;
pub use deploy_layout::*;

mod variables;
pub use variables::*;

mod templates;
pub use templates::*;

///////////////////////////////////////////////////////////////////////////////
// Services
///////////////////////////////////////////////////////////////////////////////

mod preflight;
pub use preflight::*;

mod discovery;
pub use discovery::*;

mod deployment_resolver;
pub use deployment_resolver::*;

mod firewall;
pub use firewall::*;

pub mod setup;

mod procedure;
pub use procedure::*;
