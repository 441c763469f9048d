mod call_context;
pub use call_context::*;
mod handlers;
pub use handlers::*;
mod rpc_method_info;
pub use rpc_method_info::*;
