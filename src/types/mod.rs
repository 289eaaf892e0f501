pub mod ids;
pub mod login;
pub mod request;
pub mod response;
pub mod session;

pub use ids::*;
pub use login::*;
pub use request::*;
pub use response::*;
pub use session::*;
