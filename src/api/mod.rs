mod impls;
mod requests;
mod responses;
mod wager;

pub use impls::*;
pub use requests::*;
pub use responses::*;
pub use self::wager::*;
