mod response;
mod wrapper;

pub use response::*;
pub use wrapper::*;
