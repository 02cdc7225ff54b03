pub mod cancel;
pub mod error;
pub mod receive;
pub mod send;
pub mod utils;
pub mod worker;
