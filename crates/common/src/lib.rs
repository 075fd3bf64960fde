pub mod logging;
pub mod utils;
