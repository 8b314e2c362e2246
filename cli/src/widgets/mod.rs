pub mod alert;
pub mod console;
pub mod util;
