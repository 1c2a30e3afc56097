pub mod cases;
pub mod run;

pub use cases::*;
pub use run::*;
