pub mod reciter;
pub mod run;

pub use reciter::*;
pub use run::*;
