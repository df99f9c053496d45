pub mod brownian;
pub mod model;
pub mod ou_process;
pub mod process;

pub use brownian::BrownianMotion;
pub use model::{StochasticIntegrator, Trajectory};
pub use ou_process::OuProcess;
pub use process::{Process, ProcessKind};
