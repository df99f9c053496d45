//! Discretisation schemes for the Ornstein-Uhlenbeck process

pub mod euler_maruyama;
pub mod implicit_euler;

pub use euler_maruyama::OuExplicit;
pub use implicit_euler::OuImplicit;
