// Draw session lifecycle: assignments, the step-by-step engine, cycle checks.

pub mod assignment;
pub mod cycle;
pub mod game;
pub mod session;
