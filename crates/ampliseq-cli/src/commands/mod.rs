pub mod config;
pub mod describe;
pub mod launch_plan;
pub mod run;
