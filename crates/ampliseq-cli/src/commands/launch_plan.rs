use crate::errors::TaskError;
use crate::logger;
use crate::params::{RunParameters, TEST_DATA};
use crate::GlobalOpts;
use std::fs;
use std::path::Path;

/// Render the test-data launch plan as a parameters file
pub fn render_launch_plan() -> Result<String, TaskError> {
    let params = RunParameters::from(TEST_DATA);
    Ok(format!("# {}\n{}", TEST_DATA.name, params.to_yaml()?))
}

/// Print the launch plan, or write it where `run --params` can pick it up
pub fn handle_launch_plan(output: Option<&Path>, _opts: GlobalOpts) -> Result<(), TaskError> {
    let rendered = render_launch_plan()?;

    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| {
                TaskError::Config(format!("Failed to write {}: {}", path.display(), e))
            })?;
            logger::success(&format!("Wrote launch plan to {}", path.display()));
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
