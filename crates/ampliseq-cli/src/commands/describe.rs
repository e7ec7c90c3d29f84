use crate::errors::TaskError;
use crate::logger;
use crate::metadata::{DESCRIPTION, WORKFLOW_METADATA};
use crate::GlobalOpts;

/// Print the workflow's display metadata as JSON
pub fn handle_describe(long: bool, _opts: GlobalOpts) -> Result<(), TaskError> {
    logger::debug("Rendering workflow metadata");

    if long {
        println!("{}", DESCRIPTION);
        return Ok(());
    }

    let rendered = serde_json::to_string_pretty(&WORKFLOW_METADATA)
        .map_err(|e| TaskError::Config(format!("Failed to render metadata: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
