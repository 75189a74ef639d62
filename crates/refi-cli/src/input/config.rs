use refi_core::CalculatorConfig;

use super::file::read_structured;

/// Calculator settings from `--config`, or the built-in defaults.
pub fn load_config(path: Option<&str>) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => read_structured(p),
        None => Ok(CalculatorConfig::default()),
    }
}
