//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes. Stdout always carries the
//! JSON failure shape (`{"success": false, "error": ...}`) so a
//! consuming process receives structured output on every path; the
//! human-readable message and hints go to stderr.

use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to read the input file.
    InputRead { path: String, error: std::io::Error },
    /// Input file is not a valid prediction request.
    InputParse(serde_json::Error),
    /// Failed to serialize the report.
    Render(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    ///
    /// Prints the JSON failure report to stdout and the diagnostic
    /// message (plus hints, where useful) to stderr.
    pub fn exit(&self) -> ! {
        println!("{}", self.failure_json());
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::InputParse(_) = self {
            eprintln!();
            eprintln!("The input must be a JSON prediction request:");
            eprintln!("  {{");
            eprintln!("    \"ship_info\": {{ \"MMSI\": \"227006760\" }},");
            eprintln!("    \"positions\": [");
            eprintln!("      {{ \"timestamp\": \"2024-05-01T10:00:00Z\",");
            eprintln!("        \"latitude\": 43.3, \"longitude\": 5.37,");
            eprintln!("        \"sog\": 12.0, \"cog\": 88.0 }}");
            eprintln!("    ]");
            eprintln!("  }}");
        }

        process::exit(1)
    }

    /// The error as the JSON failure shape emitted on stdout.
    fn failure_json(&self) -> String {
        serde_json::json!({
            "success": false,
            "error": self.to_string(),
        })
        .to_string()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputRead { path, error } => {
                write!(f, "Failed to read input file '{}': {}", path, error)
            }
            CliError::InputParse(e) => write!(f, "Invalid prediction request: {}", e),
            CliError::Render(e) => write!(f, "Failed to serialize report: {}", e),
        }
    }
}
