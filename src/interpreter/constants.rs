// Constants for the execution engine

/// Diagnostics kept per engine; the oldest entry is dropped first
pub const MAX_DIAGNOSTICS: usize = 256;

/// Notice recorded when `@` is executed
pub const COMPLETION_NOTICE: &str = "Execution completed";
