use std::path::PathBuf;

/// Where the solver prints its progress when `verbose` is set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Output {
    /// standard output
    #[default]
    Stdout,
    /// an in-memory buffer, read with [`Model::print_buffer`](super::Model::print_buffer)
    Buffer,
    /// a file, created or truncated at setup
    File(PathBuf),
}
