pub mod extensions;
pub mod file_operations;

pub use extensions::ExtensionSet;
pub use file_operations::{copy_file, walk_tree, CopyError, WalkError};
