//! Inference of the subject prefix and changed functions.

pub mod function;
pub mod module;

pub use function::{FunctionNameList, guess_function_names};
pub use module::{ModuleFrequencyTable, fallback_module_name, guess_module_name, infer_module_name};
