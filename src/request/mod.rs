pub mod run_request;
pub mod run_spec;

pub use run_request::RunRequest;
pub use run_spec::RunSpec;
