pub mod operation;
pub mod value_matrix;
pub mod write_request;
