pub mod pipeline;
pub mod preprocess;
pub mod response;
pub mod upload;
