pub mod endpoint_service;

#[cfg(test)]
pub mod scripted;
