pub mod argon2_password_hasher;
pub mod json_file_store;
pub mod jwt_token_generator;
#[cfg(test)]
pub mod memory_store;
