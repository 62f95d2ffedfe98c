//! Credential adapters: password hashing and bearer token signing.

mod bcrypt_hasher;
mod jwt_codec;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_codec::JwtTokenCodec;
