mod models;

pub use models::{CredentialPair, LoginResponse, UserProfile};
