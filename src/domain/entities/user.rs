use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

/// Account record kept alongside the waitlist. No route reads or writes it.
#[derive(Debug)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: SecretString,
}

impl Clone for User {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            username: self.username.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
        }
    }
}

#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password: SecretString,
}
