use crate::error::HashError;

/// bcrypt hashing for stored passwords. Cost is configurable so tests can
/// run at `bcrypt::MIN_COST`. Work runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String, HashError> {
        let cost = self.cost;
        let password = password.to_owned();
        Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
    }

    /// Index of the first stored hash that `password` verifies against.
    /// A stored value that is not a bcrypt hash never matches.
    pub async fn first_match(&self, password: &str, stored: Vec<String>) -> Result<Option<usize>, HashError> {
        let password = password.to_owned();
        let found = tokio::task::spawn_blocking(move || {
            stored
                .iter()
                .position(|hash| bcrypt::verify(&password, hash).unwrap_or(false))
        })
        .await?;
        Ok(found)
    }

    pub async fn verify(&self, password: &str, stored: &str) -> Result<bool, HashError> {
        Ok(self.first_match(password, vec![stored.to_owned()]).await?.is_some())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher::new(bcrypt::DEFAULT_COST)
    }
}
