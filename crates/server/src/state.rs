use pendler::repository::Repository;

use crate::provider::Provider;

pub struct AppState {
    pub repository: Repository,
    pub provider: Provider,
}

impl AppState {
    pub fn new(repository: Repository, provider: Provider) -> Self {
        Self {
            repository,
            provider,
        }
    }
}
