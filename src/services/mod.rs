//! Business logic services

pub mod catalog;
pub mod email;
pub mod loans;
pub mod members;
pub mod metadata;
pub mod stats;

use crate::{
    config::{CatalogsConfig, EmailConfig, LoansConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub loans: loans::LoansService,
    pub metadata: metadata::MetadataService,
    pub stats: stats::StatsService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        email_config: EmailConfig,
        catalogs_config: &CatalogsConfig,
        loans_config: LoansConfig,
    ) -> AppResult<Self> {
        let email = email::EmailService::new(email_config);

        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone(), email.clone(), loans_config),
            metadata: metadata::MetadataService::new(catalogs_config)?,
            stats: stats::StatsService::new(repository),
            email,
        })
    }
}
