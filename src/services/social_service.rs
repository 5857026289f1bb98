// src/services/social_service.rs

use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::{PropertyRepository, SocialRepository},
    models::social::{mock_post_url, normalize_network, PublishedEntry, SocialMediaLog},
};

#[derive(Clone)]
pub struct SocialService {
    repo: SocialRepository,
    property_repo: PropertyRepository,
}

impl SocialService {
    pub fn new(repo: SocialRepository, property_repo: PropertyRepository) -> Self {
        Self {
            repo,
            property_repo,
        }
    }

    /// Publicação simulada: gera uma URL por rede e registra tudo na auditoria.
    pub async fn publish(
        &self,
        property_id: Uuid,
        networks: &[String],
    ) -> Result<Vec<PublishedEntry>, AppError> {
        let networks = normalize_networks(networks)?;

        if !self.property_repo.exists(property_id).await? {
            return Err(AppError::NotFound(Entity::Property));
        }

        let mut tx = self.repo.pool().begin().await?;
        let mut published = Vec::with_capacity(networks.len());

        for network in networks {
            let post_url = mock_post_url(&network, property_id, Uuid::new_v4());
            self.repo
                .log(&mut *tx, property_id, &network, &post_url)
                .await?;
            published.push(PublishedEntry { network, post_url });
        }

        tx.commit().await?;

        tracing::info!(property_id = %property_id, count = published.len(), "imóvel publicado nas redes");
        Ok(published)
    }

    pub async fn list_logs(&self, property_id: Uuid) -> Result<Vec<SocialMediaLog>, AppError> {
        self.repo.list_by_property(property_id).await
    }
}

/// Normaliza e remove duplicadas, mantendo a ordem.
fn normalize_networks(raw: &[String]) -> Result<Vec<String>, AppError> {
    let mut networks: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let network = normalize_network(name).ok_or(AppError::InvalidParameter("networks"))?;
        if !networks.contains(&network) {
            networks.push(network);
        }
    }

    if networks.is_empty() {
        return Err(AppError::MissingParameter("networks"));
    }
    Ok(networks)
}
