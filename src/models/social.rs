// src/models/social.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

// Auditoria das publicações (simuladas) em redes sociais
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLog {
    pub id: Uuid,
    pub property_id: Uuid,
    pub network: String,
    pub post_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedEntry {
    pub network: String,
    pub post_url: String,
}

/// "  Facebook " -> "facebook". Nomes vazios ou com caracteres fora de [a-z0-9_-] são recusados.
pub fn normalize_network(raw: &str) -> Option<String> {
    let name = raw.trim().to_ascii_lowercase();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(name)
}

/// URL simulada da publicação; a integração real com as redes não existe.
pub fn mock_post_url(network: &str, property_id: Uuid, post_id: Uuid) -> String {
    format!(
        "https://{network}.example.com/arteca/properties/{property_id}/posts/{}",
        post_id.simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_network_names() {
        assert_eq!(normalize_network("  Facebook "), Some("facebook".to_string()));
        assert_eq!(normalize_network("tik_tok"), Some("tik_tok".to_string()));
        assert_eq!(normalize_network("   "), None);
        assert_eq!(normalize_network("evil.com/x"), None);
    }

    #[test]
    fn mock_url_points_at_the_property() {
        let property_id = Uuid::new_v4();
        let url = mock_post_url("instagram", property_id, Uuid::nil());
        assert!(url.starts_with("https://instagram.example.com/"));
        assert!(url.contains(&property_id.to_string()));
    }
}
