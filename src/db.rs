pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod document_repo;
pub use document_repo::DocumentRepository;
pub mod post_repo;
pub use post_repo::PostRepository;
pub mod property_repo;
pub use property_repo::PropertyRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod social_repo;
pub use social_repo::SocialRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
