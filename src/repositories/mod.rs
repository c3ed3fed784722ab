pub mod activity_repository;
pub mod category_repository;
pub mod contact_repository;
pub mod craft_repository;
pub mod establishment_repository;
pub mod event_repository;
pub mod feedback_repository;
pub mod photo_repository;
pub mod post_repository;
pub mod route_repository;
pub mod stats_repository;
pub mod tourist_site_repository;
pub mod transport_repository;
