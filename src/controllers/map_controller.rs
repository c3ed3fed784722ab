use sqlx::PgPool;
use tracing::debug;

use crate::dto::map_dto::{GeneralMapResponse, MapMarker, MapMarkerKind};
use crate::models::choices::EstablishmentKind;
use crate::models::establishment::Establishment;
use crate::models::tourist_site::TouristSite;
use crate::repositories::establishment_repository::EstablishmentRepository;
use crate::repositories::tourist_site_repository::TouristSiteRepository;
use crate::services::route_map::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::utils::errors::AppResult;
use crate::utils::urls::{establishment_url, media_url, site_url};

pub struct MapController {
    sites: TouristSiteRepository,
    establishments: EstablishmentRepository,
    media: String,
}

fn site_marker(site: TouristSite, media: &str) -> Option<MapMarker> {
    let (lat, lng) = site.coordinates()?;
    Some(MapMarker {
        kind: MapMarkerKind::Site,
        url: site_url(&site.slug),
        image_url: media_url(media, &site.main_image),
        name: site.name,
        lat,
        lng,
        category: site.category_name,
        address: site.address,
    })
}

fn establishment_marker(establishment: Establishment, media: &str) -> Option<MapMarker> {
    let (lat, lng) = establishment.coordinates()?;
    Some(MapMarker {
        kind: MapMarkerKind::Establishment,
        url: establishment_url(&establishment.slug),
        image_url: media_url(media, &establishment.image),
        category: EstablishmentKind::label_for(&establishment.kind),
        name: establishment.name,
        lat,
        lng,
        address: establishment.address,
    })
}

impl MapController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            sites: TouristSiteRepository::new(pool.clone()),
            establishments: EstablishmentRepository::new(pool),
            media: media.to_string(),
        }
    }

    /// Mapa general: lugares y establecimientos con coordenadas
    pub async fn general(&self) -> AppResult<GeneralMapResponse> {
        let sites = self.sites.with_coordinates().await?;
        let establishments = self.establishments.with_coordinates().await?;

        let mut markers: Vec<MapMarker> = sites
            .into_iter()
            .filter_map(|site| site_marker(site, &self.media))
            .collect();
        markers.extend(
            establishments
                .into_iter()
                .filter_map(|establishment| establishment_marker(establishment, &self.media)),
        );

        debug!("🗺️ Mapa general con {} marcadores", markers.len());
        Ok(GeneralMapResponse {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            markers,
        })
    }
}
