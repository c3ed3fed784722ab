//! Responses de detalle que combinan varias entidades

use serde::Serialize;

use crate::models::activity::ActivityResponse;
use crate::models::craft::CraftResponse;
use crate::models::establishment::EstablishmentResponse;
use crate::models::feedback::{PublicComment, PublicRating};
use crate::models::post::PostResponse;
use crate::models::route::RouteSummary;
use crate::models::tourist_site::{SiteImageResponse, SiteResponse, SiteSummary};

#[derive(Debug, Serialize)]
pub struct SiteDetailResponse {
    #[serde(flatten)]
    pub site: SiteResponse,
    pub images: Vec<SiteImageResponse>,
    pub related_sites: Vec<SiteSummary>,
    pub routes: Vec<RouteSummary>,
    pub comments: Vec<PublicComment>,
}

#[derive(Debug, Serialize)]
pub struct EstablishmentDetailResponse {
    #[serde(flatten)]
    pub establishment: EstablishmentResponse,
    pub average_rating: f64,
    pub rating_count: usize,
    pub ratings: Vec<PublicRating>,
    pub comments: Vec<PublicComment>,
}

#[derive(Debug, Serialize)]
pub struct CraftDetailResponse {
    #[serde(flatten)]
    pub craft: CraftResponse,
    pub related_crafts: Vec<CraftResponse>,
}

#[derive(Debug, Serialize)]
pub struct ActivityDetailResponse {
    #[serde(flatten)]
    pub activity: ActivityResponse,
    pub related_activities: Vec<ActivityResponse>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<PublicComment>,
}
