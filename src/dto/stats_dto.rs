//! Contadores globales del portal

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contadores mostrados en la portada; se guardan en caché como JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteCounters {
    pub routes: i64,
    pub sites: i64,
    pub featured_sites: i64,
    pub available_activities: i64,
    pub active_events: i64,
    pub establishments_by_kind: BTreeMap<String, i64>,
    pub transport_by_kind: BTreeMap<String, i64>,
    pub crafts_for_sale_by_category: BTreeMap<String, i64>,
    pub routes_by_difficulty: BTreeMap<String, i64>,
}
