//! Modelo de PhysicalActivity
//!
//! Actividades de aventura y deporte al aire libre.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::choices::{ActivityKind, ActivityLevel};
use crate::utils::patch::{nullable, nullable_text};
use crate::utils::text::split_list;
use crate::utils::urls::{activity_url, media_url};

/// PhysicalActivity principal - mapea a la tabla physical_activities
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PhysicalActivity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub description: String,
    pub location: String,
    pub level: String,
    pub duration: String,
    pub cost: String,
    pub min_age: i16,
    pub max_capacity: Option<i16>,
    pub included_equipment: String,
    pub required_equipment: String,
    pub health_notes: String,
    pub best_season: String,
    pub schedules: String,
    pub guide: String,
    pub contact: String,
    pub phone: String,
    pub email: Option<String>,
    pub main_image: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub featured: bool,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PhysicalActivity {
    /// Una persona puede participar si alcanza la edad mínima
    pub fn is_suitable_for_age(&self, age: i16) -> bool {
        age >= self.min_age
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Request para crear una actividad
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    pub kind: ActivityKind,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 255))]
    pub location: String,

    pub level: Option<ActivityLevel>,

    #[validate(length(min = 1, max = 50))]
    pub duration: String,

    #[validate(length(max = 100))]
    pub cost: Option<String>,

    #[validate(range(min = 0, max = 120))]
    pub min_age: Option<i16>,

    #[validate(range(min = 0))]
    pub max_capacity: Option<i16>,

    pub included_equipment: Option<String>,
    pub required_equipment: Option<String>,
    pub health_notes: Option<String>,

    #[validate(length(max = 200))]
    pub best_season: Option<String>,

    pub schedules: Option<String>,

    #[validate(length(max = 200))]
    pub guide: Option<String>,

    #[validate(length(max = 200))]
    pub contact: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub featured: Option<bool>,
    pub available: Option<bool>,
}

/// Request para actualizar una actividad
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    pub kind: Option<ActivityKind>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,

    pub level: Option<ActivityLevel>,

    #[validate(length(min = 1, max = 50))]
    pub duration: Option<String>,

    #[validate(length(max = 100))]
    pub cost: Option<String>,

    #[validate(range(min = 0, max = 120))]
    pub min_age: Option<i16>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0))]
    pub max_capacity: Option<Option<i16>>,

    pub included_equipment: Option<String>,
    pub required_equipment: Option<String>,
    pub health_notes: Option<String>,

    #[validate(length(max = 200))]
    pub best_season: Option<String>,

    pub schedules: Option<String>,

    #[validate(length(max = 200))]
    pub guide: Option<String>,

    #[validate(length(max = 200))]
    pub contact: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(email)]
    pub email: Option<Option<String>>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<Option<f64>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<Option<f64>>,

    pub featured: Option<bool>,
    pub available: Option<bool>,
}

/// Filtros del listado público de actividades
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityFilters {
    pub tipo: Option<ActivityKind>,
    pub dificultad: Option<ActivityLevel>,
    /// Edad del visitante: solo actividades aptas para ella
    pub edad: Option<i16>,
    pub q: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub kind_label: String,
    pub description: String,
    pub location: String,
    pub level: String,
    pub level_label: String,
    pub level_badge: &'static str,
    pub duration: String,
    pub cost: String,
    pub min_age: i16,
    pub max_capacity: Option<i16>,
    pub included_equipment: Vec<String>,
    pub required_equipment: Vec<String>,
    pub health_notes: String,
    pub best_season: String,
    pub schedules: String,
    pub guide: String,
    pub contact: String,
    pub phone: String,
    pub email: Option<String>,
    pub image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub has_coordinates: bool,
    pub featured: bool,
    pub available: bool,
    pub url: String,
}

impl ActivityResponse {
    pub fn from_activity(activity: PhysicalActivity, media: &str) -> Self {
        Self {
            kind_label: ActivityKind::label_for(&activity.kind),
            level_label: ActivityLevel::label_for(&activity.level),
            level_badge: ActivityLevel::badge_for(&activity.level),
            included_equipment: split_list(&activity.included_equipment),
            required_equipment: split_list(&activity.required_equipment),
            has_coordinates: activity.has_coordinates(),
            image_url: media_url(media, &activity.main_image),
            url: activity_url(&activity.slug),
            id: activity.id,
            name: activity.name,
            slug: activity.slug,
            kind: activity.kind,
            description: activity.description,
            location: activity.location,
            level: activity.level,
            duration: activity.duration,
            cost: activity.cost,
            min_age: activity.min_age,
            max_capacity: activity.max_capacity,
            health_notes: activity.health_notes,
            best_season: activity.best_season,
            schedules: activity.schedules,
            guide: activity.guide,
            contact: activity.contact,
            phone: activity.phone,
            email: activity.email,
            latitude: activity.latitude,
            longitude: activity.longitude,
            featured: activity.featured,
            available: activity.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(min_age: i16) -> PhysicalActivity {
        PhysicalActivity {
            id: Uuid::new_v4(),
            name: "Rafting en el Magdalena".to_string(),
            slug: "rafting-en-el-magdalena".to_string(),
            kind: "rafting".to_string(),
            description: "Descenso por el río".to_string(),
            location: "Río Magdalena".to_string(),
            level: "avanzado".to_string(),
            duration: "3 horas".to_string(),
            cost: String::new(),
            min_age,
            max_capacity: Some(8),
            included_equipment: "casco, chaleco".to_string(),
            required_equipment: String::new(),
            health_notes: String::new(),
            best_season: String::new(),
            schedules: String::new(),
            guide: String::new(),
            contact: String::new(),
            phone: String::new(),
            email: None,
            main_image: String::new(),
            latitude: None,
            longitude: None,
            featured: false,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_age_suitability() {
        let a = activity(14);
        assert!(a.is_suitable_for_age(14));
        assert!(a.is_suitable_for_age(30));
        assert!(!a.is_suitable_for_age(10));
    }

    #[test]
    fn test_response_derived_fields() {
        let response = ActivityResponse::from_activity(activity(14), "/media/");
        assert_eq!(response.level_badge, "danger");
        assert_eq!(response.kind_label, "Rafting");
        assert_eq!(response.included_equipment, vec!["casco", "chaleco"]);
        assert!(response.required_equipment.is_empty());
        assert!(!response.has_coordinates);
    }
}
