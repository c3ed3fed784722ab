//! Modelo de Event
//!
//! Eventos culturales con fechas de inicio y fin.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::field_error;
use crate::utils::urls::{event_url, media_url};

/// Estado de un evento respecto al instante actual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Finished,
    Ongoing,
    Upcoming,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Finished => "Finalizado",
            EventStatus::Ongoing => "En curso",
            EventStatus::Upcoming => "Próximamente",
        }
    }
}

/// Event principal - mapea exactamente a la tabla events
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub image: String,
    pub featured: bool,
    pub organizer: String,
    pub contact: String,
    pub programme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        if now > self.ends_at {
            EventStatus::Finished
        } else if now >= self.starts_at {
            EventStatus::Ongoing
        } else {
            EventStatus::Upcoming
        }
    }

    /// Días completos hasta el inicio; 0 si ya empezó o terminó
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        match self.status_at(now) {
            EventStatus::Upcoming => (self.starts_at - now).num_days().max(0),
            _ => 0,
        }
    }

    /// Duración en días, contando el día de inicio
    pub fn duration_days(&self) -> i64 {
        (self.ends_at - self.starts_at).num_days() + 1
    }
}

/// La fecha de fin no puede ser anterior a la de inicio
pub fn validate_event_dates(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<(), ValidationErrors> {
    if ends_at < starts_at {
        let mut errors = ValidationErrors::new();
        errors.add(
            "ends_at",
            field_error("date_order", "La fecha de fin debe ser posterior a la de inicio"),
        );
        return Err(errors);
    }
    Ok(())
}

/// Request para crear un evento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[validate(length(min = 1, max = 255))]
    pub venue: String,

    #[validate(length(max = 255))]
    pub image: Option<String>,

    pub featured: Option<bool>,

    #[validate(length(max = 200))]
    pub organizer: Option<String>,

    pub contact: Option<String>,
    pub programme: Option<String>,
}

/// Request para actualizar un evento
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,

    #[validate(length(max = 255))]
    pub image: Option<String>,

    pub featured: Option<bool>,

    #[validate(length(max = 200))]
    pub organizer: Option<String>,

    pub contact: Option<String>,
    pub programme: Option<String>,
}

/// Filtros del listado de eventos (fechas en formato YYYY-MM-DD)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilters {
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
    pub page: Option<i64>,
}

/// Response de evento con los campos derivados
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub venue: String,
    pub image_url: String,
    pub featured: bool,
    pub organizer: String,
    pub contact: String,
    pub programme: String,
    pub status: EventStatus,
    pub status_label: &'static str,
    pub days_remaining: i64,
    pub duration_days: i64,
    pub url: String,
}

impl EventResponse {
    pub fn from_event(event: Event, media: &str, now: DateTime<Utc>) -> Self {
        let status = event.status_at(now);
        Self {
            status,
            status_label: status.label(),
            days_remaining: event.days_remaining(now),
            duration_days: event.duration_days(),
            image_url: media_url(media, &event.image),
            url: event_url(&event.slug),
            id: event.id,
            title: event.title,
            slug: event.slug,
            description: event.description,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            venue: event.venue,
            featured: event.featured,
            organizer: event.organizer,
            contact: event.contact,
            programme: event.programme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn event(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Festival del Bambuco".to_string(),
            slug: "festival-del-bambuco".to_string(),
            description: "Fiestas de San Pedro".to_string(),
            starts_at,
            ends_at,
            venue: "Parque principal".to_string(),
            image: String::new(),
            featured: false,
            organizer: String::new(),
            contact: String::new(),
            programme: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_status() {
        let start = Utc.with_ymd_and_hms(2024, 6, 20, 18, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 23, 23, 0, 0).unwrap();
        let e = event(start, end);

        assert_eq!(e.status_at(start - Duration::days(10)), EventStatus::Upcoming);
        assert_eq!(e.status_at(start + Duration::hours(5)), EventStatus::Ongoing);
        assert_eq!(e.status_at(end + Duration::seconds(1)), EventStatus::Finished);
        assert_eq!(EventStatus::Upcoming.label(), "Próximamente");
    }

    #[test]
    fn test_days_remaining_and_duration() {
        let start = Utc.with_ymd_and_hms(2024, 6, 20, 18, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 23, 23, 0, 0).unwrap();
        let e = event(start, end);

        assert_eq!(e.days_remaining(start - Duration::days(10)), 10);
        assert_eq!(e.days_remaining(start - Duration::hours(3)), 0);
        assert_eq!(e.days_remaining(end + Duration::days(1)), 0);
        assert_eq!(e.duration_days(), 4);
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 6, 20, 18, 0, 0).unwrap();
        assert!(validate_event_dates(start, start).is_ok());
        let errors = validate_event_dates(start, start - Duration::hours(1)).unwrap_err();
        assert!(errors.field_errors().contains_key("ends_at"));
    }
}
